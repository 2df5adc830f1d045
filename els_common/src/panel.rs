//! Control panel contract.
//!
//! The panel driver owns keypad scanning, debouncing, segment encoding and
//! digit multiplexing. The decision layer only sees a key snapshot per tick
//! and writes buffered display state that is committed by
//! [`ControlPanel::refresh`].

use bitflags::bitflags;

use crate::glyph::{MessageGlyphs, ValueGlyphs};

bitflags! {
    /// Keys asserted in one keypad snapshot.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Keys: u8 {
        /// Next row of the active feed/thread table.
        const UP          = 0x01;
        /// Previous row of the active feed/thread table.
        const DOWN        = 0x02;
        /// Toggle inch/metric.
        const IN_MM       = 0x04;
        /// Toggle feed/thread.
        const FEED_THREAD = 0x08;
        /// Toggle forward/reverse.
        const FWD_REV     = 0x10;
        /// Select the next gear setting.
        const SET         = 0x20;
        /// Toggle motion power.
        const POWER       = 0x40;
    }
}

impl Default for Keys {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags! {
    /// Panel indicator lights.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Indicators: u8 {
        const FEED    = 0x01;
        const THREAD  = 0x02;
        const INCH    = 0x04;
        const MM      = 0x08;
        const TPI     = 0x10;
        const POWER   = 0x20;
        const FORWARD = 0x40;
        const REVERSE = 0x80;
    }
}

impl Default for Indicators {
    fn default() -> Self {
        Self::empty()
    }
}

/// Physical panel driver.
///
/// All setters are write-only and buffered until [`refresh`](Self::refresh).
pub trait ControlPanel {
    /// Current keypad snapshot.
    fn keys(&mut self) -> Keys;

    /// Show a message over the live display, or `None` to stop overriding.
    fn set_message(&mut self, message: Option<&MessageGlyphs>);

    fn set_leds(&mut self, leds: Indicators);

    fn set_value(&mut self, value: &ValueGlyphs);

    fn set_rpm(&mut self, rpm: u16);

    /// Commit buffered writes to the hardware as one update.
    fn refresh(&mut self);
}
