//! Motion core contract.
//!
//! The motion core turns spindle encoder counts into stepper pulses using
//! the ratios selected here. It runs its own real-time path; the panel
//! only polls it and pushes settings.

use crate::ratio::Ratio;

/// Motion-synchronization engine as seen from the control panel.
///
/// Setters must take effect before the next motion cycle and cannot fail.
pub trait MotionCore {
    /// Spindle speed. `0` is the authoritative "stopped" signal.
    fn rpm(&self) -> u16;

    fn is_power_on(&self) -> bool;

    fn set_power_on(&mut self, on: bool);

    fn set_reverse(&mut self, reverse: bool);

    /// Push a newly selected feed/thread ratio.
    fn set_feed(&mut self, ratio: Ratio);

    /// Push a newly selected gear ratio.
    fn set_gear(&mut self, ratio: Ratio);
}
