//! Simulation collaborators for running the panel without hardware.
//!
//! [`SimulatedCore`] stands in for the motion core: spindle speed is set by
//! the caller, pushed settings are recorded, and it reports a step backlog
//! when the selected ratio would need a faster step rate than configured.
//! [`ScriptedPanel`] replays key presses and logs every changed frame.

use els_common::config::MachineConfig;
use els_common::glyph::{GlyphText, MessageGlyphs, VALUE_BLANK, ValueGlyphs};
use els_common::motion::MotionCore;
use els_common::panel::{ControlPanel, Indicators, Keys};
use els_common::ratio::Ratio;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::SimulationConfig;
use crate::message::BacklogAlarm;

/// In-memory motion core.
#[derive(Debug, Clone)]
pub struct SimulatedCore {
    rpm: u16,
    power_on: bool,
    reverse: bool,
    feed: Ratio,
    gear: Ratio,
    encoder_resolution: u32,
    max_step_rate_hz: u64,
    feed_pushes: u64,
}

impl SimulatedCore {
    pub fn new(machine: &MachineConfig, sim: &SimulationConfig) -> Self {
        Self {
            rpm: 0,
            power_on: sim.power_on_at_start,
            reverse: false,
            feed: Ratio::UNITY,
            gear: Ratio::UNITY,
            encoder_resolution: machine.encoder_resolution,
            max_step_rate_hz: sim.max_step_rate_hz,
            feed_pushes: 0,
        }
    }

    pub fn set_spindle_rpm(&mut self, rpm: u16) {
        if rpm != self.rpm {
            debug!(rpm, "spindle speed");
        }
        self.rpm = rpm;
    }

    pub fn feed(&self) -> Ratio {
        self.feed
    }

    pub fn gear(&self) -> Ratio {
        self.gear
    }

    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    /// Number of `set_feed` calls received.
    pub fn feed_pushes(&self) -> u64 {
        self.feed_pushes
    }

    /// Step rate the current settings demand [Hz].
    ///
    /// `rpm / 60 * encoder_counts * feed * gear`.
    pub fn step_rate_hz(&self) -> u64 {
        let num = (self.rpm as u128)
            .saturating_mul(self.encoder_resolution as u128)
            .saturating_mul(self.feed.numerator() as u128)
            .saturating_mul(self.gear.numerator() as u128);
        let den = 60 * self.feed.denominator() as u128 * self.gear.denominator() as u128;
        u64::try_from(num / den).unwrap_or(u64::MAX)
    }

    /// The stepper cannot keep up with the spindle.
    pub fn is_backlogged(&self) -> bool {
        self.power_on && self.step_rate_hz() > self.max_step_rate_hz
    }
}

/// Raises the backlog alarm once per transition into backlog.
#[derive(Debug, Default)]
pub struct BacklogMonitor {
    backlogged: bool,
}

impl BacklogMonitor {
    /// Returns `true` when this poll raised the alarm.
    pub fn poll(&mut self, core: &SimulatedCore, alarm: &BacklogAlarm) -> bool {
        let now = core.is_backlogged();
        let rising = now && !self.backlogged;
        self.backlogged = now;
        if rising {
            alarm.panic_step_backlog();
        }
        rising
    }
}

impl MotionCore for SimulatedCore {
    fn rpm(&self) -> u16 {
        self.rpm
    }

    fn is_power_on(&self) -> bool {
        self.power_on
    }

    fn set_power_on(&mut self, on: bool) {
        self.power_on = on;
    }

    fn set_reverse(&mut self, reverse: bool) {
        self.reverse = reverse;
    }

    fn set_feed(&mut self, ratio: Ratio) {
        self.feed = ratio;
        self.feed_pushes += 1;
        debug!(
            numerator = ratio.numerator(),
            denominator = ratio.denominator(),
            "feed ratio"
        );
    }

    fn set_gear(&mut self, ratio: Ratio) {
        self.gear = ratio;
        debug!(
            numerator = ratio.numerator(),
            denominator = ratio.denominator(),
            "gear ratio"
        );
    }
}

/// Key script parse error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unknown key '{0}'")]
    UnknownKey(String),

    #[error("invalid spindle speed '{0}'")]
    InvalidRpm(String),
}

/// One tick of a key script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptStep {
    pub keys: Keys,
    /// Spindle speed from this tick on.
    pub rpm: Option<u16>,
}

/// Parse a comma-separated key script, one entry per tick.
///
/// An entry is empty (no key), key names joined with `+` (`up`, `fwd_rev`,
/// `power+in_mm`), or `rpm:<n>` to change the spindle speed.
pub fn parse_key_script(script: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    if script.trim().is_empty() {
        return Ok(Vec::new());
    }
    script
        .split(',')
        .map(|entry| {
            let entry = entry.trim();
            if let Some(rpm) = entry.strip_prefix("rpm:") {
                let rpm = rpm
                    .trim()
                    .parse()
                    .map_err(|_| ScriptError::InvalidRpm(rpm.to_string()))?;
                return Ok(ScriptStep {
                    keys: Keys::empty(),
                    rpm: Some(rpm),
                });
            }
            let mut keys = Keys::empty();
            for name in entry.split('+').map(str::trim).filter(|n| !n.is_empty()) {
                keys |= Keys::from_name(&name.to_ascii_uppercase())
                    .ok_or_else(|| ScriptError::UnknownKey(name.to_string()))?;
            }
            Ok(ScriptStep { keys, rpm: None })
        })
        .collect()
}

/// Headless panel: keys come from [`press`](Self::press), frames go to the log.
#[derive(Debug, Clone)]
pub struct ScriptedPanel {
    pending: Keys,
    message: Option<MessageGlyphs>,
    leds: Indicators,
    value: ValueGlyphs,
    rpm: u16,
    last_frame: String,
    refreshes: u64,
}

impl Default for ScriptedPanel {
    fn default() -> Self {
        Self {
            pending: Keys::empty(),
            message: None,
            leds: Indicators::empty(),
            value: VALUE_BLANK,
            rpm: 0,
            last_frame: String::new(),
            refreshes: 0,
        }
    }
}

impl ScriptedPanel {
    /// Keys reported by the next snapshot.
    pub fn press(&mut self, keys: Keys) {
        self.pending |= keys;
    }

    /// Text of the committed display.
    pub fn frame(&self) -> &str {
        &self.last_frame
    }

    pub fn refreshes(&self) -> u64 {
        self.refreshes
    }

    fn render(&self) -> String {
        match &self.message {
            Some(message) => format!("[{}]", GlyphText(message)),
            None => format!("{} {:>4} rpm", GlyphText(&self.value), self.rpm),
        }
    }
}

impl ControlPanel for ScriptedPanel {
    fn keys(&mut self) -> Keys {
        std::mem::take(&mut self.pending)
    }

    fn set_message(&mut self, message: Option<&MessageGlyphs>) {
        self.message = message.copied();
    }

    fn set_leds(&mut self, leds: Indicators) {
        self.leds = leds;
    }

    fn set_value(&mut self, value: &ValueGlyphs) {
        self.value = *value;
    }

    fn set_rpm(&mut self, rpm: u16) {
        self.rpm = rpm;
    }

    fn refresh(&mut self) {
        self.refreshes += 1;
        let frame = self.render();
        if frame != self.last_frame {
            info!(frame = %frame, leds = ?self.leds, "panel");
            self.last_frame = frame;
        }
    }
}
