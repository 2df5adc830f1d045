//! Recording collaborators shared by the integration tests.

use std::collections::VecDeque;

use els_common::config::{MachineConfig, PanelOptions};
use els_common::glyph::{MessageGlyphs, ValueGlyphs};
use els_common::motion::MotionCore;
use els_common::panel::{ControlPanel, Indicators, Keys};
use els_common::ratio::Ratio;
use els_control_panel::catalog::{FeedTableCatalog, GearTableCatalog};
use els_control_panel::control::PanelControlLoop;

#[derive(Debug, Default)]
pub struct MockCore {
    pub rpm: u16,
    pub power_on: bool,
    pub reverse: Option<bool>,
    pub feeds: Vec<Ratio>,
    pub gears: Vec<Ratio>,
}

impl MotionCore for MockCore {
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
        self.reverse = Some(reverse);
    }
    fn set_feed(&mut self, ratio: Ratio) {
        self.feeds.push(ratio);
    }
    fn set_gear(&mut self, ratio: Ratio) {
        self.gears.push(ratio);
    }
}

/// Panel writes of one tick.
#[derive(Debug, Clone, Default)]
pub struct Refresh {
    pub leds: Indicators,
    pub value: Option<ValueGlyphs>,
    pub rpm: u16,
    /// Override on screen at commit time.
    pub message: Option<MessageGlyphs>,
}

#[derive(Debug, Default)]
pub struct RecordingPanel {
    pub queued: VecDeque<Keys>,
    pub message_calls: Vec<Option<MessageGlyphs>>,
    pending: Refresh,
    pub refreshes: Vec<Refresh>,
}

impl RecordingPanel {
    pub fn last(&self) -> &Refresh {
        self.refreshes.last().expect("no refresh yet")
    }
}

impl ControlPanel for RecordingPanel {
    fn keys(&mut self) -> Keys {
        self.queued.pop_front().unwrap_or_default()
    }
    fn set_message(&mut self, message: Option<&MessageGlyphs>) {
        self.message_calls.push(message.copied());
        self.pending.message = message.copied();
    }
    fn set_leds(&mut self, leds: Indicators) {
        self.pending.leds = leds;
    }
    fn set_value(&mut self, value: &ValueGlyphs) {
        self.pending.value = Some(*value);
    }
    fn set_rpm(&mut self, rpm: u16) {
        self.pending.rpm = rpm;
    }
    fn refresh(&mut self) {
        self.refreshes.push(self.pending.clone());
    }
}

pub type TestLoop = PanelControlLoop<MockCore, RecordingPanel>;

pub fn build(options: PanelOptions, power_on: bool) -> TestLoop {
    let machine = MachineConfig::default();
    let core = MockCore {
        power_on,
        ..MockCore::default()
    };
    PanelControlLoop::new(
        core,
        RecordingPanel::default(),
        FeedTableCatalog::new(&machine).unwrap(),
        GearTableCatalog::new().unwrap(),
        options,
    )
}

/// Powered-on loop with default options.
pub fn powered() -> TestLoop {
    build(PanelOptions::default(), true)
}

/// Queue `keys` for the next tick and run it.
pub fn press(ui: &mut TestLoop, keys: Keys) {
    ui.panel_mut().queued.push_back(keys);
    ui.tick();
}

/// Run `n` ticks with no keys.
pub fn idle(ui: &mut TestLoop, n: usize) {
    for _ in 0..n {
        ui.tick();
    }
}
