//! Panel control loop.
//!
//! One [`PanelControlLoop::tick`] per panel refresh:
//!
//! 1. Read spindle RPM (before anything else, so safety gating never acts
//!    on a stale reading).
//! 2. Advance the message override.
//! 3. Read the keypad.
//! 4. Stopped-only keys (RPM == 0): POWER; then, with power on, IN_MM,
//!    FEED_THREAD, FWD_REV and SET.
//! 5. UP/DOWN with power on, also while running unless
//!    `ignore_keys_when_running` is set.
//! 6. Compute indicator lights.
//! 7. Push lights, value and RPM to the panel.
//! 8. Commit the panel refresh.

use std::sync::Arc;

use els_common::config::PanelOptions;
use els_common::glyph::VALUE_BLANK;
use els_common::motion::MotionCore;
use els_common::panel::{ControlPanel, Indicators, Keys};
use tracing::{debug, info};

use crate::catalog::{FeedTable, FeedTableCatalog, FeedTableKind, FeedThreadRow, GearTableCatalog};
use crate::message::{BacklogAlarm, MessageSequencer, frames};

/// The panel's decision layer between keypad, display and motion core.
#[derive(Debug)]
pub struct PanelControlLoop<C: MotionCore, P: ControlPanel> {
    core: C,
    panel: P,
    feeds: FeedTableCatalog,
    gears: GearTableCatalog,
    options: PanelOptions,
    messages: Arc<MessageSequencer>,
    metric: bool,
    thread: bool,
    reverse: bool,
}

impl<C: MotionCore, P: ControlPanel> PanelControlLoop<C, P> {
    /// Take over `core` and `panel`.
    ///
    /// Starts in inch / feed / forward, pushes direction, feed and gear to
    /// the motion core so it starts consistent with the panel, and queues
    /// the startup banner.
    pub fn new(
        mut core: C,
        panel: P,
        feeds: FeedTableCatalog,
        gears: GearTableCatalog,
        options: PanelOptions,
    ) -> Self {
        let messages = Arc::new(MessageSequencer::default());
        core.set_reverse(false);
        core.set_feed(feeds.resolve(false, false).current_ratio());
        core.set_gear(gears.table().current_ratio());
        messages.set_message(frames::STARTUP);

        info!(
            use_gearbox = options.use_gearbox,
            ignore_keys_when_running = options.ignore_keys_when_running,
            "control panel started"
        );

        Self {
            core,
            panel,
            feeds,
            gears,
            options,
            messages,
            metric: false,
            thread: false,
            reverse: false,
        }
    }

    /// Run one control-loop iteration.
    pub fn tick(&mut self) {
        let rpm = self.core.rpm();

        self.messages.tick(&mut self.panel);

        let keys = self.panel.keys();

        if rpm == 0 {
            self.handle_stopped_keys(keys);
        }
        if rpm == 0 || !self.options.ignore_keys_when_running {
            self.handle_running_keys(keys);
        }

        let leds = self.indicators();
        self.panel.set_leds(leds);
        if self.core.is_power_on() {
            let display = self.active_feed().display;
            self.panel.set_value(&display);
        } else {
            self.panel.set_value(&VALUE_BLANK);
        }
        self.panel.set_rpm(rpm);

        self.panel.refresh();
    }

    /// Keys honoured only with the spindle stopped.
    fn handle_stopped_keys(&mut self, keys: Keys) {
        if keys.contains(Keys::POWER) {
            let on = !self.core.is_power_on();
            self.core.set_power_on(on);
            self.messages.clear(&mut self.panel);
            info!(power_on = on, "power toggled");
        }

        if !self.core.is_power_on() {
            return;
        }

        if keys.contains(Keys::IN_MM) {
            self.metric = !self.metric;
            self.load_feed_table();
        }
        if keys.contains(Keys::FEED_THREAD) {
            self.thread = !self.thread;
            self.load_feed_table();
        }
        if keys.contains(Keys::FWD_REV) {
            self.reverse = !self.reverse;
            self.core.set_reverse(self.reverse);
            info!(reverse = self.reverse, "direction toggled");
        }
        if keys.contains(Keys::SET) {
            if self.options.use_gearbox {
                let gear = *self.gears.table_mut().next();
                self.core.set_gear(gear.ratio);
                self.messages.set_message(gear.message);
                debug!(
                    gear = self.gears.table().index(),
                    numerator = gear.ratio.numerator(),
                    denominator = gear.ratio.denominator(),
                    "gear selected"
                );
            } else {
                self.messages.set_message(frames::NO_SETTINGS);
            }
        }
    }

    /// Keys that may change the feed live.
    fn handle_running_keys(&mut self, keys: Keys) {
        if !self.core.is_power_on() {
            return;
        }
        if keys.contains(Keys::UP) {
            let ratio = self.feeds.resolve_mut(self.metric, self.thread).next().ratio;
            self.core.set_feed(ratio);
            debug!(row = self.active_table().index(), "feed up");
        }
        if keys.contains(Keys::DOWN) {
            let ratio = self.feeds.resolve_mut(self.metric, self.thread).previous().ratio;
            self.core.set_feed(ratio);
            debug!(row = self.active_table().index(), "feed down");
        }
    }

    /// Re-resolve the active table after a mode change and push its row.
    fn load_feed_table(&mut self) {
        let ratio = self.active_table().current_ratio();
        self.core.set_feed(ratio);
        info!(table = self.active_kind().name(), "feed table selected");
    }

    /// Indicator lights for the current state.
    ///
    /// Power off: everything dark. Power on: the row's mode lights, POWER,
    /// and exactly one of FORWARD/REVERSE.
    pub fn indicators(&self) -> Indicators {
        if !self.core.is_power_on() {
            return Indicators::empty();
        }
        let mut leds = self.active_feed().leds | Indicators::POWER;
        leds.set(Indicators::REVERSE, self.reverse);
        leds.set(Indicators::FORWARD, !self.reverse);
        leds
    }

    /// Raise the step-backlog panic. Same as [`BacklogAlarm::panic_step_backlog`].
    pub fn panic_step_backlog(&self) {
        self.backlog_alarm().panic_step_backlog();
    }

    /// Handle for the motion core's real-time path.
    pub fn backlog_alarm(&self) -> BacklogAlarm {
        BacklogAlarm::new(Arc::clone(&self.messages))
    }

    #[inline]
    pub fn active_kind(&self) -> FeedTableKind {
        FeedTableKind::from_modes(self.metric, self.thread)
    }

    #[inline]
    pub fn active_table(&self) -> &FeedTable {
        self.feeds.resolve(self.metric, self.thread)
    }

    #[inline]
    pub fn active_feed(&self) -> &FeedThreadRow {
        self.active_table().current()
    }

    #[inline]
    pub fn is_metric(&self) -> bool {
        self.metric
    }

    #[inline]
    pub fn is_thread(&self) -> bool {
        self.thread
    }

    #[inline]
    pub fn is_reverse(&self) -> bool {
        self.reverse
    }

    pub fn messages(&self) -> &MessageSequencer {
        &self.messages
    }

    pub fn options(&self) -> PanelOptions {
        self.options
    }

    pub fn core(&self) -> &C {
        &self.core
    }

    pub fn core_mut(&mut self) -> &mut C {
        &mut self.core
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }
}
