//! Key handling, safety gating and display output of the control loop.

use els_common::config::PanelOptions;
use els_common::glyph::VALUE_BLANK;
use els_common::panel::{Indicators, Keys};
use els_common::ratio::Ratio;
use els_control_panel::catalog::FeedTableKind;

use super::support::{build, idle, powered, press};

#[test]
fn startup_pushes_initial_settings() {
    let ui = powered();
    let core = ui.core();
    assert_eq!(core.reverse, Some(false));
    assert_eq!(core.feeds, vec![ui.active_feed().ratio]);
    assert_eq!(core.gears, vec![Ratio::UNITY]);
    assert_eq!(ui.active_kind(), FeedTableKind::InchFeed);
    assert!(ui.messages().is_active());
}

#[test]
fn stopped_only_keys_ignored_while_running() {
    let mut ui = powered();
    ui.core_mut().rpm = 5;

    for key in [Keys::POWER, Keys::IN_MM, Keys::FEED_THREAD, Keys::FWD_REV, Keys::SET] {
        press(&mut ui, key);
    }

    assert!(ui.core().power_on);
    assert!(!ui.is_metric());
    assert!(!ui.is_thread());
    assert!(!ui.is_reverse());
    assert_eq!(ui.core().feeds.len(), 1);
    assert_eq!(ui.core().gears.len(), 1);
    assert_eq!(ui.core().reverse, Some(false));
}

#[test]
fn power_key_toggles_when_stopped() {
    let mut ui = powered();
    press(&mut ui, Keys::POWER);
    assert!(!ui.core().power_on);
    press(&mut ui, Keys::POWER);
    assert!(ui.core().power_on);
}

#[test]
fn power_key_clears_message() {
    let mut ui = powered();
    ui.tick();
    assert!(ui.messages().is_active());
    press(&mut ui, Keys::POWER);
    assert!(!ui.messages().is_active());
    assert_eq!(ui.panel().message_calls.last(), Some(&None));
    assert_eq!(ui.panel().last().message, None);
}

#[test]
fn mode_keys_need_power() {
    let mut ui = build(PanelOptions::default(), false);
    press(&mut ui, Keys::IN_MM | Keys::FEED_THREAD | Keys::FWD_REV | Keys::UP);
    assert!(!ui.is_metric());
    assert!(!ui.is_thread());
    assert!(!ui.is_reverse());
    assert_eq!(ui.core().feeds.len(), 1);
}

#[test]
fn power_and_mode_in_one_snapshot() {
    let mut ui = build(PanelOptions::default(), false);
    press(&mut ui, Keys::POWER | Keys::IN_MM);
    assert!(ui.core().power_on);
    assert!(ui.is_metric());
}

#[test]
fn unit_key_switches_table_and_pushes_once() {
    let mut ui = powered();
    let before = ui.core().feeds.len();

    press(&mut ui, Keys::IN_MM);

    assert!(ui.is_metric());
    assert_eq!(ui.active_kind(), FeedTableKind::MetricFeed);
    assert_eq!(ui.core().feeds.len(), before + 1);
    assert_eq!(ui.core().feeds.last(), Some(&ui.active_feed().ratio));
}

#[test]
fn mode_key_switches_to_threads() {
    let mut ui = powered();
    press(&mut ui, Keys::FEED_THREAD);
    assert_eq!(ui.active_kind(), FeedTableKind::InchThread);
    press(&mut ui, Keys::IN_MM);
    assert_eq!(ui.active_kind(), FeedTableKind::MetricThread);
    assert_eq!(ui.core().feeds.len(), 3);
    assert_eq!(ui.core().feeds.last(), Some(&ui.active_feed().ratio));
}

#[test]
fn direction_key_pushes_reverse() {
    let mut ui = powered();
    press(&mut ui, Keys::FWD_REV);
    assert!(ui.is_reverse());
    assert_eq!(ui.core().reverse, Some(true));
    press(&mut ui, Keys::FWD_REV);
    assert_eq!(ui.core().reverse, Some(false));
}

#[test]
fn up_changes_feed_while_running() {
    let mut ui = powered();
    ui.core_mut().rpm = 300;
    let start = ui.active_table().index();

    press(&mut ui, Keys::UP);

    assert_eq!(ui.active_table().index(), start + 1);
    assert_eq!(ui.core().feeds.len(), 2);
    assert_eq!(ui.core().feeds.last(), Some(&ui.active_feed().ratio));
}

#[test]
fn running_keys_suppressed_when_configured() {
    let options = PanelOptions {
        ignore_keys_when_running: true,
        ..PanelOptions::default()
    };
    let mut ui = build(options, true);
    ui.core_mut().rpm = 300;
    let start = ui.active_table().index();

    press(&mut ui, Keys::UP);
    press(&mut ui, Keys::DOWN);
    assert_eq!(ui.active_table().index(), start);
    assert_eq!(ui.core().feeds.len(), 1);

    ui.core_mut().rpm = 0;
    press(&mut ui, Keys::UP);
    assert_eq!(ui.active_table().index(), start + 1);
}

#[test]
fn down_wraps_to_last_row() {
    let mut ui = powered();
    let start = ui.active_table().index();
    for _ in 0..=start {
        press(&mut ui, Keys::DOWN);
    }
    assert_eq!(ui.active_table().index(), ui.active_table().len() - 1);
}

#[test]
fn each_table_keeps_its_selection() {
    let mut ui = powered();
    let inch = ui.active_table().index();

    press(&mut ui, Keys::IN_MM);
    let metric = ui.active_table().index();
    press(&mut ui, Keys::UP);
    press(&mut ui, Keys::IN_MM);
    assert_eq!(ui.active_table().index(), inch);

    press(&mut ui, Keys::IN_MM);
    assert_eq!(ui.active_table().index(), metric + 1);
}

#[test]
fn indicators_dark_when_power_off() {
    let mut ui = powered();
    press(&mut ui, Keys::FWD_REV);
    press(&mut ui, Keys::POWER);
    assert!(ui.is_reverse());
    assert_eq!(ui.indicators(), Indicators::empty());
    assert_eq!(ui.panel().last().leds, Indicators::empty());
    assert_eq!(ui.panel().last().value, Some(VALUE_BLANK));
}

#[test]
fn indicators_forward_with_row_mask() {
    let mut ui = powered();
    ui.tick();
    let leds = ui.panel().last().leds;
    assert!(leds.contains(Indicators::POWER | Indicators::FORWARD));
    assert!(!leds.contains(Indicators::REVERSE));
    assert!(leds.contains(ui.active_feed().leds));
    assert!(leds.contains(Indicators::FEED | Indicators::INCH));
}

#[test]
fn indicators_reverse_is_exclusive() {
    let mut ui = powered();
    press(&mut ui, Keys::FWD_REV | Keys::FEED_THREAD);
    let leds = ui.panel().last().leds;
    assert!(leds.contains(Indicators::REVERSE | Indicators::POWER));
    assert!(!leds.contains(Indicators::FORWARD));
    assert!(leds.contains(Indicators::THREAD | Indicators::TPI));
}

#[test]
fn value_and_rpm_follow_state() {
    let mut ui = powered();
    ui.core_mut().rpm = 420;
    ui.tick();
    let last = ui.panel().last();
    assert_eq!(last.value, Some(ui.active_feed().display));
    assert_eq!(last.rpm, 420);
}

#[test]
fn one_refresh_per_tick() {
    let mut ui = powered();
    idle(&mut ui, 25);
    assert_eq!(ui.panel().refreshes.len(), 25);
}
