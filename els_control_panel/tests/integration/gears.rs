//! SET key: gear selection and its announcement.

use els_common::config::PanelOptions;
use els_common::panel::Keys;
use els_common::ratio::Ratio;
use els_control_panel::message::{FRAMES, frames};

use super::support::{build, powered, press};

#[test]
fn set_selects_next_gear_and_announces_it() {
    let mut ui = powered();
    press(&mut ui, Keys::SET);

    assert_eq!(ui.core().gears.last(), Some(&Ratio::new(1, 2).unwrap()));
    assert_eq!(ui.messages().current(), Some(frames::GEAR_2_TO_1));

    ui.tick();
    assert_eq!(
        ui.panel().last().message,
        Some(FRAMES[frames::GEAR_2_TO_1.index()].glyphs)
    );
}

#[test]
fn gear_table_wraps() {
    let mut ui = powered();
    for _ in 0..4 {
        press(&mut ui, Keys::SET);
    }
    assert_eq!(ui.core().gears.len(), 5);
    assert_eq!(ui.core().gears.last(), Some(&Ratio::UNITY));
    assert_eq!(ui.messages().current(), Some(frames::GEAR_DIRECT));
}

#[test]
fn set_without_gearbox_shows_no_settings() {
    let options = PanelOptions {
        use_gearbox: false,
        ..PanelOptions::default()
    };
    let mut ui = build(options, true);
    press(&mut ui, Keys::SET);

    assert_eq!(ui.core().gears.len(), 1);
    assert_eq!(ui.messages().current(), Some(frames::NO_SETTINGS));
}

#[test]
fn set_ignored_while_running() {
    let mut ui = powered();
    ui.core_mut().rpm = 12;
    press(&mut ui, Keys::SET);
    assert_eq!(ui.core().gears.len(), 1);
    assert_eq!(ui.messages().current(), Some(frames::STARTUP));
}
