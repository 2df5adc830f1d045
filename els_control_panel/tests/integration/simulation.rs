//! The simulated collaborators driven through a scripted session.

use els_common::config::{MachineConfig, PanelOptions};
use els_common::motion::MotionCore;
use els_control_panel::catalog::{FeedTableCatalog, FeedTableKind, GearTableCatalog};
use els_control_panel::config::SimulationConfig;
use els_control_panel::control::PanelControlLoop;
use els_control_panel::sim::{BacklogMonitor, ScriptedPanel, SimulatedCore, parse_key_script};

fn session(sim: SimulationConfig) -> PanelControlLoop<SimulatedCore, ScriptedPanel> {
    let machine = MachineConfig::default();
    PanelControlLoop::new(
        SimulatedCore::new(&machine, &sim),
        ScriptedPanel::default(),
        FeedTableCatalog::new(&machine).unwrap(),
        GearTableCatalog::new().unwrap(),
        PanelOptions::default(),
    )
}

fn replay(ui: &mut PanelControlLoop<SimulatedCore, ScriptedPanel>, script: &str, extra: usize) {
    let steps = parse_key_script(script).unwrap();
    for step in &steps {
        if let Some(rpm) = step.rpm {
            ui.core_mut().set_spindle_rpm(rpm);
        }
        ui.panel_mut().press(step.keys);
        ui.tick();
    }
    for _ in 0..extra {
        ui.tick();
    }
}

#[test]
fn scripted_thread_setup() {
    let mut ui = session(SimulationConfig::default());
    replay(&mut ui, "feed_thread,in_mm,up,fwd_rev", 400);

    assert_eq!(ui.active_kind(), FeedTableKind::MetricThread);
    assert_eq!(ui.core().feed(), ui.active_feed().ratio);
    assert!(ui.core().is_reverse());
    // Startup banner has ended; the live value is on screen.
    assert_eq!(ui.panel().frame(), " 1.25    0 rpm");
}

#[test]
fn running_spindle_locks_mode_keys() {
    let mut ui = session(SimulationConfig::default());
    replay(&mut ui, "rpm:200,in_mm,power", 0);
    assert!(!ui.is_metric());
    assert!(ui.core().is_power_on());
}

#[test]
fn overspeed_raises_backlog_panic() {
    let sim = SimulationConfig {
        max_step_rate_hz: 1_000,
        power_on_at_start: true,
    };
    let mut ui = session(sim);
    let alarm = ui.backlog_alarm();
    replay(&mut ui, "feed_thread,rpm:1000", 0);
    assert!(ui.core().is_backlogged());
    alarm.panic_step_backlog();
    replay(&mut ui, "", 2);
    assert_eq!(ui.panel().frame(), "[TOO FAST]");
}

#[test]
fn backlog_panic_raised_again_after_operator_reset() {
    let sim = SimulationConfig {
        max_step_rate_hz: 1_000,
        power_on_at_start: true,
    };
    let mut ui = session(sim);
    let alarm = ui.backlog_alarm();
    let mut monitor = BacklogMonitor::default();
    let mut raised = 0;
    let steps = parse_key_script("feed_thread,rpm:1000,,,rpm:0,power,power,,rpm:1000,,").unwrap();
    for step in &steps {
        if let Some(rpm) = step.rpm {
            ui.core_mut().set_spindle_rpm(rpm);
        }
        ui.panel_mut().press(step.keys);
        if monitor.poll(ui.core(), &alarm) {
            raised += 1;
        }
        ui.tick();
    }
    assert_eq!(raised, 2);
    assert_eq!(ui.panel().frame(), "[TOO FAST]");
}
