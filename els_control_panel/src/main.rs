//! # ELS Control Panel
//!
//! Runs the panel control loop at the panel refresh rate against a
//! simulated motion core and a headless panel that logs every frame.
//!
//! ```bash
//! # Power is on at start; switch to metric, step the feed up twice
//! els_control_panel --config config/els.toml --ticks 400 --keys ",in_mm,up,up"
//!
//! # Spin the spindle up on tick 3 and watch the keys get ignored
//! els_control_panel --ticks 300 --keys ",,rpm:400,power,fwd_rev" -v
//! ```

use clap::Parser;
use els_common::config::ConfigError;
use els_common::consts::UI_REFRESH_RATE_HZ;
use els_control_panel::catalog::{FeedTableCatalog, GearTableCatalog};
use els_control_panel::config::{ElsConfig, load_config};
use els_control_panel::control::PanelControlLoop;
use els_control_panel::sim::{BacklogMonitor, ScriptedPanel, SimulatedCore, parse_key_script};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{Level, error, info, warn};
use tracing_subscriber::EnvFilter;

/// ELS Control Panel: leadscrew panel decision loop (simulated hardware)
#[derive(Parser, Debug)]
#[command(name = "els_control_panel")]
#[command(version)]
#[command(about = "Electronic leadscrew control panel loop with simulated motion core")]
struct Args {
    /// Path to the configuration TOML.
    #[arg(short, long, default_value = "config/els.toml")]
    config: PathBuf,

    /// Stop after this many ticks (default: run until Ctrl-C).
    #[arg(long)]
    ticks: Option<u64>,

    /// Spindle speed at start.
    #[arg(long, default_value_t = 0)]
    rpm: u16,

    /// Key script, one comma-separated entry per tick (e.g. "power,,up+fwd_rev,rpm:300").
    #[arg(long, default_value = "")]
    keys: String,

    /// Enable verbose logging (DEBUG level).
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    let config = load_config(&args.config);

    let level = if args.verbose {
        Level::DEBUG
    } else {
        config
            .as_ref()
            .map_or(Level::INFO, |c| c.shared.log_level.into())
    };
    setup_tracing(level, args.json);

    info!("ELS Control Panel v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args, config) {
        error!("FATAL: {e}");
        process::exit(1);
    }

    info!("ELS Control Panel shutdown complete");
}

fn run(
    args: &Args,
    config: Result<ElsConfig, ConfigError>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = config.map_err(|e| format!("{}: {e}", args.config.display()))?;
    info!(
        service = %config.shared.service_name,
        leadscrew = ?config.machine.leadscrew,
        "config OK"
    );

    let feeds = FeedTableCatalog::new(&config.machine)?;
    let gears = GearTableCatalog::new()?;
    let script = parse_key_script(&args.keys)?;

    let mut core = SimulatedCore::new(&config.machine, &config.simulation);
    core.set_spindle_rpm(args.rpm);
    let mut ui = PanelControlLoop::new(core, ScriptedPanel::default(), feeds, gears, config.panel);
    let alarm = ui.backlog_alarm();

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    })?;

    let period = Duration::from_micros(1_000_000 / UI_REFRESH_RATE_HZ as u64);
    let mut next_wake = Instant::now();
    let mut backlog = BacklogMonitor::default();
    let mut tick: u64 = 0;

    while running.load(Ordering::SeqCst) && args.ticks.is_none_or(|n| tick < n) {
        if let Some(step) = script.get(tick as usize) {
            if let Some(rpm) = step.rpm {
                ui.core_mut().set_spindle_rpm(rpm);
            }
            ui.panel_mut().press(step.keys);
        }

        // The real motion core raises this from its own pulse path.
        backlog.poll(ui.core(), &alarm);

        ui.tick();
        tick += 1;

        next_wake += period;
        let now = Instant::now();
        if next_wake > now {
            std::thread::sleep(next_wake - now);
        } else {
            warn!(tick, late_us = (now - next_wake).as_micros() as u64, "tick overrun");
            next_wake = now;
        }
    }

    info!(
        ticks = tick,
        refreshes = ui.panel().refreshes(),
        frame = ui.panel().frame(),
        "loop stopped"
    );
    Ok(())
}

fn setup_tracing(level: Level, json: bool) {
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .init();
    }
}
