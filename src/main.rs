//! `ProximityMonitor` - Live distance display for a networked ultrasonic sensor
//!
//! Polls the sensor once per second and shows how close the nearest object
//! is, either in a status window or as status lines on the console.

#![expect(
    missing_docs,
    reason = "Slint-generated code from include_modules! lacks doc comments"
)]
#![allow(clippy::unwrap_used)] // Slint-generated code from include_modules! uses .unwrap() extensively

// GUI module is only in the binary, not the library
mod gui;

use anyhow::{Context, Result};
use clap::Parser;
use gui::GuiController;
use parking_lot::Mutex;
use proximity_monitor::{
    config::{AppConfig, ConfigManager},
    controller::DisplayController,
    display::ConsoleSurface,
    error::get_user_friendly_error,
    monitor::{DistanceMonitor, HttpDistanceSource, POLL_INTERVAL, SensorEvent},
    utils::{self, LogTarget},
};
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use tracing::{error, info, warn};

// Include Slint-generated code
slint::include_modules!();

/// Capacity of the monitor-to-controller channel
const EVENT_CHANNEL_CAPACITY: usize = 32;

#[derive(Parser)]
#[command(name = "proximity-monitor")]
#[command(about = "Shows how close the nearest object to a networked distance sensor is")]
#[command(version)]
struct Cli {
    /// Sensor URL to poll (overrides the configuration file)
    #[arg(long, env = "PROXIMITY_MONITOR_ENDPOINT")]
    endpoint: Option<String>,

    /// Print status lines instead of opening a window
    #[arg(long)]
    headless: bool,

    /// Base directory for configuration and logs
    #[arg(long, env = "PROXIMITY_MONITOR_HOME")]
    config_dir: Option<PathBuf>,

    /// Log to stderr instead of app.log
    #[arg(long)]
    log_stderr: bool,
}

/// Main entry point for the application
///
/// Initializes logging and configuration, starts the distance monitor and
/// display controller threads, then runs the chosen surface.
fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(dir) = cli.config_dir.clone() {
        ConfigManager::set_base_dir(dir);
    }

    let log_target = if cli.log_stderr || cli.headless {
        LogTarget::Stderr
    } else {
        LogTarget::File
    };
    utils::init_logging(log_target).context("Failed to initialize logging system")?;

    let config = load_config(&cli).context("Failed to load application configuration")?;
    info!(
        "Polling {} every {:?} (request timeout {:?})",
        config.endpoint,
        POLL_INTERVAL,
        config.request_timeout()
    );

    let source = match HttpDistanceSource::new(&config.endpoint, config.request_timeout()) {
        Ok(source) => source,
        Err(e) => {
            error!("Failed to create sensor client: {}", e);
            show_error_and_exit(&get_user_friendly_error(&e));
            return Err(e.into());
        }
    };

    let (event_tx, event_rx) = mpsc::sync_channel::<SensorEvent>(EVENT_CHANNEL_CAPACITY);
    let monitor = DistanceMonitor::new(POLL_INTERVAL, source, event_tx);

    if cli.headless {
        run_headless(monitor, event_rx);
    } else {
        run_window(&config, monitor, event_rx)?;
    }

    info!("Proximity monitor shutting down");
    Ok(())
}

/// Load the configuration file and apply command-line overrides
fn load_config(cli: &Cli) -> Result<AppConfig> {
    if ConfigManager::write_default_if_missing()? {
        info!(
            "Wrote default configuration to {}",
            ConfigManager::get_config_path().display()
        );
    }

    let mut config = ConfigManager::load()?;
    if let Some(endpoint) = &cli.endpoint {
        config.endpoint.clone_from(endpoint);
        config.validate();
    }
    Ok(config)
}

/// Run with a console surface until the process is killed
fn run_headless(
    monitor: DistanceMonitor<HttpDistanceSource>,
    event_rx: mpsc::Receiver<SensorEvent>,
) {
    info!("Running headless");
    let mut controller = DisplayController::new(event_rx, Box::new(ConsoleSurface::stdout()));

    info!("Starting distance monitor thread");
    let _monitor_handle = monitor.start();

    controller.run();
}

/// Run with the status window until it is closed
fn run_window(
    config: &AppConfig,
    monitor: DistanceMonitor<HttpDistanceSource>,
    event_rx: mpsc::Receiver<SensorEvent>,
) -> Result<()> {
    info!("Creating GUI controller");
    let gui_controller = match GuiController::new(&config.window_state) {
        Ok(gui) => gui,
        Err(e) => {
            error!("Failed to create main window: {}", e);
            show_error_and_exit(&get_user_friendly_error(&e));
            return Err(e.into());
        }
    };

    let controller = Arc::new(Mutex::new(DisplayController::new(
        event_rx,
        Box::new(gui_controller.surface()),
    )));

    info!("Starting display controller thread");
    let _controller_handle = DisplayController::spawn_event_loop(Arc::clone(&controller));

    info!("Starting distance monitor thread");
    let _monitor_handle = monitor.start();

    info!("Starting GUI event loop");
    gui_controller
        .run()
        .context("GUI event loop terminated with error")?;

    let stats = controller.lock().stats();
    info!(
        "Session summary: {} readings, {} skipped ticks, {} redraws",
        stats.readings, stats.skipped, stats.applied
    );

    let mut updated = config.clone();
    updated.window_state = gui_controller.window_state();
    if updated != *config {
        if let Err(e) = ConfigManager::save(&updated) {
            warn!("Failed to save window state: {}", e);
        }
    }

    Ok(())
}

/// Shows an error and exits the application.
fn show_error_and_exit(message: &str) {
    eprintln!("ERROR: {message}");
    std::process::exit(1);
}
