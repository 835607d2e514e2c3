//! Simulated distance sensor
//!
//! Serves scripted readings over HTTP exactly like the sensor device, so the
//! monitor can be developed and demonstrated without hardware.

use anyhow::{Context, Result};
use clap::Parser;
use proximity_monitor::sensor::{DistanceScript, SensorSimulator};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sensor-sim")]
#[command(about = "Serves simulated distance readings over HTTP")]
#[command(version)]
struct Cli {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:1234")]
    bind: String,

    /// Distances in centimeters to cycle through
    #[arg(long, value_delimiter = ',', default_values_t = [5.0, 20.0, 100.0])]
    distances: Vec<f64>,

    /// Sweep an object across the full range instead (step in centimeters)
    #[arg(long, conflicts_with = "distances")]
    sweep: Option<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let script = match cli.sweep {
        Some(step_cm) => DistanceScript::Sweep { step_cm },
        None => DistanceScript::distances(cli.distances),
    };
    info!("Serving {:?}", script);

    let mut simulator = SensorSimulator::bind(cli.bind.as_str(), script)
        .with_context(|| format!("Failed to bind {}", cli.bind))?;
    info!("Simulated sensor at {}", simulator.endpoint()?);

    loop {
        if let Err(e) = simulator.serve_one() {
            tracing::warn!("Request failed: {}", e);
        }
    }
}
