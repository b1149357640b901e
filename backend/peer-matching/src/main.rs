use anyhow::Context;
use peer_matching::{Config, Simulation};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    // Load config
    let config = Config::from_env().context("Failed to load config")?;

    info!(
        "Starting {} simulation: {} users, {} iterations",
        config.service.service_name, config.simulation.users, config.simulation.iterations
    );

    let report = Simulation::new(config.simulation).run();

    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
