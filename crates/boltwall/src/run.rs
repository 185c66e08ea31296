use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config;

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(cli: Cli) -> Result<()> {
    let file_overrides = match cli.config.as_deref() {
        Some(path) => Some(config::load_overrides(path)?),
        None => None,
    };
    let tuning = config::resolve(cli.overrides(), file_overrides);

    tracing::info!(
        hue = tuning.hue,
        x_offset = tuning.x_offset,
        speed = tuning.speed,
        intensity = tuning.intensity,
        size = tuning.size,
        width = cli.window_size.0,
        height = cli.window_size.1,
        "starting lightning background"
    );

    renderer::window::run(tuning, cli.window_size)
}
