//! Microscope chronicle compiler entry point.

use std::error::Error;

use microscope_cli::config::Config;
use microscope_core::clock::SystemClock;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = Config::from_env()?;
    tracing::info!(script = %config.script_path.display(), "compiling chronicle");

    let path = microscope_cli::run(&config, &SystemClock)?;
    println!("{}", path.display());

    Ok(())
}
