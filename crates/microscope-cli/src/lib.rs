//! Microscope — command-line chronicle compiler.
//!
//! Reads an authoring script, compiles it into a game, and writes the
//! chronicle export as JSON under the configured output directory.

pub mod config;
pub mod error;

use std::fs;
use std::path::PathBuf;

use microscope_content::ingest_script;
use microscope_core::clock::Clock;
use microscope_game::export_chronicle;
use tracing::info;

use crate::config::Config;
use crate::error::AppError;

/// Compiles the configured script and writes its chronicle.
///
/// Returns the path of the written document.
///
/// # Errors
///
/// Returns `AppError::Io` if the script cannot be read or the chronicle
/// cannot be written, `AppError::Content` if the script is invalid,
/// `AppError::Config` if the game name cannot name an output directory, and
/// `AppError::Serialization` if the export cannot be encoded.
pub fn run(config: &Config, clock: &dyn Clock) -> Result<PathBuf, AppError> {
    let source = fs::read_to_string(&config.script_path)?;
    let ingested = ingest_script(&source)?;
    let game = ingested.compile()?;

    let export = export_chronicle(&game, Some(ingested.version_hash), clock);
    let json = export.to_json()?;

    let path = config.chronicle_path(game.name())?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, json)?;

    info!(game = %game.name(), path = %path.display(), "chronicle written");
    Ok(path)
}
