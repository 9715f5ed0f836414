//! Microscope CLI error types.

use microscope_content::ContentError;
use thiserror::Error;

/// Startup and runtime errors for the `microscope` binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading the script or writing the chronicle failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The script could not be ingested or compiled.
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    /// The chronicle could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
