//! Content authoring error types.

use microscope_core::error::DomainError;
use thiserror::Error;

/// Errors raised while ingesting or compiling an authoring script.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The script is not valid YAML or does not match the script schema.
    #[error("script parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The script references a player that setup never registers.
    #[error("unknown player: {0}")]
    UnknownPlayer(String),

    /// The script names a round beyond the supported range.
    #[error("round {round} is out of range (maximum {max})")]
    RoundOutOfRange {
        /// The requested round index.
        round: usize,
        /// The highest allowed index.
        max: usize,
    },

    /// A builder call rejected the script's content.
    #[error(transparent)]
    Domain(#[from] DomainError),
}
