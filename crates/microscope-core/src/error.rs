//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Every variant is a structural authoring mistake, raised synchronously by
/// the offending builder call and fatal to the construction pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A one-shot block ran twice, or a component was used before it exists.
    #[error("sequence error: {0}")]
    Sequence(String),

    /// A builder call received an argument it cannot accept.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Lens rotation was requested with an empty player roster.
    #[error("missing players: rotation requires at least one player")]
    MissingPlayers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_error_display_includes_message() {
        let err = DomainError::Sequence("only one setup block allowed".to_owned());
        assert_eq!(
            err.to_string(),
            "sequence error: only one setup block allowed"
        );
    }

    #[test]
    fn test_missing_players_display() {
        assert_eq!(
            DomainError::MissingPlayers.to_string(),
            "missing players: rotation requires at least one player"
        );
    }
}
