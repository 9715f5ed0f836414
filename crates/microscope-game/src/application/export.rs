//! Chronicle export: a timestamped JSON document of a finished game.

use chrono::{DateTime, Utc};
use microscope_core::clock::Clock;
use serde::Serialize;

use crate::application::query_handlers::{GameView, get_game_view};
use crate::domain::aggregates::GameModel;

/// The exported document handed to renderers.
#[derive(Debug, Clone, Serialize)]
pub struct ChronicleExport {
    /// When the export was produced.
    pub generated_at: DateTime<Utc>,
    /// Hash of the authoring source, when the game came from a script.
    pub version_hash: Option<String>,
    /// The game itself.
    pub game: GameView,
}

impl ChronicleExport {
    /// Serializes the export as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Builds the export document for `game`, stamped with `clock`.
#[must_use]
pub fn export_chronicle(
    game: &GameModel,
    version_hash: Option<String>,
    clock: &dyn Clock,
) -> ChronicleExport {
    ChronicleExport {
        generated_at: clock.now(),
        version_hash,
        game: get_game_view(game),
    }
}
