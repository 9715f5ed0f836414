//! Query handlers for the Game context.
//!
//! This module builds the read-only views a renderer consumes. Views own
//! their data, so a renderer never borrows the model while it works.

use microscope_core::player::Player;
use microscope_narrative::Period;
use microscope_setup::Palette;
use microscope_timeline::{Legacies, TimelineEntry};
use serde::Serialize;

use crate::domain::aggregates::GameModel;

/// Read-only view of a finished game.
#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    /// The game's title.
    pub name: String,
    /// Registered players in roster order.
    pub players: Vec<Player>,
    /// The palette, if one was built.
    pub palette: Option<Palette>,
    /// Every focus in chronological order.
    pub foci: Vec<String>,
    /// The current player → legacy mapping.
    pub legacies: Legacies,
    /// Rounds and change markers in authoring order.
    pub timeline: Vec<TimelineEntry>,
    /// Periods with their nested events and scenes.
    pub periods: Vec<Period>,
}

/// Builds the renderer view of `game`.
#[must_use]
pub fn get_game_view(game: &GameModel) -> GameView {
    GameView {
        name: game.name().to_owned(),
        players: game.players().to_vec(),
        palette: game.palette().cloned(),
        foci: game.foci().to_vec(),
        legacies: game.legacies().cloned().unwrap_or_default(),
        timeline: game.entries().to_vec(),
        periods: game.periods().to_vec(),
    }
}
