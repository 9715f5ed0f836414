//! Aggregate root for the Setup context.

use microscope_core::player::Player;
use tracing::{debug, warn};

use super::palette::Palette;

/// Player roster and palette, built once per game.
#[derive(Debug, Clone, Default)]
pub struct Setup {
    /// Registered players in registration order.
    players: Vec<Player>,
    /// The agreed palette, if one was built.
    palette: Option<Palette>,
}

impl Setup {
    /// Creates an empty setup.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a player and returns the registered value.
    ///
    /// Names are unique: registering a name again replaces that player's
    /// email and keeps its roster position.
    pub fn player(&mut self, name: impl Into<String>, email: impl Into<String>) -> Player {
        let player = Player::new(name, email);
        if let Some(existing) = self.players.iter_mut().find(|p| p.is(&player)) {
            warn!(player = %player.name, "player re-registered, replacing email");
            existing.email.clone_from(&player.email);
        } else {
            debug!(player = %player.name, "player registered");
            self.players.push(player.clone());
        }
        player
    }

    /// Builds the palette. A later call replaces the earlier palette.
    pub fn palette<F>(&mut self, build: F)
    where
        F: FnOnce(&mut Palette),
    {
        let mut palette = Palette::new();
        build(&mut palette);
        if self.palette.is_some() {
            warn!("palette rebuilt, replacing the previous one");
        }
        self.palette = Some(palette);
    }

    /// The ordered player roster.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Looks up a registered player by name.
    #[must_use]
    pub fn player_named(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// The palette, if one was built.
    #[must_use]
    pub fn current_palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }
}
