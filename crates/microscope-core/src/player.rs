//! Player value type.

use serde::{Deserialize, Serialize};

/// A registered participant. The name is the player's identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Unique display name.
    pub name: String,
    /// Contact address.
    pub email: String,
}

impl Player {
    /// Creates a new player.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Returns `true` if both values name the same player.
    #[must_use]
    pub fn is(&self, other: &Player) -> bool {
        self.name == other.name
    }
}
