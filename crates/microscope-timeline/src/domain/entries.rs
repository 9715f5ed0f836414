//! Timeline entries: rounds and the change markers interleaved with them.

use microscope_core::action::{ActionId, ActionRef};
use microscope_core::player::Player;
use serde::Serialize;

/// A legacy thread held by one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyEntry {
    /// The player holding the legacy.
    pub player: Player,
    /// The legacy text.
    pub legacy: String,
}

/// Player → legacy mapping, ordered by first assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Legacies {
    entries: Vec<LegacyEntry>,
}

impl Legacies {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns `legacy` to `player`, replacing any earlier legacy in place.
    pub fn set(&mut self, player: Player, legacy: impl Into<String>) {
        let legacy = legacy.into();
        match self.entries.iter_mut().find(|e| e.player.is(&player)) {
            Some(entry) => entry.legacy = legacy,
            None => self.entries.push(LegacyEntry { player, legacy }),
        }
    }

    /// Returns the legacy held by `player`.
    #[must_use]
    pub fn get(&self, player: &Player) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.player.is(player))
            .map(|e| e.legacy.as_str())
    }

    /// Iterates entries in assignment order.
    pub fn iter(&self) -> impl Iterator<Item = &LegacyEntry> {
        self.entries.iter()
    }

    /// Number of players holding a legacy.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no legacy has been assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One round of play.
///
/// Lens, active player, focus, and legacies are fixed when the round is
/// materialized. Only the attached action list grows afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    index: usize,
    lens: Option<Player>,
    player: Option<Player>,
    focus: String,
    legacies: Legacies,
    actions: Vec<ActionRef>,
}

impl Round {
    /// The implicit pre-game round at index 0.
    pub(crate) fn implicit() -> Self {
        Self {
            index: 0,
            lens: None,
            player: None,
            focus: String::new(),
            legacies: Legacies::new(),
            actions: Vec::new(),
        }
    }

    pub(crate) fn new(
        index: usize,
        lens: Player,
        player: Player,
        focus: String,
        legacies: Legacies,
    ) -> Self {
        Self {
            index,
            lens: Some(lens),
            player: Some(player),
            focus,
            legacies,
            actions: Vec::new(),
        }
    }

    pub(crate) fn attach(&mut self, action: ActionRef) {
        self.actions.push(action);
    }

    pub(crate) fn detach(&mut self, id: ActionId) -> bool {
        let before = self.actions.len();
        self.actions.retain(|action| action.id != id);
        self.actions.len() != before
    }

    /// Position among rounds; 0 is the implicit pre-game round.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The lens framing this round. `None` only for round 0.
    #[must_use]
    pub fn lens(&self) -> Option<&Player> {
        self.lens.as_ref()
    }

    /// The active player. `None` only for round 0.
    #[must_use]
    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// Focus in effect when the round was materialized.
    #[must_use]
    pub fn focus(&self) -> &str {
        &self.focus
    }

    /// Legacies in effect when the round was materialized.
    #[must_use]
    pub fn legacies(&self) -> &Legacies {
        &self.legacies
    }

    /// Narrative nodes attached to this round, in attachment order.
    #[must_use]
    pub fn actions(&self) -> &[ActionRef] {
        &self.actions
    }

    /// Returns `true` for the implicit pre-game round.
    #[must_use]
    pub fn is_implicit(&self) -> bool {
        self.index == 0
    }
}

/// Marker recording a new focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FocusChange {
    /// The lens who set the focus, if recorded.
    pub lens: Option<Player>,
    /// The new focus.
    pub focus: String,
}

/// Marker recording a legacy assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyChange {
    /// The player receiving the legacy, if recorded.
    pub player: Option<Player>,
    /// The legacy text.
    pub legacy: String,
}

/// One entry of the timeline, in authoring order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineEntry {
    /// A round of play.
    Round(Round),
    /// The focus changed.
    FocusChange(FocusChange),
    /// A legacy was assigned.
    LegacyChange(LegacyChange),
}

impl TimelineEntry {
    /// Returns the round if this entry is one.
    #[must_use]
    pub fn as_round(&self) -> Option<&Round> {
        match self {
            Self::Round(round) => Some(round),
            Self::FocusChange(_) | Self::LegacyChange(_) => None,
        }
    }

    pub(crate) fn as_round_mut(&mut self) -> Option<&mut Round> {
        match self {
            Self::Round(round) => Some(round),
            Self::FocusChange(_) | Self::LegacyChange(_) => None,
        }
    }
}
