//! Behavior shared by every narrative node.

use microscope_core::action::{ActionId, ActionKind, ActionRef};
use serde::{Deserialize, Serialize};

/// Whether a node is hopeful or grim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Hopeful, uplifting.
    Light,
    /// Grim, tragic.
    Dark,
}

impl Tone {
    /// Upper-case label used in rendered output.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "LIGHT",
            Self::Dark => "DARK",
        }
    }
}

/// Read access common to periods, events, and scenes.
pub trait Action {
    /// The node identifier.
    fn id(&self) -> ActionId;

    /// Which kind of node this is.
    fn kind(&self) -> ActionKind;

    /// The node's tone.
    fn tone(&self) -> Tone;

    /// Display name. For scenes, the question.
    fn name(&self) -> &str;

    /// Free-text descriptions in the order they were added.
    fn descriptions(&self) -> &[String];

    /// Index of the round this node is attached to.
    fn round(&self) -> usize;

    /// The reference a round holds for this node.
    fn action_ref(&self) -> ActionRef {
        ActionRef {
            id: self.id(),
            kind: self.kind(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_round_trips_lowercase() {
        assert_eq!(serde_json::to_value(Tone::Dark).unwrap(), "dark");
        let tone: Tone = serde_json::from_value(serde_json::json!("light")).unwrap();
        assert_eq!(tone, Tone::Light);
    }

    #[test]
    fn test_tone_label() {
        assert_eq!(Tone::Light.label(), "LIGHT");
        assert_eq!(Tone::Dark.label(), "DARK");
    }
}
