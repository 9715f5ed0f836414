//! Authoring script schema.
//!
//! A script mirrors the builder calls of one authoring pass: a setup block,
//! an ordered list of rounds directives, and the period outline.

use microscope_narrative::Tone;
use serde::Deserialize;

use crate::error::ContentError;

/// A complete authoring script.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// The game's title.
    pub name: String,
    /// Roster and palette.
    #[serde(default)]
    pub setup: Option<SetupSpec>,
    /// Rounds directives in authoring order.
    #[serde(default)]
    pub rounds: Option<Vec<RoundDirective>>,
    /// Top-level periods in authoring order.
    #[serde(default)]
    pub periods: Vec<PeriodSpec>,
}

/// The setup block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetupSpec {
    /// Players in roster order.
    #[serde(default)]
    pub players: Vec<PlayerSpec>,
    /// The palette, if any.
    #[serde(default)]
    pub palette: Option<PaletteSpec>,
}

/// One player registration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlayerSpec {
    /// Unique name.
    pub name: String,
    /// Contact address.
    pub email: String,
}

/// Palette statements.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteSpec {
    /// Permitted content.
    #[serde(default)]
    pub permitted: Vec<String>,
    /// Forbidden content.
    #[serde(default)]
    pub forbidden: Vec<String>,
}

/// Highest round index a script may name. Every round up to the highest
/// index used is materialized.
pub const MAX_ROUND: usize = 10_000;

/// One step of the rounds block.
///
/// Each list item is a map with exactly one directive key.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawDirective")]
pub enum RoundDirective {
    /// Set a new focus.
    Focus {
        /// The focus change.
        focus: FocusSpec,
    },
    /// Assign a legacy.
    Legacy {
        /// The legacy change.
        legacy: LegacySpec,
    },
    /// Append a round with an explicit lens and active player.
    Round {
        /// The round's players.
        round: RoundSpec,
    },
    /// Materialize every round up to and including this index.
    Materialize {
        /// The last round index to materialize.
        materialize: usize,
    },
}

/// Wire shape of a directive before the single-key check.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDirective {
    #[serde(default)]
    focus: Option<FocusSpec>,
    #[serde(default)]
    legacy: Option<LegacySpec>,
    #[serde(default)]
    round: Option<RoundSpec>,
    #[serde(default)]
    materialize: Option<usize>,
}

impl TryFrom<RawDirective> for RoundDirective {
    type Error = String;

    fn try_from(raw: RawDirective) -> Result<Self, Self::Error> {
        let mut found = Vec::with_capacity(1);
        if let Some(focus) = raw.focus {
            found.push(Self::Focus { focus });
        }
        if let Some(legacy) = raw.legacy {
            found.push(Self::Legacy { legacy });
        }
        if let Some(round) = raw.round {
            found.push(Self::Round { round });
        }
        if let Some(materialize) = raw.materialize {
            found.push(Self::Materialize { materialize });
        }

        match (found.pop(), found.len()) {
            (Some(directive), 0) => Ok(directive),
            (Some(_), rest) => Err(format!(
                "rounds directive has {} keys; put each directive in its own list item",
                rest + 1
            )),
            (None, _) => Err(
                "rounds directive needs one of: focus, legacy, round, materialize".to_owned(),
            ),
        }
    }
}

impl Script {
    /// Checks that every player named in the rounds block is registered and
    /// that every round index is within [`MAX_ROUND`].
    ///
    /// # Errors
    ///
    /// Returns `ContentError::UnknownPlayer` for the first unregistered name,
    /// or `ContentError::RoundOutOfRange` for the first index above the cap.
    pub fn validate(&self) -> Result<(), ContentError> {
        let registered: Vec<&str> = self
            .setup
            .iter()
            .flat_map(|s| s.players.iter().map(|p| p.name.as_str()))
            .collect();

        for directive in self.rounds.iter().flatten() {
            let named: [Option<&String>; 2] = match directive {
                RoundDirective::Focus { focus } => [focus.lens.as_ref(), None],
                RoundDirective::Legacy { legacy } => [legacy.player.as_ref(), None],
                RoundDirective::Round { round } => [round.lens.as_ref(), round.player.as_ref()],
                RoundDirective::Materialize { materialize } => {
                    check_round(*materialize)?;
                    [None, None]
                }
            };
            if let Some(unknown) = named
                .into_iter()
                .flatten()
                .find(|name| !registered.contains(&name.as_str()))
            {
                return Err(ContentError::UnknownPlayer(unknown.clone()));
            }
        }

        for period in &self.periods {
            check_round(period.round)?;
            for event in &period.events {
                check_round(event.round)?;
                for scene in &event.scenes {
                    check_round(scene.round)?;
                }
            }
        }
        Ok(())
    }
}

fn check_round(round: usize) -> Result<(), ContentError> {
    if round > MAX_ROUND {
        return Err(ContentError::RoundOutOfRange {
            round,
            max: MAX_ROUND,
        });
    }
    Ok(())
}
