//! Command handlers for the Content Authoring context.
//!
//! Ingestion parses and validates a script and fingerprints its source.
//! Compilation replays the script through the game builder in document
//! order: setup, rounds directives, then periods depth-first.

use microscope_core::error::DomainError;
use microscope_game::{GameModel, build_game};
use microscope_narrative::PeriodBuilder;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::domain::script::{EventSpec, PeriodSpec, RoundDirective, Script};
use crate::error::ContentError;

/// A parsed, validated script and the hash of its source text.
#[derive(Debug, Clone)]
pub struct IngestedScript {
    /// The parsed script.
    pub script: Script,
    /// Hex SHA-256 of the source text.
    pub version_hash: String,
}

impl IngestedScript {
    /// Compiles the script into a game model.
    ///
    /// # Errors
    ///
    /// See [`compile_script`].
    pub fn compile(&self) -> Result<GameModel, ContentError> {
        compile_script(&self.script)
    }
}

/// Parses and validates an authoring script.
///
/// # Errors
///
/// Returns `ContentError::Parse` if the source is not a valid script.
/// Returns `ContentError::UnknownPlayer` if the rounds block names an
/// unregistered player, or `ContentError::RoundOutOfRange` if a round index
/// exceeds [`MAX_ROUND`](crate::domain::script::MAX_ROUND).
pub fn ingest_script(source: &str) -> Result<IngestedScript, ContentError> {
    let script: Script = serde_yaml::from_str(source)?;
    script.validate()?;
    let version_hash = format!("{:x}", Sha256::digest(source.as_bytes()));
    info!(script = %script.name, version_hash = %version_hash, "script ingested");
    Ok(IngestedScript {
        script,
        version_hash,
    })
}

/// Builds a game model from a script.
///
/// # Errors
///
/// Returns `ContentError::UnknownPlayer` or `ContentError::RoundOutOfRange`
/// if validation fails, or `ContentError::Domain` if a builder call rejects the content.
pub fn compile_script(script: &Script) -> Result<GameModel, ContentError> {
    script.validate()?;

    let game = build_game(script.name.as_str(), |game| {
        if let Some(setup) = &script.setup {
            game.setup(|builder| {
                for player in &setup.players {
                    builder.player(player.name.as_str(), player.email.as_str());
                }
                if let Some(palette) = &setup.palette {
                    builder.palette(|p| {
                        palette.permitted.iter().for_each(|item| p.yes(item.as_str()));
                        palette.forbidden.iter().for_each(|item| p.no(item.as_str()));
                    });
                }
                Ok(())
            })?;
        }

        if let Some(directives) = &script.rounds {
            game.rounds(|rounds| {
                for directive in directives {
                    match directive {
                        RoundDirective::Focus { focus } => {
                            let lens = focus.lens.as_deref().and_then(|n| rounds.player(n));
                            rounds.focus(lens, focus.text.as_str());
                        }
                        RoundDirective::Legacy { legacy } => {
                            let player = legacy.player.as_deref().and_then(|n| rounds.player(n));
                            rounds.legacy(player, legacy.text.as_str());
                        }
                        RoundDirective::Round { round } => {
                            let lens = round.lens.as_deref().and_then(|n| rounds.player(n));
                            let player = round.player.as_deref().and_then(|n| rounds.player(n));
                            rounds.add_round(lens, player)?;
                        }
                        RoundDirective::Materialize { materialize } => {
                            rounds.materialize_through(*materialize)?;
                        }
                    }
                }
                Ok(())
            })?;
        }

        for period in &script.periods {
            compile_period(game, period)?;
        }
        Ok(())
    })?;

    debug!(periods = game.periods().len(), "script compiled");
    Ok(game)
}

fn compile_period(game: &mut GameModel, period: &PeriodSpec) -> Result<(), DomainError> {
    game.period(period.name.as_str(), period.tone, period.round, |builder| {
        for text in &period.descriptions {
            builder.description(text.as_str());
        }
        for event in &period.events {
            compile_event(builder, event)?;
        }
        Ok(())
    })?;
    Ok(())
}

fn compile_event(period: &mut PeriodBuilder<'_>, event: &EventSpec) -> Result<(), DomainError> {
    period.event(event.name.as_str(), event.tone, event.round, |builder| {
        for text in &event.descriptions {
            builder.description(text.as_str());
        }
        for scene in &event.scenes {
            builder.scene(
                scene.question.as_str(),
                scene.setting.as_str(),
                scene.answer.as_str(),
                scene.tone,
                scene.round,
                |s| {
                    for text in &scene.descriptions {
                        s.description(text.as_str());
                    }
                    Ok(())
                },
            )?;
        }
        Ok(())
    })?;
    Ok(())
}
