//! Aggregate root for the Game context.

use microscope_core::action::ActionId;
use microscope_core::error::DomainError;
use microscope_core::player::Player;
use microscope_narrative::{ActionNode, NarrativeTree, Period, PeriodBuilder, Tone};
use microscope_setup::{Palette, Setup};
use microscope_timeline::{Legacies, Round, RoundTimeline, TimelineEntry};
use tracing::{info, info_span};

/// Builds a game in one authoring pass.
///
/// `configure` runs against the new, empty model. The first error it
/// returns aborts construction.
///
/// # Errors
///
/// Returns whatever `DomainError` `configure` propagates.
pub fn build_game<F>(name: impl Into<String>, configure: F) -> Result<GameModel, DomainError>
where
    F: FnOnce(&mut GameModel) -> Result<(), DomainError>,
{
    let mut game = GameModel::new(name);
    let span = info_span!("build_game", game = %game.name);
    let _guard = span.enter();

    configure(&mut game)?;

    info!(
        periods = game.periods().len(),
        entries = game.entries().len(),
        "game built"
    );
    Ok(game)
}

/// The complete record of one game.
///
/// Setup and the round timeline are each built exactly once. Narrative
/// periods are added afterwards, each attached to a timeline round.
#[derive(Debug, Clone)]
pub struct GameModel {
    /// The game's title.
    name: String,
    /// Roster and palette, once the setup block has run.
    setup: Option<Setup>,
    /// Round timeline, once the rounds block has run.
    timeline: Option<RoundTimeline>,
    /// All periods and their nested content.
    narrative: NarrativeTree,
}

impl GameModel {
    /// Creates an empty game.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            setup: None,
            timeline: None,
            narrative: NarrativeTree::new(),
        }
    }

    /// Runs the setup block.
    ///
    /// If the rounds block already ran, the completed roster is bound to its
    /// timeline.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Sequence` if setup already ran, or any error
    /// from `build`.
    pub fn setup<F>(&mut self, build: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut Setup) -> Result<(), DomainError>,
    {
        if self.setup.is_some() {
            return Err(DomainError::Sequence(
                "only one setup block allowed".to_owned(),
            ));
        }

        let mut setup = Setup::new();
        build(&mut setup)?;

        if let Some(timeline) = self.timeline.as_mut() {
            timeline.bind_roster(setup.players().to_vec())?;
        }
        info!(players = setup.players().len(), "setup complete");
        self.setup = Some(setup);
        Ok(())
    }

    /// Runs the rounds block.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Sequence` if the rounds block already ran, or
    /// any error from `build`.
    pub fn rounds<F>(&mut self, build: F) -> Result<(), DomainError>
    where
        F: FnOnce(&mut RoundTimeline) -> Result<(), DomainError>,
    {
        if self.timeline.is_some() {
            return Err(DomainError::Sequence(
                "only one rounds block allowed".to_owned(),
            ));
        }

        let roster = self.setup.as_ref().map(|s| s.players().to_vec());
        let mut timeline = RoundTimeline::new(roster);
        build(&mut timeline)?;

        info!(entries = timeline.entries().len(), "rounds block complete");
        self.timeline = Some(timeline);
        Ok(())
    }

    /// Returns round `index`, materializing it first if needed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Sequence` before the rounds block has run, or
    /// any error from materializing the round.
    pub fn round(&mut self, index: usize) -> Result<&Round, DomainError> {
        self.timeline_mut()?.get(index)
    }

    /// Creates a top-level period attached to `round`, then runs `build`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Sequence` before the rounds block has run, or
    /// any error from resolving the round or from `build`.
    pub fn period<F>(
        &mut self,
        name: impl Into<String>,
        tone: Tone,
        round: usize,
        build: F,
    ) -> Result<ActionId, DomainError>
    where
        F: FnOnce(&mut PeriodBuilder<'_>) -> Result<(), DomainError>,
    {
        let timeline = self.timeline.as_mut().ok_or_else(rounds_not_defined)?;
        self.narrative.period(timeline, name, tone, round, build)
    }

    /// The game's title.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered players in roster order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        self.setup.as_ref().map(Setup::players).unwrap_or_default()
    }

    /// Looks up a registered player by name.
    #[must_use]
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.setup.as_ref().and_then(|s| s.player_named(name))
    }

    /// The palette, if setup built one.
    #[must_use]
    pub fn palette(&self) -> Option<&Palette> {
        self.setup.as_ref().and_then(Setup::current_palette)
    }

    /// The round timeline, once the rounds block has run.
    #[must_use]
    pub fn timeline(&self) -> Option<&RoundTimeline> {
        self.timeline.as_ref()
    }

    /// Every focus in chronological order.
    #[must_use]
    pub fn foci(&self) -> &[String] {
        self.timeline.as_ref().map(RoundTimeline::foci).unwrap_or_default()
    }

    /// The current player → legacy mapping.
    #[must_use]
    pub fn legacies(&self) -> Option<&Legacies> {
        self.timeline.as_ref().map(RoundTimeline::legacies)
    }

    /// Timeline entries in authoring order.
    #[must_use]
    pub fn entries(&self) -> &[TimelineEntry] {
        self.timeline.as_ref().map(RoundTimeline::entries).unwrap_or_default()
    }

    /// Top-level periods in authoring order.
    #[must_use]
    pub fn periods(&self) -> &[Period] {
        self.narrative.periods()
    }

    /// Resolves a narrative node referenced from a round.
    #[must_use]
    pub fn action(&self, id: ActionId) -> Option<ActionNode<'_>> {
        self.narrative.find(id)
    }

    fn timeline_mut(&mut self) -> Result<&mut RoundTimeline, DomainError> {
        self.timeline.as_mut().ok_or_else(rounds_not_defined)
    }
}

fn rounds_not_defined() -> DomainError {
    DomainError::Sequence("rounds not defined".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use microscope_narrative::Action;

    fn three_players(game: &mut GameModel) -> Result<(), DomainError> {
        game.setup(|setup| {
            setup.player("Addie", "addie@addie.io");
            setup.player("Bors", "Bors@bors.com");
            setup.player("Cat", "cat@cat.aww");
            Ok(())
        })
    }

    #[test]
    fn test_setup_twice_is_sequence_error() {
        // Arrange
        let mut game = GameModel::new("g");
        three_players(&mut game).unwrap();

        // Act
        let result = game.setup(|_| Ok(()));

        // Assert
        assert!(matches!(result, Err(DomainError::Sequence(_))));
        assert_eq!(game.players().len(), 3);
    }

    #[test]
    fn test_rounds_twice_is_sequence_error() {
        let mut game = GameModel::new("g");
        game.rounds(|_| Ok(())).unwrap();

        let result = game.rounds(|_| Ok(()));

        assert!(matches!(result, Err(DomainError::Sequence(_))));
    }

    #[test]
    fn test_build_game_propagates_second_setup_error() {
        let result = build_game("g", |game| {
            three_players(game)?;
            three_players(game)
        });

        assert!(matches!(result, Err(DomainError::Sequence(_))));
    }

    #[test]
    fn test_period_before_rounds_is_sequence_error() {
        let mut game = GameModel::new("g");
        three_players(&mut game).unwrap();

        let result = game.period("P", Tone::Light, 0, |_| Ok(()));

        assert!(matches!(result, Err(DomainError::Sequence(_))));
        assert!(game.periods().is_empty());
    }

    #[test]
    fn test_failed_period_keeps_model_consistent() {
        // Arrange
        let mut game = GameModel::new("g");
        three_players(&mut game).unwrap();
        game.rounds(|_| Ok(())).unwrap();

        // Act
        let result = game.period("P", Tone::Light, 1, |period| {
            period.description("half written");
            Err(DomainError::InvalidArgument("abandoned".to_owned()))
        });
        game.period("Q", Tone::Dark, 1, |_| Ok(())).unwrap();

        // Assert
        assert!(result.is_err());
        let refs = game.timeline().unwrap().round(1).unwrap().actions();
        assert_eq!(refs.len(), 1);
        assert!(matches!(
            game.action(refs[0].id),
            Some(ActionNode::Period(p)) if p.name() == "Q"
        ));
    }

    #[test]
    fn test_round_before_rounds_is_sequence_error() {
        let mut game = GameModel::new("g");

        assert!(matches!(game.round(0), Err(DomainError::Sequence(_))));
    }

    #[test]
    fn test_round_zero_is_implicit() {
        let mut game = GameModel::new("g");
        game.rounds(|_| Ok(())).unwrap();

        let round = game.round(0).unwrap();

        assert!(round.is_implicit());
        assert!(round.legacies().is_empty());
    }

    #[test]
    fn test_rounds_before_setup_binds_roster_later() {
        // Arrange
        let mut game = GameModel::new("g");
        game.rounds(|rounds| {
            rounds.focus(None, "X");
            Ok(())
        })
        .unwrap();
        assert!(matches!(game.round(1), Err(DomainError::Sequence(_))));

        // Act
        three_players(&mut game).unwrap();
        let round = game.round(2).unwrap();

        // Assert
        assert_eq!(round.lens().map(|p| p.name.as_str()), Some("Addie"));
        assert_eq!(round.player().map(|p| p.name.as_str()), Some("Bors"));
        assert_eq!(round.focus(), "X");
    }

    #[test]
    fn test_rounds_with_empty_roster_is_missing_players() {
        let mut game = GameModel::new("g");
        game.setup(|_| Ok(())).unwrap();
        game.rounds(|_| Ok(())).unwrap();

        assert_eq!(game.round(1).unwrap_err(), DomainError::MissingPlayers);
    }

    #[test]
    fn test_explicit_round_with_unknown_player_is_invalid_argument() {
        let mut game = GameModel::new("g");
        three_players(&mut game).unwrap();

        let result = game.rounds(|rounds| {
            rounds.add_round(rounds.player("Dax"), rounds.player("Addie"))?;
            Ok(())
        });

        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
        assert!(game.timeline().is_none());
    }

    #[test]
    fn test_full_game_builds_readable_model() {
        // Arrange / Act
        let game = build_game("Doom of the Gods", |game| {
            three_players(game)?;
            game.rounds(|rounds| {
                rounds.focus(rounds.player("Addie"), "Romance of Goorash and Svetka");
                rounds.legacy(rounds.player("Cat"), "Sword of Storms");
                Ok(())
            })?;
            game.period("Allfather creates mortal world", Tone::Light, 0, |period| {
                period.description("In the beginning");
                Ok(())
            })?;
            game.period("Flourishing Kingdoms of Men", Tone::Light, 1, |period| {
                period.event("Marriage of Svetka Interrupted", Tone::Dark, 4, |event| {
                    event.scene(
                        "What dowry does Svetka bring?",
                        "",
                        "Storm of Swords",
                        Tone::Dark,
                        4,
                        |_| Ok(()),
                    )?;
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })
        .unwrap();

        // Assert
        assert_eq!(game.name(), "Doom of the Gods");
        assert_eq!(game.players().len(), 3);
        assert_eq!(game.foci(), ["Romance of Goorash and Svetka"]);
        let cat = game.player("Cat").unwrap();
        assert_eq!(game.legacies().unwrap().get(cat), Some("Sword of Storms"));
        assert_eq!(game.periods().len(), 2);

        let rounds: Vec<&Round> = game.timeline().unwrap().rounds().collect();
        assert_eq!(rounds.len(), 5);
        assert_eq!(rounds[0].actions()[0].id, game.periods()[0].id());
        assert_eq!(rounds[4].actions().len(), 2);
        assert_eq!(rounds[4].focus(), "Romance of Goorash and Svetka");
        assert_eq!(rounds[4].legacies().get(cat), Some("Sword of Storms"));

        let scene_ref = rounds[4].actions()[1];
        let scene = game.action(scene_ref.id).unwrap().as_action();
        assert_eq!(scene.name(), "What dowry does Svetka bring?");
    }
}
