//! Aggregate root for the Round Timeline context.

use microscope_core::action::{ActionId, ActionRef};
use microscope_core::error::DomainError;
use microscope_core::player::Player;
use tracing::debug;

use super::entries::{FocusChange, Legacies, LegacyChange, Round, TimelineEntry};
use super::rotation::rotate;

/// The append-only sequence of rounds and change markers.
///
/// Round 0 exists from the start. Later rounds are materialized on demand,
/// each one snapshotting the focus and legacies current at that moment.
#[derive(Debug, Clone)]
pub struct RoundTimeline {
    /// Player roster driving the rotation, once bound.
    roster: Option<Vec<Player>>,
    /// All entries in authoring order.
    entries: Vec<TimelineEntry>,
    /// Position in `entries` of each round, by round index.
    round_positions: Vec<usize>,
    /// Every focus set so far, oldest first.
    foci: Vec<String>,
    /// Legacies applied to rounds materialized from now on.
    legacies: Legacies,
}

impl RoundTimeline {
    /// Creates a timeline holding only the implicit round 0.
    ///
    /// `roster` may be `None` when rounds are declared before setup; bind it
    /// later with [`RoundTimeline::bind_roster`].
    #[must_use]
    pub fn new(roster: Option<Vec<Player>>) -> Self {
        Self {
            roster,
            entries: vec![TimelineEntry::Round(Round::implicit())],
            round_positions: vec![0],
            foci: Vec::new(),
            legacies: Legacies::new(),
        }
    }

    /// Binds the player roster used by the rotation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Sequence` if a roster is already bound.
    pub fn bind_roster(&mut self, roster: Vec<Player>) -> Result<(), DomainError> {
        if self.roster.is_some() {
            return Err(DomainError::Sequence(
                "player roster is already bound to the timeline".to_owned(),
            ));
        }
        self.roster = Some(roster);
        Ok(())
    }

    /// The bound roster, empty if none is bound yet.
    #[must_use]
    pub fn roster(&self) -> &[Player] {
        self.roster.as_deref().unwrap_or_default()
    }

    /// Looks up a rostered player by name.
    #[must_use]
    pub fn player(&self, name: &str) -> Option<Player> {
        self.roster().iter().find(|p| p.name == name).cloned()
    }

    /// Number of materialized rounds, including round 0.
    #[must_use]
    pub fn round_count(&self) -> usize {
        self.round_positions.len()
    }

    /// Returns an already materialized round. Never extends the timeline.
    #[must_use]
    pub fn round(&self, index: usize) -> Option<&Round> {
        self.round_positions
            .get(index)
            .and_then(|&pos| self.entries.get(pos))
            .and_then(TimelineEntry::as_round)
    }

    /// Materializes every missing round up to and including `index`.
    ///
    /// Each new round takes its lens and active player from the rotation and
    /// snapshots the current focus and legacies. Rounds that already exist
    /// are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Sequence` if no roster is bound yet.
    /// Returns `DomainError::MissingPlayers` if the bound roster is empty.
    pub fn materialize_through(&mut self, index: usize) -> Result<(), DomainError> {
        while self.round_count() <= index {
            let next = self.round_count();
            let roster = self
                .roster
                .as_deref()
                .ok_or_else(|| DomainError::Sequence("no players defined".to_owned()))?;
            let (lens, player) = rotate(roster, next)?;
            let round = Round::new(
                next,
                lens.clone(),
                player.clone(),
                self.current_focus().to_owned(),
                self.legacies.clone(),
            );
            debug!(
                round = next,
                lens = %lens.name,
                player = %player.name,
                "round materialized"
            );
            self.push_round(round);
        }
        Ok(())
    }

    /// Returns round `index`, materializing it first if needed.
    ///
    /// # Errors
    ///
    /// See [`RoundTimeline::materialize_through`].
    pub fn get(&mut self, index: usize) -> Result<&Round, DomainError> {
        self.materialize_through(index)?;
        self.round(index)
            .ok_or_else(|| DomainError::InvalidArgument(format!("round {index} does not exist")))
    }

    /// Appends a round with an explicit lens and active player.
    ///
    /// Returns the new round's index.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if either player is missing.
    pub fn add_round(
        &mut self,
        lens: Option<Player>,
        player: Option<Player>,
    ) -> Result<usize, DomainError> {
        let lens =
            lens.ok_or_else(|| DomainError::InvalidArgument("round requires a lens".to_owned()))?;
        let player = player.ok_or_else(|| {
            DomainError::InvalidArgument("round requires an active player".to_owned())
        })?;

        let index = self.round_count();
        debug!(round = index, lens = %lens.name, player = %player.name, "round added");
        let round = Round::new(
            index,
            lens,
            player,
            self.current_focus().to_owned(),
            self.legacies.clone(),
        );
        self.push_round(round);
        Ok(index)
    }

    /// Records a focus change. Only rounds materialized afterwards see it.
    pub fn focus(&mut self, lens: Option<Player>, focus: impl Into<String>) {
        let focus = focus.into();
        debug!(focus = %focus, "focus changed");
        self.foci.push(focus.clone());
        self.entries
            .push(TimelineEntry::FocusChange(FocusChange { lens, focus }));
    }

    /// Records a legacy change.
    ///
    /// The marker is always recorded; the current legacies only change when
    /// a player is given.
    pub fn legacy(&mut self, player: Option<Player>, legacy: impl Into<String>) {
        let legacy = legacy.into();
        if let Some(player) = &player {
            debug!(player = %player.name, legacy = %legacy, "legacy assigned");
            self.legacies.set(player.clone(), legacy.clone());
        }
        self.entries
            .push(TimelineEntry::LegacyChange(LegacyChange { player, legacy }));
    }

    /// Attaches a narrative node to a materialized round.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidArgument` if the round is not materialized.
    pub fn attach(&mut self, round: usize, action: ActionRef) -> Result<(), DomainError> {
        let target = self
            .round_positions
            .get(round)
            .and_then(|&pos| self.entries.get_mut(pos))
            .and_then(TimelineEntry::as_round_mut)
            .ok_or_else(|| {
                DomainError::InvalidArgument(format!("round {round} is not materialized"))
            })?;
        target.attach(action);
        Ok(())
    }

    /// Removes a node attached to round `round`.
    ///
    /// Used to roll back an attachment whose node was never completed.
    /// Returns `false` if the round or the node is not found.
    pub fn detach(&mut self, round: usize, id: ActionId) -> bool {
        let Some(target) = self
            .round_positions
            .get(round)
            .and_then(|&pos| self.entries.get_mut(pos))
            .and_then(TimelineEntry::as_round_mut)
        else {
            return false;
        };
        let removed = target.detach(id);
        if removed {
            debug!(round, action = %id, "action detached");
        }
        removed
    }

    /// All entries in authoring order.
    #[must_use]
    pub fn entries(&self) -> &[TimelineEntry] {
        &self.entries
    }

    /// Materialized rounds in index order.
    pub fn rounds(&self) -> impl Iterator<Item = &Round> {
        self.entries.iter().filter_map(TimelineEntry::as_round)
    }

    /// Every focus set so far, oldest first.
    #[must_use]
    pub fn foci(&self) -> &[String] {
        &self.foci
    }

    /// The focus applied to newly materialized rounds.
    #[must_use]
    pub fn current_focus(&self) -> &str {
        self.foci.last().map_or("", String::as_str)
    }

    /// The legacies applied to newly materialized rounds.
    #[must_use]
    pub fn legacies(&self) -> &Legacies {
        &self.legacies
    }

    fn push_round(&mut self, round: Round) {
        self.round_positions.push(self.entries.len());
        self.entries.push(TimelineEntry::Round(round));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use microscope_core::action::{ActionId, ActionKind};
    use microscope_test_support::roster;

    fn timeline() -> RoundTimeline {
        RoundTimeline::new(Some(roster(&["Addie", "Bors", "Cat"])))
    }

    fn names(round: &Round) -> (&str, &str) {
        (
            round.lens().map_or("", |p| p.name.as_str()),
            round.player().map_or("", |p| p.name.as_str()),
        )
    }

    #[test]
    fn test_new_timeline_holds_only_implicit_round() {
        let timeline = timeline();

        assert_eq!(timeline.round_count(), 1);
        assert_eq!(timeline.entries().len(), 1);
        assert!(timeline.round(0).unwrap().is_implicit());
        assert!(timeline.round(1).is_none());
    }

    #[test]
    fn test_get_materializes_missing_rounds_with_rotation() {
        // Arrange
        let mut timeline = timeline();

        // Act
        let round = timeline.get(5).unwrap();

        // Assert
        assert_eq!(round.index(), 5);
        assert_eq!(names(round), ("Bors", "Bors"));
        assert_eq!(timeline.round_count(), 6);
        assert_eq!(names(timeline.round(4).unwrap()), ("Addie", "Addie"));
        assert_eq!(names(timeline.round(2).unwrap()), ("Addie", "Bors"));
    }

    #[test]
    fn test_get_returns_same_instance_on_repeat() {
        // Arrange
        let mut timeline = timeline();

        // Act
        let first: *const Round = timeline.get(3).unwrap();
        let second: *const Round = timeline.get(3).unwrap();

        // Assert
        assert!(std::ptr::eq(first, second));
        assert_eq!(timeline.round_count(), 4);
    }

    #[test]
    fn test_get_zero_needs_no_roster() {
        let mut timeline = RoundTimeline::new(None);

        let round = timeline.get(0).unwrap();

        assert!(round.is_implicit());
    }

    #[test]
    fn test_get_without_roster_is_sequence_error() {
        let mut timeline = RoundTimeline::new(None);

        let result = timeline.get(1);

        assert!(matches!(result, Err(DomainError::Sequence(_))));
    }

    #[test]
    fn test_get_with_empty_roster_is_missing_players() {
        let mut timeline = RoundTimeline::new(Some(Vec::new()));

        assert_eq!(timeline.get(1).unwrap_err(), DomainError::MissingPlayers);
    }

    #[test]
    fn test_bind_roster_enables_materialization_once() {
        // Arrange
        let mut timeline = RoundTimeline::new(None);

        // Act
        timeline.bind_roster(roster(&["Addie"])).unwrap();
        let rebind = timeline.bind_roster(roster(&["Bors"]));

        // Assert
        assert!(matches!(rebind, Err(DomainError::Sequence(_))));
        assert_eq!(names(timeline.get(2).unwrap()), ("Addie", "Addie"));
    }

    #[test]
    fn test_later_changes_never_touch_earlier_rounds() {
        // Arrange
        let mut timeline = timeline();
        let cat = timeline.player("Cat");
        timeline.focus(None, "X");
        timeline.materialize_through(2).unwrap();
        let before = timeline.round(2).unwrap().clone();

        // Act
        timeline.focus(None, "Y");
        timeline.legacy(cat.clone(), "Sword of Storms");
        timeline.materialize_through(6).unwrap();

        // Assert
        assert_eq!(timeline.round(2).unwrap(), &before);
        assert_eq!(timeline.round(2).unwrap().focus(), "X");
        assert!(timeline.round(2).unwrap().legacies().is_empty());
        let late = timeline.round(6).unwrap();
        assert_eq!(late.focus(), "Y");
        assert_eq!(
            late.legacies().get(&cat.unwrap()),
            Some("Sword of Storms")
        );
    }

    #[test]
    fn test_legacy_without_player_records_marker_only() {
        // Arrange
        let mut timeline = timeline();

        // Act
        timeline.legacy(None, "Unclaimed Crown");

        // Assert
        assert!(timeline.legacies().is_empty());
        assert_eq!(
            timeline.entries().last(),
            Some(&TimelineEntry::LegacyChange(LegacyChange {
                player: None,
                legacy: "Unclaimed Crown".to_owned(),
            }))
        );
    }

    #[test]
    fn test_focus_then_round_then_legacy_then_round_sequence() {
        // Arrange
        let mut timeline = timeline();
        let addie = timeline.player("Addie");
        let bors = timeline.player("Bors");

        // Act
        timeline.focus(None, "X");
        let first = timeline.add_round(addie.clone(), addie.clone()).unwrap();
        timeline.legacy(bors.clone(), "L");
        let second = timeline.add_round(addie.clone(), bors.clone()).unwrap();

        // Assert
        let entries = timeline.entries();
        assert_eq!(entries.len(), 5);
        assert!(matches!(&entries[0], TimelineEntry::Round(r) if r.is_implicit()));
        assert!(matches!(&entries[1], TimelineEntry::FocusChange(f) if f.focus == "X"));
        assert!(matches!(&entries[2], TimelineEntry::Round(r) if r.index() == first));
        assert!(matches!(&entries[3], TimelineEntry::LegacyChange(l) if l.legacy == "L"));
        assert!(matches!(&entries[4], TimelineEntry::Round(r) if r.index() == second));

        let bors = bors.unwrap();
        assert!(timeline.round(first).unwrap().legacies().is_empty());
        assert_eq!(timeline.round(second).unwrap().legacies().get(&bors), Some("L"));
        assert_eq!(timeline.round(second).unwrap().legacies().len(), 1);
    }

    #[test]
    fn test_end_to_end_authoring_sequence() {
        // Arrange
        let mut timeline = timeline();
        let a = timeline.player("Addie");
        let b = timeline.player("Bors");
        let c = timeline.player("Cat");

        // Act
        timeline.focus(a.clone(), "X");
        timeline.add_round(a.clone(), a.clone()).unwrap();
        timeline.add_round(a.clone(), b.clone()).unwrap();
        timeline.add_round(a.clone(), c.clone()).unwrap();
        timeline.add_round(a.clone(), a.clone()).unwrap();
        timeline.legacy(c.clone(), "Sword");
        timeline.add_round(a.clone(), c.clone()).unwrap();
        timeline.focus(b.clone(), "Y");
        timeline.add_round(b.clone(), b.clone()).unwrap();

        // Assert
        let shape: Vec<String> = timeline
            .entries()
            .iter()
            .map(|entry| match entry {
                TimelineEntry::Round(r) if r.is_implicit() => "R0".to_owned(),
                TimelineEntry::Round(r) => {
                    let (lens, player) = names(r);
                    format!("R{}({lens},{player})", r.index())
                }
                TimelineEntry::FocusChange(f) => format!("F({})", f.focus),
                TimelineEntry::LegacyChange(l) => format!("L({})", l.legacy),
            })
            .collect();
        assert_eq!(
            shape,
            [
                "R0",
                "F(X)",
                "R1(Addie,Addie)",
                "R2(Addie,Bors)",
                "R3(Addie,Cat)",
                "R4(Addie,Addie)",
                "L(Sword)",
                "R5(Addie,Cat)",
                "F(Y)",
                "R6(Bors,Bors)",
            ]
        );

        let cat = c.unwrap();
        for index in 1..=4 {
            assert!(timeline.round(index).unwrap().legacies().is_empty());
            assert_eq!(timeline.round(index).unwrap().focus(), "X");
        }
        assert_eq!(timeline.round(5).unwrap().legacies().get(&cat), Some("Sword"));
        assert_eq!(timeline.round(6).unwrap().focus(), "Y");
        assert_eq!(timeline.foci(), ["X", "Y"]);
    }

    #[test]
    fn test_add_round_without_lens_is_invalid_argument() {
        let mut timeline = timeline();
        let addie = timeline.player("Addie");

        let result = timeline.add_round(None, addie);

        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
        assert_eq!(timeline.round_count(), 1);
    }

    #[test]
    fn test_add_round_without_player_is_invalid_argument() {
        let mut timeline = timeline();
        let addie = timeline.player("Addie");

        let result = timeline.add_round(addie, None);

        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn test_lazy_rounds_continue_rotation_after_explicit_rounds() {
        // Arrange
        let mut timeline = timeline();
        let cat = timeline.player("Cat");
        timeline.add_round(cat.clone(), cat).unwrap();

        // Act
        let round = timeline.get(2).unwrap();

        // Assert
        assert_eq!(names(round), ("Addie", "Bors"));
    }

    #[test]
    fn test_attach_preserves_call_order() {
        // Arrange
        let mut timeline = timeline();
        timeline.materialize_through(1).unwrap();
        let x = ActionRef {
            id: ActionId::new(),
            kind: ActionKind::Period,
        };
        let y = ActionRef {
            id: ActionId::new(),
            kind: ActionKind::Event,
        };

        // Act
        timeline.attach(1, x).unwrap();
        timeline.attach(1, y).unwrap();

        // Assert
        assert_eq!(timeline.round(1).unwrap().actions(), [x, y]);
    }

    #[test]
    fn test_attach_to_unmaterialized_round_is_invalid_argument() {
        let mut timeline = timeline();
        let action = ActionRef {
            id: ActionId::new(),
            kind: ActionKind::Scene,
        };

        let result = timeline.attach(3, action);

        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn test_detach_removes_only_the_named_action() {
        // Arrange
        let mut timeline = timeline();
        timeline.materialize_through(1).unwrap();
        let kept = ActionRef {
            id: ActionId::new(),
            kind: ActionKind::Period,
        };
        let dropped = ActionRef {
            id: ActionId::new(),
            kind: ActionKind::Event,
        };
        timeline.attach(1, kept).unwrap();
        timeline.attach(1, dropped).unwrap();

        // Act
        let removed = timeline.detach(1, dropped.id);

        // Assert
        assert!(removed);
        assert_eq!(timeline.round(1).unwrap().actions(), [kept]);
        assert!(!timeline.detach(1, dropped.id));
        assert!(!timeline.detach(7, kept.id));
    }

    #[test]
    fn test_player_lookup_by_name() {
        let timeline = timeline();

        assert_eq!(timeline.player("Bors").map(|p| p.name), Some("Bors".to_owned()));
        assert!(timeline.player("Dax").is_none());
    }
}
