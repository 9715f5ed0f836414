//! Construction contexts for nested narrative nodes.
//!
//! Each builder holds the node under construction together with the
//! timeline, so a nested call can resolve its own target round.

use microscope_core::action::ActionId;
use microscope_core::error::DomainError;
use microscope_timeline::{Round, RoundTimeline};
use tracing::debug;

use super::action::{Action, Tone};
use super::aggregates::{Event, Period, Scene};

/// Context handed to a period's build closure.
#[derive(Debug)]
pub struct PeriodBuilder<'a> {
    timeline: &'a mut RoundTimeline,
    period: &'a mut Period,
}

impl<'a> PeriodBuilder<'a> {
    pub(crate) fn new(timeline: &'a mut RoundTimeline, period: &'a mut Period) -> Self {
        Self { timeline, period }
    }

    /// The period being built.
    #[must_use]
    pub fn id(&self) -> ActionId {
        self.period.id
    }

    /// Appends a description to the period.
    pub fn description(&mut self, text: impl Into<String>) {
        self.period.descriptions.push(text.into());
    }

    /// Resolves round `index`, materializing it if needed.
    ///
    /// # Errors
    ///
    /// Returns any `DomainError` from materializing the round.
    pub fn round(&mut self, index: usize) -> Result<&Round, DomainError> {
        self.timeline.get(index)
    }

    /// Creates an event in this period attached to `round`, then runs
    /// `build` on it.
    ///
    /// # Errors
    ///
    /// Returns any `DomainError` from resolving the round or from `build`.
    pub fn event<F>(
        &mut self,
        name: impl Into<String>,
        tone: Tone,
        round: usize,
        build: F,
    ) -> Result<ActionId, DomainError>
    where
        F: FnOnce(&mut EventBuilder<'_>) -> Result<(), DomainError>,
    {
        self.timeline.materialize_through(round)?;
        let mut event = Event::new(self.period.id, name.into(), tone, round);
        self.timeline.attach(round, event.action_ref())?;
        debug!(event = %event.name, round, "event attached");

        let built = build(&mut EventBuilder {
            timeline: &mut *self.timeline,
            event: &mut event,
        });
        if let Err(err) = built {
            event.detach_from(self.timeline);
            debug!(event = %event.name, "event discarded");
            return Err(err);
        }

        let id = event.id;
        self.period.events.push(event);
        Ok(id)
    }
}

/// Context handed to an event's build closure.
#[derive(Debug)]
pub struct EventBuilder<'a> {
    timeline: &'a mut RoundTimeline,
    event: &'a mut Event,
}

impl EventBuilder<'_> {
    /// The event being built.
    #[must_use]
    pub fn id(&self) -> ActionId {
        self.event.id
    }

    /// Appends a description to the event.
    pub fn description(&mut self, text: impl Into<String>) {
        self.event.descriptions.push(text.into());
    }

    /// Resolves round `index`, materializing it if needed.
    ///
    /// # Errors
    ///
    /// Returns any `DomainError` from materializing the round.
    pub fn round(&mut self, index: usize) -> Result<&Round, DomainError> {
        self.timeline.get(index)
    }

    /// Creates a scene in this event attached to `round`, then runs `build`
    /// on it.
    ///
    /// # Errors
    ///
    /// Returns any `DomainError` from resolving the round or from `build`.
    pub fn scene<F>(
        &mut self,
        question: impl Into<String>,
        setting: impl Into<String>,
        answer: impl Into<String>,
        tone: Tone,
        round: usize,
        build: F,
    ) -> Result<ActionId, DomainError>
    where
        F: FnOnce(&mut SceneBuilder<'_>) -> Result<(), DomainError>,
    {
        self.timeline.materialize_through(round)?;
        let mut scene = Scene::new(
            self.event.id,
            question.into(),
            setting.into(),
            answer.into(),
            tone,
            round,
        );
        self.timeline.attach(round, scene.action_ref())?;
        debug!(scene = %scene.question, round, "scene attached");

        let built = build(&mut SceneBuilder { scene: &mut scene });
        if let Err(err) = built {
            scene.detach_from(self.timeline);
            debug!(scene = %scene.question, "scene discarded");
            return Err(err);
        }

        let id = scene.id;
        self.event.scenes.push(scene);
        Ok(id)
    }
}

/// Context handed to a scene's build closure. Scenes take descriptions only.
#[derive(Debug)]
pub struct SceneBuilder<'a> {
    scene: &'a mut Scene,
}

impl SceneBuilder<'_> {
    /// The scene being built.
    #[must_use]
    pub fn id(&self) -> ActionId {
        self.scene.id
    }

    /// Appends a description to the scene.
    pub fn description(&mut self, text: impl Into<String>) {
        self.scene.descriptions.push(text.into());
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::action::{Action, Tone};
    use crate::domain::aggregates::NarrativeTree;
    use microscope_test_support::roster;
    use microscope_timeline::RoundTimeline;

    #[test]
    fn test_builder_round_materializes_for_lookup() {
        // Arrange
        let mut timeline = RoundTimeline::new(Some(roster(&["Addie", "Bors", "Cat"])));
        let mut tree = NarrativeTree::new();
        let mut lens = String::new();

        // Act
        tree.period(&mut timeline, "P", Tone::Light, 0, |p| {
            let round = p.round(5)?;
            lens = round.lens().map(|l| l.name.clone()).unwrap_or_default();
            Ok(())
        })
        .unwrap();

        // Assert
        assert_eq!(lens, "Bors");
        assert_eq!(timeline.round_count(), 6);
    }

    #[test]
    fn test_builder_ids_match_created_nodes() {
        let mut timeline = RoundTimeline::new(Some(roster(&["Addie"])));
        let mut tree = NarrativeTree::new();
        let mut seen = Vec::new();

        let period_id = tree
            .period(&mut timeline, "P", Tone::Light, 0, |p| {
                seen.push(p.id());
                let event_id = p.event("E", Tone::Dark, 1, |e| {
                    seen.push(e.id());
                    e.description("event text");
                    Ok(())
                })?;
                seen.push(event_id);
                Ok(())
            })
            .unwrap();

        let event = &tree.periods()[0].events()[0];
        assert_eq!(seen, [period_id, event.id(), event.id()]);
        assert_eq!(event.descriptions(), ["event text"]);
    }
}
