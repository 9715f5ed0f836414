//! Aggregate root for the Narrative context.

use microscope_core::action::{ActionId, ActionKind};
use microscope_core::error::DomainError;
use microscope_timeline::RoundTimeline;
use serde::Serialize;
use tracing::debug;

use super::action::{Action, Tone};
use super::builders::PeriodBuilder;

/// The coarsest narrative node. Owns its events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    pub(crate) id: ActionId,
    pub(crate) tone: Tone,
    pub(crate) name: String,
    pub(crate) descriptions: Vec<String>,
    pub(crate) round: usize,
    pub(crate) events: Vec<Event>,
}

impl Period {
    pub(crate) fn new(name: String, tone: Tone, round: usize) -> Self {
        Self {
            id: ActionId::new(),
            tone,
            name,
            descriptions: Vec::new(),
            round,
            events: Vec::new(),
        }
    }

    /// Child events in authoring order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Removes this period and everything under it from the timeline.
    pub(crate) fn detach_from(&self, timeline: &mut RoundTimeline) {
        for event in &self.events {
            event.detach_from(timeline);
        }
        timeline.detach(self.round, self.id);
    }
}

impl Action for Period {
    fn id(&self) -> ActionId {
        self.id
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Period
    }

    fn tone(&self) -> Tone {
        self.tone
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    fn round(&self) -> usize {
        self.round
    }
}

/// A happening within a period. Owns its scenes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub(crate) id: ActionId,
    pub(crate) period: ActionId,
    pub(crate) tone: Tone,
    pub(crate) name: String,
    pub(crate) descriptions: Vec<String>,
    pub(crate) round: usize,
    pub(crate) scenes: Vec<Scene>,
}

impl Event {
    pub(crate) fn new(period: ActionId, name: String, tone: Tone, round: usize) -> Self {
        Self {
            id: ActionId::new(),
            period,
            tone,
            name,
            descriptions: Vec::new(),
            round,
            scenes: Vec::new(),
        }
    }

    /// The period this event belongs to.
    #[must_use]
    pub fn period(&self) -> ActionId {
        self.period
    }

    pub(crate) fn detach_from(&self, timeline: &mut RoundTimeline) {
        for scene in &self.scenes {
            scene.detach_from(timeline);
        }
        timeline.detach(self.round, self.id);
    }

    /// Child scenes in authoring order.
    #[must_use]
    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }
}

impl Action for Event {
    fn id(&self) -> ActionId {
        self.id
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Event
    }

    fn tone(&self) -> Tone {
        self.tone
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    fn round(&self) -> usize {
        self.round
    }
}

/// The finest narrative node: a question played out and answered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scene {
    pub(crate) id: ActionId,
    pub(crate) event: ActionId,
    pub(crate) tone: Tone,
    pub(crate) question: String,
    pub(crate) setting: String,
    pub(crate) answer: String,
    pub(crate) descriptions: Vec<String>,
    pub(crate) round: usize,
}

impl Scene {
    pub(crate) fn new(
        event: ActionId,
        question: String,
        setting: String,
        answer: String,
        tone: Tone,
        round: usize,
    ) -> Self {
        Self {
            id: ActionId::new(),
            event,
            tone,
            question,
            setting,
            answer,
            descriptions: Vec::new(),
            round,
        }
    }

    /// The event this scene belongs to.
    #[must_use]
    pub fn event(&self) -> ActionId {
        self.event
    }

    pub(crate) fn detach_from(&self, timeline: &mut RoundTimeline) {
        timeline.detach(self.round, self.id);
    }

    /// The question the scene set out to answer.
    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Where the scene took place.
    #[must_use]
    pub fn setting(&self) -> &str {
        &self.setting
    }

    /// How the question was answered.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }
}

impl Action for Scene {
    fn id(&self) -> ActionId {
        self.id
    }

    fn kind(&self) -> ActionKind {
        ActionKind::Scene
    }

    fn tone(&self) -> Tone {
        self.tone
    }

    fn name(&self) -> &str {
        &self.question
    }

    fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    fn round(&self) -> usize {
        self.round
    }
}

/// A borrowed node of any kind, as resolved from a round's `ActionRef`.
#[derive(Debug, Clone, Copy)]
pub enum ActionNode<'a> {
    /// A period.
    Period(&'a Period),
    /// An event.
    Event(&'a Event),
    /// A scene.
    Scene(&'a Scene),
}

impl<'a> ActionNode<'a> {
    /// The node viewed through the shared `Action` interface.
    #[must_use]
    pub fn as_action(self) -> &'a dyn Action {
        match self {
            Self::Period(period) => period,
            Self::Event(event) => event,
            Self::Scene(scene) => scene,
        }
    }
}

/// Owns every period of a game, and through them all events and scenes.
#[derive(Debug, Clone, Default)]
pub struct NarrativeTree {
    periods: Vec<Period>,
}

impl NarrativeTree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a period attached to `round`, then runs `build` on it.
    ///
    /// The round is materialized first if needed. The period is attached
    /// before `build` runs, so nested events attached to the same round come
    /// after it. If `build` fails, the period and everything it attached are
    /// removed from the timeline again; materialized rounds stay.
    ///
    /// # Errors
    ///
    /// Returns any `DomainError` from resolving the round or from `build`.
    pub fn period<F>(
        &mut self,
        timeline: &mut RoundTimeline,
        name: impl Into<String>,
        tone: Tone,
        round: usize,
        build: F,
    ) -> Result<ActionId, DomainError>
    where
        F: FnOnce(&mut PeriodBuilder<'_>) -> Result<(), DomainError>,
    {
        timeline.materialize_through(round)?;
        let mut period = Period::new(name.into(), tone, round);
        timeline.attach(round, period.action_ref())?;
        debug!(period = %period.name, round, "period attached");

        let built = build(&mut PeriodBuilder::new(timeline, &mut period));
        if let Err(err) = built {
            period.detach_from(timeline);
            debug!(period = %period.name, "period discarded");
            return Err(err);
        }

        let id = period.id;
        self.periods.push(period);
        Ok(id)
    }

    /// Top-level periods in authoring order.
    #[must_use]
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Resolves a node of any depth by identifier.
    #[must_use]
    pub fn find(&self, id: ActionId) -> Option<ActionNode<'_>> {
        for period in &self.periods {
            if period.id == id {
                return Some(ActionNode::Period(period));
            }
            for event in &period.events {
                if event.id == id {
                    return Some(ActionNode::Event(event));
                }
                if let Some(scene) = event.scenes.iter().find(|s| s.id == id) {
                    return Some(ActionNode::Scene(scene));
                }
            }
        }
        None
    }
}
