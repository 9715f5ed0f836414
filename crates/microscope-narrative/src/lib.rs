//! Microscope — Narrative context.
//!
//! Responsible for the period → event → scene hierarchy and for binding each
//! node to the timeline round where it was resolved. The outline (which
//! period owns which event) and the round binding (when in play the content
//! came up) are independent of each other.

pub mod domain;

pub use domain::action::{Action, Tone};
pub use domain::aggregates::{ActionNode, Event, NarrativeTree, Period, Scene};
pub use domain::builders::{EventBuilder, PeriodBuilder, SceneBuilder};
