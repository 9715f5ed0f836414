//! Microscope — Round Timeline context.
//!
//! Responsible for the append-only sequence of rounds and change markers,
//! lazy round materialization, and the round-robin lens/active-player
//! rotation.

pub mod domain;

pub use domain::aggregates::RoundTimeline;
pub use domain::entries::{FocusChange, Legacies, LegacyChange, LegacyEntry, Round, TimelineEntry};
pub use domain::rotation::{RotationSlot, rotate, rotation_slot};
