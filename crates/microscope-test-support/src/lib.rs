//! Shared test fixtures and utilities for the Microscope chronicle engine.

mod clock;
mod fixtures;

pub use clock::{FixedClock, fixed_now};
pub use fixtures::{SAMPLE_SCRIPT, roster};
