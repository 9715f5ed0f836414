//! Domain model for the Round Timeline context.

pub mod aggregates;
pub mod entries;
pub mod rotation;
