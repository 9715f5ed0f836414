//! Domain model for the Narrative context.

pub mod action;
pub mod aggregates;
pub mod builders;
