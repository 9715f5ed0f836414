//! Domain model for the Setup context.

pub mod aggregates;
pub mod palette;
