//! Microscope Core — shared domain abstractions.
//!
//! This crate defines the fundamental types that every component of a
//! chronicle depends on: the error taxonomy, players, the identifiers used to
//! bind narrative nodes to rounds, and the clock abstraction. It contains no
//! builder logic.

pub mod action;
pub mod clock;
pub mod error;
pub mod player;
