//! Microscope — Setup context.
//!
//! Responsible for registering the ordered player roster and the optional
//! content palette before play begins.

pub mod domain;

pub use domain::aggregates::Setup;
pub use domain::palette::Palette;
