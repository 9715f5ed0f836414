//! Domain model for the Content Authoring context.

pub mod script;
