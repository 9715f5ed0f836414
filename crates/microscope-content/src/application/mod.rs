//! Application services for the Content Authoring context.

pub mod command_handlers;
