//! Microscope — Content Authoring context.
//!
//! Responsible for YAML authoring scripts: parsing and validation, version
//! hashing, and compilation into a game model through the builder API.

pub mod application;
pub mod domain;
pub mod error;

pub use application::command_handlers::{IngestedScript, compile_script, ingest_script};
pub use domain::script::{MAX_ROUND, Script};
pub use error::ContentError;
