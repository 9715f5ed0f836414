//! Microscope — Game context.
//!
//! Aggregates setup, the round timeline, and the narrative tree into a
//! single game model built in one authoring pass, and exposes the read-only
//! views a renderer consumes.
//!
//! ```
//! use microscope_game::build_game;
//! use microscope_narrative::Tone;
//!
//! let game = build_game("Doom of the Gods", |game| {
//!     game.setup(|setup| {
//!         setup.player("Addie", "addie@addie.io");
//!         setup.player("Bors", "bors@bors.com");
//!         Ok(())
//!     })?;
//!     game.rounds(|rounds| {
//!         rounds.focus(rounds.player("Addie"), "Romance of Goorash and Svetka");
//!         Ok(())
//!     })?;
//!     game.period("Flourishing Kingdoms of Men", Tone::Light, 1, |period| {
//!         period.event("Goorash saves Svetka", Tone::Light, 2, |_| Ok(()))?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })?;
//!
//! assert_eq!(game.periods().len(), 1);
//! # Ok::<(), microscope_core::error::DomainError>(())
//! ```

pub mod application;
pub mod domain;

pub use application::export::{ChronicleExport, export_chronicle};
pub use application::query_handlers::{GameView, get_game_view};
pub use domain::aggregates::{GameModel, build_game};
