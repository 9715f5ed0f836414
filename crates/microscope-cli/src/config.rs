//! Environment configuration for the `microscope` binary.

use std::path::{Component, Path, PathBuf};

use crate::error::AppError;

/// Path of the authoring script to compile.
pub const SCRIPT_VAR: &str = "MICROSCOPE_SCRIPT";
/// Root directory chronicles are written under.
pub const OUTPUT_DIR_VAR: &str = "MICROSCOPE_OUTPUT_DIR";

const CHRONICLE_FILE: &str = "chronicle.json";

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The YAML authoring script.
    pub script_path: PathBuf,
    /// Output root; each game gets its own subdirectory.
    pub output_dir: PathBuf,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `MICROSCOPE_SCRIPT` is unset or empty.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the script path is missing or empty.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let script_path = lookup(SCRIPT_VAR)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                AppError::Config(format!("{SCRIPT_VAR} environment variable must be set"))
            })?;
        let output_dir = lookup(OUTPUT_DIR_VAR)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| ".".to_owned());

        Ok(Self {
            script_path: PathBuf::from(script_path),
            output_dir: PathBuf::from(output_dir),
        })
    }

    /// Where the chronicle for `game_name` is written.
    ///
    /// # Errors
    ///
    /// See [`chronicle_path`].
    pub fn chronicle_path(&self, game_name: &str) -> Result<PathBuf, AppError> {
        chronicle_path(&self.output_dir, game_name)
    }
}

/// `<root>/<game name, spaces as underscores>/chronicle.json`.
///
/// The directory name must be a single plain path component, so the
/// chronicle always lands directly under `root`.
///
/// # Errors
///
/// Returns `AppError::Config` if the name is empty, contains a path
/// separator, or is `.` or `..`.
pub fn chronicle_path(root: &Path, game_name: &str) -> Result<PathBuf, AppError> {
    let dir_name = game_name.trim().replace(' ', "_");
    let mut components = Path::new(&dir_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(part)), None) if !dir_name.contains(['/', '\\']) => {
            Ok(root.join(part).join(CHRONICLE_FILE))
        }
        _ => Err(AppError::Config(format!(
            "game name {game_name:?} cannot be used as an output directory name"
        ))),
    }
}
