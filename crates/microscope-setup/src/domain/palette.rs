//! The content palette agreed on at setup.

use serde::Serialize;

/// Paired lists of permitted and forbidden content statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Palette {
    permitted: Vec<String>,
    forbidden: Vec<String>,
}

impl Palette {
    /// Creates an empty palette.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a statement to the permitted list.
    pub fn yes(&mut self, item: impl Into<String>) {
        self.permitted.push(item.into());
    }

    /// Adds a statement to the forbidden list.
    pub fn no(&mut self, item: impl Into<String>) {
        self.forbidden.push(item.into());
    }

    /// Permitted statements, in the order they were added.
    #[must_use]
    pub fn permitted(&self) -> &[String] {
        &self.permitted
    }

    /// Forbidden statements, in the order they were added.
    #[must_use]
    pub fn forbidden(&self) -> &[String] {
        &self.forbidden
    }
}
