//! Registration violations.

use serde::Serialize;
use thiserror::Error;

/// A reason a state registration was refused.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegistrationViolation {
    #[error("name is empty or whitespace-only")]
    EmptyName,

    #[error("a state called '{name}' already exists")]
    Duplicate { name: String },

    #[error("no lifecycle callbacks were provided")]
    NoCallbacks,
}

impl RegistrationViolation {
    /// Duplicates are expected during hot-reload style re-registration and
    /// only warrant a warning.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }
}
