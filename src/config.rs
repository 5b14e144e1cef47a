//! Machine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of transitions kept in the history.
pub const DEFAULT_HISTORY_CAPACITY: usize = 64;

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid machine configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Configuration for a [`StateMachine`](crate::StateMachine).
///
/// Missing fields fall back to their defaults, so `{}` is a valid
/// configuration document.
///
/// # Example
///
/// ```rust
/// use smile_fsm::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "warnings_enabled": false }"#).unwrap();
/// assert!(!config.warnings_enabled);
/// assert_eq!(config.history_capacity, 64);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MachineConfig {
    /// Report warning-severity diagnostics. Errors are always reported.
    ///
    /// Defaults to on for debug builds and off for release builds.
    pub warnings_enabled: bool,

    /// Maximum number of transitions retained in the history. `0` disables it.
    pub history_capacity: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            warnings_enabled: cfg!(debug_assertions),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl MachineConfig {
    /// Parse a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set whether warnings are reported.
    pub fn warnings_enabled(mut self, enabled: bool) -> Self {
        self.warnings_enabled = enabled;
        self
    }

    /// Set the history capacity.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = MachineConfig::from_json("{}").unwrap();
        assert_eq!(config, MachineConfig::default());
    }

    #[test]
    fn fields_override_defaults() {
        let config =
            MachineConfig::from_json(r#"{ "warnings_enabled": true, "history_capacity": 0 }"#)
                .unwrap();
        assert!(config.warnings_enabled);
        assert_eq!(config.history_capacity, 0);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = MachineConfig::from_json(r#"{ "warnings": true }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(MachineConfig::from_json("not json").is_err());
    }

    #[test]
    fn builder_methods_set_fields() {
        let config = MachineConfig::default()
            .warnings_enabled(false)
            .history_capacity(3);
        assert!(!config.warnings_enabled);
        assert_eq!(config.history_capacity, 3);
    }

    #[test]
    fn config_serializes_correctly() {
        let config = MachineConfig::default().history_capacity(8);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized = MachineConfig::from_json(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
