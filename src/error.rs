//! Errors returned by state machine operations.

use crate::core::CallbackKind;
use crate::validation::RegistrationViolation;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// How loudly a failure is reported.
///
/// Warnings cover expected, recoverable conditions and can be silenced
/// through configuration. Errors indicate misuse and are always reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Operation on which a missing current state was detected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Update,
    Draw,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Update => f.write_str("update"),
            Self::Draw => f.write_str("draw"),
        }
    }
}

/// Errors that can occur while driving the state machine.
///
/// No variant is fatal: the operation that produced it left the machine
/// exactly as it was.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FsmError {
    #[error("State machine already initialized")]
    AlreadyInitialized,

    #[error("State machine not initialized")]
    NotInitialized,

    #[error("Can't use an empty or whitespace-only state name")]
    InvalidName,

    #[error("Can't register state '{name}': {}", join(.violations))]
    InvalidRegistration {
        name: String,
        violations: Vec<RegistrationViolation>,
    },

    #[error("State '{name}' not found")]
    StateNotFound { name: String },

    #[error("Failed to allocate memory for state '{name}'")]
    AllocationFailed { name: String },

    #[error("Not possible to {operation}: no state set to current")]
    NoCurrentState { operation: Operation },

    #[error("State '{state}' has no {callback} callback")]
    MissingCallback {
        state: String,
        callback: CallbackKind,
    },
}

impl FsmError {
    /// Severity this error is reported with.
    pub fn severity(&self) -> Severity {
        match self {
            Self::AlreadyInitialized | Self::MissingCallback { .. } => Severity::Warning,
            Self::InvalidRegistration { violations, .. }
                if violations.iter().all(RegistrationViolation::is_duplicate) =>
            {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }
}

fn join(violations: &[RegistrationViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
