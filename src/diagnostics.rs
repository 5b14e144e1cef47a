//! Diagnostic reporting through `tracing`.
//!
//! Every failed operation is reported here exactly once. Warnings honor the
//! configured toggle; errors are always emitted.

use crate::error::{FsmError, Severity};
use std::fmt;
use tracing::{error, warn};
use uuid::Uuid;

/// Display adapter for the optional session id in log fields.
struct Session(Option<Uuid>);

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{id}"),
            None => f.write_str("-"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Diagnostics {
    warnings_enabled: bool,
}

impl Diagnostics {
    pub(crate) fn new(warnings_enabled: bool) -> Self {
        Self { warnings_enabled }
    }

    pub(crate) fn warnings_enabled(&self) -> bool {
        self.warnings_enabled
    }

    pub(crate) fn set_warnings_enabled(&mut self, enabled: bool) {
        self.warnings_enabled = enabled;
    }

    /// Emit `err` at its severity and hand it back for returning.
    pub(crate) fn report(&self, session: Option<Uuid>, err: FsmError) -> FsmError {
        let session = Session(session);
        match err.severity() {
            Severity::Warning if self.warnings_enabled => {
                warn!(session = %session, "{err}");
            }
            Severity::Warning => {}
            Severity::Error => {
                error!(session = %session, "{err}");
            }
        }
        err
    }

    /// Registering a padded name succeeds, but trimmed lookups can never
    /// reach it.
    pub(crate) fn padded_name(&self, session: Option<Uuid>, name: &str) {
        if self.warnings_enabled {
            warn!(
                session = %Session(session),
                state = ?name,
                "State name has surrounding whitespace; trimmed lookups will not match it"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_returns_the_error() {
        let diagnostics = Diagnostics::new(false);
        let err = diagnostics.report(None, FsmError::NotInitialized);
        assert_eq!(err, FsmError::NotInitialized);
    }

    #[test]
    fn toggle_is_mutable() {
        let mut diagnostics = Diagnostics::new(true);
        assert!(diagnostics.warnings_enabled());
        diagnostics.set_warnings_enabled(false);
        assert!(!diagnostics.warnings_enabled());
    }

    #[test]
    fn session_displays_placeholder_when_absent() {
        assert_eq!(Session(None).to_string(), "-");
        let id = Uuid::new_v4();
        assert_eq!(Session(Some(id)).to_string(), id.to_string());
    }
}
