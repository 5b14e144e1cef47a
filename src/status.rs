//! Serializable snapshot of a machine for logs and debug overlays.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Point-in-time view of a [`StateMachine`](crate::StateMachine).
///
/// Produced by [`StateMachine::status`](crate::StateMachine::status). Callback
/// bodies are not part of the snapshot, so it cannot be used to rebuild a
/// machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineStatus {
    /// Id of the current `init`..`shutdown` run, if running
    pub session_id: Option<Uuid>,
    pub initialized: bool,
    /// Stored name of the current state
    pub current_state: Option<String>,
    /// Stored names of all registered states, sorted
    pub registered_states: Vec<String>,
    pub state_count: usize,
    /// Transitions currently held in the history
    pub transitions_recorded: usize,
    pub warnings_enabled: bool,
}

impl MachineStatus {
    /// Render the snapshot as a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
