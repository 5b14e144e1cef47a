//! Transition history tracking.
//!
//! Keeps a bounded, ordered log of the transitions a machine has performed.
//! The log is introspection only; nothing in the machine reads it back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// Record of a single completed transition.
///
/// `from` is `None` for the first transition after `init`, when no state was
/// current yet. A re-entrant transition records the same name on both sides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord {
    /// Stored name of the state that was exited
    pub from: Option<String>,
    /// Stored name of the state that was entered
    pub to: String,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Bounded log of transitions, oldest first.
///
/// When the log is full, recording a transition evicts the oldest one.
/// A capacity of zero disables recording.
///
/// # Example
///
/// ```rust
/// use smile_fsm::core::{TransitionHistory, TransitionRecord};
/// use chrono::Utc;
///
/// let mut history = TransitionHistory::with_capacity(8);
/// history.record(TransitionRecord {
///     from: None,
///     to: "Menu".to_string(),
///     timestamp: Utc::now(),
/// });
/// history.record(TransitionRecord {
///     from: Some("Menu".to_string()),
///     to: "Level".to_string(),
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(history.get_path(), vec!["Menu", "Level"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionHistory {
    capacity: usize,
    transitions: VecDeque<TransitionRecord>,
}

impl Default for TransitionHistory {
    fn default() -> Self {
        Self::with_capacity(crate::config::DEFAULT_HISTORY_CAPACITY)
    }
}

impl TransitionHistory {
    /// Create an empty history that keeps at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            transitions: VecDeque::new(),
        }
    }

    /// Append a transition, evicting the oldest one if the log is full.
    pub fn record(&mut self, transition: TransitionRecord) {
        if self.capacity == 0 {
            return;
        }
        while self.transitions.len() >= self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Get the names of the states traversed.
    ///
    /// Starts with the `from` of the oldest retained record (when there was
    /// one), followed by the `to` of every record in order.
    pub fn get_path(&self) -> Vec<&str> {
        let mut path = Vec::new();
        if let Some(from) = self.transitions.front().and_then(|t| t.from.as_deref()) {
            path.push(from);
        }
        for transition in &self.transitions {
            path.push(transition.to.as_str());
        }
        path
    }

    /// Time elapsed between the oldest and newest retained record.
    ///
    /// Returns `None` when the history is empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.front(), self.transitions.back()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Most recent transition, if any.
    pub fn last(&self) -> Option<&TransitionRecord> {
        self.transitions.back()
    }

    /// Iterate over retained records, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.transitions.iter()
    }
}
