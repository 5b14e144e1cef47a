//! Name-keyed ownership of registered states.
//!
//! The registry owns every state record. Keys are the names exactly as
//! registered and are the only copy of each name; lookups here are exact;
//! trimming happens in the machine before a name reaches the registry.

use crate::core::{Callbacks, State};
use crate::error::FsmError;
use crate::validation::RegistrationViolation;
use std::collections::HashMap;
use tracing::trace;

/// Mapping from stored state name to its owned record.
#[derive(Debug, Default)]
pub struct StateRegistry {
    states: HashMap<String, State>,
    #[cfg(test)]
    pub(crate) fail_allocations: bool,
}

impl StateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new state under a private copy of `name`.
    ///
    /// The name is kept verbatim and copied exactly once, into the map key.
    /// Fails without touching the registry when the exact key is already
    /// taken or when memory for the key or the map slot cannot be reserved.
    pub fn insert(&mut self, name: &str, callbacks: Callbacks) -> Result<(), FsmError> {
        if self.states.contains_key(name) {
            return Err(FsmError::InvalidRegistration {
                name: name.to_string(),
                violations: vec![RegistrationViolation::Duplicate {
                    name: name.to_string(),
                }],
            });
        }

        let allocation_failed = || FsmError::AllocationFailed {
            name: name.to_string(),
        };

        let mut key = String::new();
        key.try_reserve_exact(self.reservation(name.len()))
            .map_err(|_| allocation_failed())?;
        key.push_str(name);

        self.states
            .try_reserve(self.reservation(1))
            .map_err(|_| allocation_failed())?;

        self.states.insert(key, State::new(callbacks));
        Ok(())
    }

    #[cfg(not(test))]
    fn reservation(&self, wanted: usize) -> usize {
        wanted
    }

    // An impossible request makes `try_reserve*` fail without allocating.
    #[cfg(test)]
    fn reservation(&self, wanted: usize) -> usize {
        if self.fail_allocations {
            usize::MAX
        } else {
            wanted
        }
    }

    /// Exact lookup against stored keys.
    pub fn get(&self, name: &str) -> Option<&State> {
        self.states.get(name)
    }

    /// Exact lookup returning the stored key alongside its record.
    pub fn get_key_value(&self, name: &str) -> Option<(&str, &State)> {
        self.states
            .get_key_value(name)
            .map(|(key, state)| (key.as_str(), state))
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut State> {
        self.states.get_mut(name)
    }

    /// Exact membership test against stored keys.
    pub fn contains(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Stored names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.states.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Release every record. Returns how many were released.
    pub fn clear(&mut self) -> usize {
        let mut released = 0;
        for (name, _state) in self.states.drain() {
            trace!(state = %name, "Releasing state");
            released += 1;
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CallbackKind;

    fn draw_only() -> Callbacks {
        Callbacks::new().on_draw(|| {})
    }

    #[test]
    fn insert_then_get() {
        let mut registry = StateRegistry::new();
        registry.insert("Menu", draw_only()).unwrap();

        assert!(registry.contains("Menu"));
        assert!(registry.get("Menu").unwrap().has_callback(CallbackKind::Draw));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn lookups_are_exact() {
        let mut registry = StateRegistry::new();
        registry.insert("Menu", draw_only()).unwrap();

        assert!(!registry.contains(" Menu"));
        assert!(!registry.contains("menu"));
        assert!(registry.get("Menu ").is_none());
    }

    #[test]
    fn names_are_stored_verbatim() {
        let mut registry = StateRegistry::new();
        registry.insert(" Padded ", draw_only()).unwrap();

        assert!(registry.contains(" Padded "));
        assert!(!registry.contains("Padded"));
        let (stored, _) = registry.get_key_value(" Padded ").unwrap();
        assert_eq!(stored, " Padded ");
    }

    #[test]
    fn exact_duplicate_is_rejected() {
        let mut registry = StateRegistry::new();
        registry.insert("Menu", draw_only()).unwrap();

        let result = registry.insert("Menu", draw_only());
        assert!(matches!(
            result,
            Err(FsmError::InvalidRegistration { .. })
        ));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn names_are_sorted() {
        let mut registry = StateRegistry::new();
        registry.insert("Level", draw_only()).unwrap();
        registry.insert("Credits", draw_only()).unwrap();
        registry.insert("Menu", draw_only()).unwrap();

        assert_eq!(registry.names(), vec!["Credits", "Level", "Menu"]);
    }

    #[test]
    fn clear_releases_everything() {
        let mut registry = StateRegistry::new();
        registry.insert("A", draw_only()).unwrap();
        registry.insert("B", draw_only()).unwrap();

        assert_eq!(registry.clear(), 2);
        assert!(registry.is_empty());
        assert!(registry.get("A").is_none());
        assert_eq!(registry.clear(), 0);
    }

    #[test]
    fn get_mut_reaches_callbacks() {
        let mut registry = StateRegistry::new();
        registry.insert("A", draw_only()).unwrap();

        let state = registry.get_mut("A").unwrap();
        assert!(state.draw());
        assert!(!state.update(0.1));
    }

    #[test]
    fn stored_key_is_the_registered_name() {
        let mut registry = StateRegistry::new();
        let name = String::from("Level");
        registry.insert(&name, draw_only()).unwrap();
        drop(name);

        let (stored, state) = registry.get_key_value("Level").unwrap();
        assert_eq!(stored, "Level");
        assert!(state.has_callback(CallbackKind::Draw));
        assert!(registry.get_key_value("level").is_none());
    }

    #[test]
    fn failed_allocation_leaves_registry_untouched() {
        let mut registry = StateRegistry::new();
        registry.insert("Menu", draw_only()).unwrap();

        registry.fail_allocations = true;
        let result = registry.insert("Level", draw_only());
        assert_eq!(
            result,
            Err(FsmError::AllocationFailed {
                name: "Level".to_string(),
            })
        );
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains("Level"));
        assert_eq!(registry.names(), vec!["Menu"]);

        registry.fail_allocations = false;
        registry.insert("Level", draw_only()).unwrap();
        assert_eq!(registry.len(), 2);
    }
}
