//! The state machine context: lifecycle, registration and dispatch.

use crate::config::MachineConfig;
use crate::core::{trim_name, CallbackKind, Callbacks, TransitionHistory, TransitionRecord};
use crate::diagnostics::Diagnostics;
use crate::error::{FsmError, Operation};
use crate::registry::StateRegistry;
use crate::status::MachineStatus;
use crate::validation::{validate_registration, violations_of};
use chrono::Utc;
use std::any::Any;
use tracing::{debug, trace};
use uuid::Uuid;

/// Everything that exists only between `init` and `shutdown`.
#[derive(Debug)]
struct Tracker {
    session: Uuid,
    registry: StateRegistry,
    /// Stored key of the current state. The record itself stays owned by
    /// the registry.
    current: Option<String>,
    history: TransitionHistory,
}

impl Tracker {
    fn new(config: &MachineConfig) -> Self {
        Self {
            session: Uuid::new_v4(),
            registry: StateRegistry::new(),
            current: None,
            history: TransitionHistory::with_capacity(config.history_capacity),
        }
    }
}

/// A named finite-state machine driven by the host's main loop.
///
/// The machine starts uninitialized. [`init`](Self::init) makes it ready to
/// register and run states; [`shutdown`](Self::shutdown) exits the current
/// state and discards every registration. Every operation other than `init`
/// fails while the machine is not initialized.
///
/// Failures never change the machine. Each one is reported through
/// `tracing` and returned as an [`FsmError`].
///
/// # Example
///
/// ```rust
/// use smile_fsm::{Callbacks, StateMachine};
///
/// let mut machine = StateMachine::new();
/// machine.init().unwrap();
///
/// machine
///     .register_state("Menu", Callbacks::new().on_draw(|| println!("menu")))
///     .unwrap();
/// machine
///     .register_state("Level", Callbacks::new().on_update(|dt| println!("{dt}")))
///     .unwrap();
///
/// machine.change_state(" Menu ").unwrap();
/// assert_eq!(machine.current_state_name(), Some("Menu"));
/// machine.draw().unwrap();
///
/// machine.change_state("Level").unwrap();
/// machine.update(1.0 / 60.0).unwrap();
///
/// machine.shutdown().unwrap();
/// assert!(!machine.is_initialized());
/// ```
#[derive(Debug)]
pub struct StateMachine {
    config: MachineConfig,
    diagnostics: Diagnostics,
    tracker: Option<Tracker>,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl StateMachine {
    /// Create an uninitialized machine with the default configuration.
    pub fn new() -> Self {
        Self::with_config(MachineConfig::default())
    }

    /// Create an uninitialized machine with an explicit configuration.
    pub fn with_config(config: MachineConfig) -> Self {
        Self {
            diagnostics: Diagnostics::new(config.warnings_enabled),
            config,
            tracker: None,
        }
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Turn warning diagnostics on or off. Errors are always reported.
    pub fn set_warnings_enabled(&mut self, enabled: bool) {
        self.config.warnings_enabled = enabled;
        self.diagnostics.set_warnings_enabled(enabled);
    }

    fn session(&self) -> Option<Uuid> {
        self.tracker.as_ref().map(|t| t.session)
    }

    /// Prepare the machine to register and run states.
    ///
    /// Fails with [`FsmError::AlreadyInitialized`] if it is already running;
    /// the running session is left untouched.
    pub fn init(&mut self) -> Result<(), FsmError> {
        if self.tracker.is_some() {
            return Err(self
                .diagnostics
                .report(self.session(), FsmError::AlreadyInitialized));
        }

        let tracker = Tracker::new(&self.config);
        debug!(session = %tracker.session, "State machine initialized");
        self.tracker = Some(tracker);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.tracker.is_some()
    }

    /// Register a state under `name`.
    ///
    /// The name is stored exactly as given. It is rejected when it is empty
    /// or whitespace-only, or when its trimmed form already names a state.
    /// At least one callback must be present. All violations are reported
    /// together, and nothing is stored on failure.
    pub fn register_state(&mut self, name: &str, callbacks: Callbacks) -> Result<(), FsmError> {
        let diagnostics = self.diagnostics;
        let Some(tracker) = self.tracker.as_mut() else {
            return Err(diagnostics.report(None, FsmError::NotInitialized));
        };
        let session = Some(tracker.session);

        let check = validate_registration(name, &callbacks, &tracker.registry);
        if check.is_failure() {
            return Err(diagnostics.report(
                session,
                FsmError::InvalidRegistration {
                    name: name.to_string(),
                    violations: violations_of(check),
                },
            ));
        }

        tracker
            .registry
            .insert(name, callbacks)
            .map_err(|err| diagnostics.report(session, err))?;

        if trim_name(name) != Some(name) {
            diagnostics.padded_name(session, name);
        }
        debug!(
            session = %tracker.session,
            state = %name,
            count = tracker.registry.len(),
            "Registered state"
        );
        Ok(())
    }

    /// Check whether `name`, once trimmed, names a registered state.
    ///
    /// Returns `false` when the machine is not initialized or the name is
    /// empty or whitespace-only.
    pub fn is_state_registered(&self, name: &str) -> bool {
        let Some(tracker) = self.tracker.as_ref() else {
            return false;
        };
        trim_name(name).is_some_and(|trimmed| tracker.registry.contains(trimmed))
    }

    /// Transition to the state named `name`, passing `args` to its enter
    /// callback.
    ///
    /// The name is trimmed before lookup. If it does not resolve, nothing
    /// happens and the current state stays current. Otherwise the current
    /// state's exit callback runs first, then the target becomes current,
    /// then its enter callback runs. Transitioning to the current state
    /// runs the full exit-then-enter cycle.
    ///
    /// `args` is only borrowed for the duration of the enter call.
    pub fn change_state_to(&mut self, name: &str, args: Option<&dyn Any>) -> Result<(), FsmError> {
        let diagnostics = self.diagnostics;
        let Some(tracker) = self.tracker.as_mut() else {
            return Err(diagnostics.report(None, FsmError::NotInitialized));
        };
        let session = Some(tracker.session);

        let Some(trimmed) = trim_name(name) else {
            return Err(diagnostics.report(session, FsmError::InvalidName));
        };
        let Some(target) = tracker
            .registry
            .get_key_value(trimmed)
            .map(|(stored, _)| stored.to_string())
        else {
            return Err(diagnostics.report(
                session,
                FsmError::StateNotFound {
                    name: name.to_string(),
                },
            ));
        };

        let previous = tracker.current.take();
        if let Some(state) = previous
            .as_deref()
            .and_then(|prev| tracker.registry.get_mut(prev))
        {
            state.exit();
        }

        tracker.current = Some(target.clone());
        if let Some(state) = tracker.registry.get_mut(&target) {
            state.enter(args);
        }

        debug!(
            session = %tracker.session,
            from = previous.as_deref().unwrap_or("-"),
            to = %target,
            "Changed state"
        );
        tracker.history.record(TransitionRecord {
            from: previous,
            to: target,
            timestamp: Utc::now(),
        });
        Ok(())
    }

    /// Transition to `name` without an enter payload.
    pub fn change_state(&mut self, name: &str) -> Result<(), FsmError> {
        self.change_state_to(name, None)
    }

    /// Run the current state's update callback with `delta_time`.
    pub fn update(&mut self, delta_time: f32) -> Result<(), FsmError> {
        let diagnostics = self.diagnostics;
        let Some(tracker) = self.tracker.as_mut() else {
            return Err(diagnostics.report(None, FsmError::NotInitialized));
        };
        let session = Some(tracker.session);

        let current = tracker.current.as_deref();
        let Some((name, state)) =
            current.and_then(|name| tracker.registry.get_mut(name).map(|state| (name, state)))
        else {
            return Err(diagnostics.report(
                session,
                FsmError::NoCurrentState {
                    operation: Operation::Update,
                },
            ));
        };

        if !state.update(delta_time) {
            return Err(diagnostics.report(
                session,
                FsmError::MissingCallback {
                    state: name.to_string(),
                    callback: CallbackKind::Update,
                },
            ));
        }
        trace!(state = %name, delta_time, "Updated state");
        Ok(())
    }

    /// Run the current state's draw callback.
    pub fn draw(&mut self) -> Result<(), FsmError> {
        let diagnostics = self.diagnostics;
        let Some(tracker) = self.tracker.as_mut() else {
            return Err(diagnostics.report(None, FsmError::NotInitialized));
        };
        let session = Some(tracker.session);

        let current = tracker.current.as_deref();
        let Some((name, state)) =
            current.and_then(|name| tracker.registry.get_mut(name).map(|state| (name, state)))
        else {
            return Err(diagnostics.report(
                session,
                FsmError::NoCurrentState {
                    operation: Operation::Draw,
                },
            ));
        };

        if !state.draw() {
            return Err(diagnostics.report(
                session,
                FsmError::MissingCallback {
                    state: name.to_string(),
                    callback: CallbackKind::Draw,
                },
            ));
        }
        Ok(())
    }

    /// Exit the current state, discard every registration and return to
    /// the uninitialized state.
    ///
    /// The current state's exit callback runs before any record is released.
    pub fn shutdown(&mut self) -> Result<(), FsmError> {
        let Some(mut tracker) = self.tracker.take() else {
            return Err(self.diagnostics.report(None, FsmError::NotInitialized));
        };

        if let Some(current) = tracker.current.take() {
            if let Some(state) = tracker.registry.get_mut(&current) {
                state.exit();
            }
        }

        let released = tracker.registry.clear();
        tracker.history.clear();
        debug!(session = %tracker.session, released, "State machine shut down");
        Ok(())
    }

    /// Stored name of the current state.
    ///
    /// `None` when no state is current or the machine is not initialized.
    pub fn current_state_name(&self) -> Option<&str> {
        match self.tracker.as_ref() {
            Some(tracker) => tracker.current.as_deref(),
            None => {
                self.diagnostics.report(None, FsmError::NotInitialized);
                None
            }
        }
    }

    /// Number of live registrations. Zero when not initialized.
    pub fn state_count(&self) -> usize {
        self.tracker.as_ref().map_or(0, |t| t.registry.len())
    }

    /// Stored names of all registered states, sorted.
    pub fn registered_states(&self) -> Vec<&str> {
        self.tracker
            .as_ref()
            .map(|t| t.registry.names())
            .unwrap_or_default()
    }

    /// Id of the current `init`..`shutdown` run.
    pub fn session_id(&self) -> Option<Uuid> {
        self.session()
    }

    /// Transitions recorded in the current run.
    pub fn history(&self) -> Option<&TransitionHistory> {
        self.tracker.as_ref().map(|t| &t.history)
    }

    /// Snapshot of the machine for logging and debugging.
    pub fn status(&self) -> MachineStatus {
        let tracker = self.tracker.as_ref();
        MachineStatus {
            session_id: self.session(),
            initialized: tracker.is_some(),
            current_state: tracker.and_then(|t| t.current.clone()),
            registered_states: self
                .registered_states()
                .into_iter()
                .map(str::to_string)
                .collect(),
            state_count: self.state_count(),
            transitions_recorded: tracker.map_or(0, |t| t.history.len()),
            warnings_enabled: self.diagnostics.warnings_enabled(),
        }
    }
}
