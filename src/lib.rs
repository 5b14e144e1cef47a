//! Smile FSM: a minimal named finite-state machine for main loops
//!
//! A host registers uniquely-named states, each with up to four lifecycle
//! callbacks, and then drives the machine from its own loop: transitions by
//! name, one `update` per tick, one `draw` per frame. The machine never reads
//! a clock and never spawns threads.
//!
//! # Core Concepts
//!
//! - **State**: a stored name plus optional `enter`/`update`/`draw`/`exit` callbacks
//! - **Registry**: owns every state record, keyed by its exact name
//! - **Transition**: exit the current state, make the target current, enter it
//! - **Trimming**: lookup names lose surrounding whitespace; stored names never do
//!
//! # Example
//!
//! ```rust
//! use smile_fsm::{Callbacks, StateMachine};
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::sync::Arc;
//!
//! let ticks = Arc::new(AtomicU32::new(0));
//! let counter = Arc::clone(&ticks);
//!
//! let mut machine = StateMachine::new();
//! machine.init().unwrap();
//! machine
//!     .register_state(
//!         "Play",
//!         Callbacks::new().on_update(move |_dt| {
//!             counter.fetch_add(1, Ordering::Relaxed);
//!         }),
//!     )
//!     .unwrap();
//!
//! machine.change_state("Play").unwrap();
//! for _ in 0..3 {
//!     machine.update(1.0 / 60.0).unwrap();
//! }
//!
//! assert_eq!(ticks.load(Ordering::Relaxed), 3);
//! machine.shutdown().unwrap();
//! ```

pub mod config;
pub mod core;
mod diagnostics;
pub mod error;
pub mod machine;
pub mod registry;
pub mod status;
pub mod validation;

// Re-export commonly used types
pub use config::{ConfigError, MachineConfig};
pub use crate::core::{CallbackKind, Callbacks, TransitionHistory, TransitionRecord};
pub use error::{FsmError, Operation, Severity};
pub use machine::StateMachine;
pub use status::MachineStatus;
pub use validation::RegistrationViolation;
