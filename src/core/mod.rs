//! Core state machine types.
//!
//! This module contains the building blocks the machine is made of:
//! - Name normalization for lookups
//! - State records and their lifecycle callbacks
//! - Bounded transition history
//!
//! Nothing in here logs or knows about the machine's lifecycle.

mod history;
mod name;
mod state;

pub use history::{TransitionHistory, TransitionRecord};
pub use name::trim_name;
pub use state::{CallbackKind, Callbacks, DrawFn, EnterFn, ExitFn, State, UpdateFn};
