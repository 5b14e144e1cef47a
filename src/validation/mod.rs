//! Validation of state registrations.
//!
//! Registration requests are checked with Stillwater's `Validation` type so
//! that every problem with a request is reported at once, rather than one
//! per attempt.
//!
//! # Example
//!
//! ```rust
//! use smile_fsm::registry::StateRegistry;
//! use smile_fsm::validation::{validate_registration, violations_of, RegistrationViolation};
//! use smile_fsm::Callbacks;
//!
//! let registry = StateRegistry::new();
//! let check = validate_registration(" \t", &Callbacks::new(), &registry);
//!
//! assert_eq!(
//!     violations_of(check),
//!     vec![RegistrationViolation::EmptyName, RegistrationViolation::NoCallbacks]
//! );
//! ```

pub mod rules;
pub mod violations;

pub use rules::{validate_registration, violations_of, RegistrationCheck};
pub use violations::RegistrationViolation;
