//! Registration checks using Validation.

use crate::core::{trim_name, Callbacks};
use crate::registry::StateRegistry;
use crate::validation::violations::RegistrationViolation;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of checking a registration request.
pub type RegistrationCheck = Validation<(), NonEmptyVec<RegistrationViolation>>;

/// Check a registration request against every rule, accumulating ALL
/// violations instead of stopping at the first one.
///
/// Rules:
/// - the name must not be empty after trimming,
/// - the trimmed name must not resolve to an existing state,
/// - at least one callback must be present.
pub fn validate_registration(
    name: &str,
    callbacks: &Callbacks,
    registry: &StateRegistry,
) -> RegistrationCheck {
    let mut checks: Vec<RegistrationCheck> = Vec::new();

    match trim_name(name) {
        None => checks.push(Validation::fail(RegistrationViolation::EmptyName)),
        Some(trimmed) if registry.contains(trimmed) => {
            checks.push(Validation::fail(RegistrationViolation::Duplicate {
                name: trimmed.to_string(),
            }))
        }
        Some(_) => checks.push(Validation::success(())),
    }

    let has_callbacks = if callbacks.is_empty() {
        Validation::fail(RegistrationViolation::NoCallbacks)
    } else {
        Validation::success(())
    };
    checks.push(has_callbacks);

    Validation::all_vec(checks).map(|_| ())
}

/// Flatten a failed check into a plain list, preserving order.
pub fn violations_of(check: RegistrationCheck) -> Vec<RegistrationViolation> {
    match check {
        Validation::Success(_) => Vec::new(),
        Validation::Failure(errors) => errors.iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(names: &[&str]) -> StateRegistry {
        let mut registry = StateRegistry::new();
        for name in names {
            registry.insert(name, Callbacks::new().on_draw(|| {})).unwrap();
        }
        registry
    }

    #[test]
    fn valid_request_passes() {
        let registry = registry_with(&[]);
        let check = validate_registration("Menu", &Callbacks::new().on_exit(|| {}), &registry);
        assert!(check.is_success());
    }

    #[test]
    fn accumulates_all_violations() {
        let registry = registry_with(&[]);
        let check = validate_registration("   ", &Callbacks::new(), &registry);

        match check {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, RegistrationViolation::EmptyName)));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, RegistrationViolation::NoCallbacks)));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn duplicate_detection_trims_input() {
        let registry = registry_with(&["Menu"]);
        let check = validate_registration(" Menu\t", &Callbacks::new().on_draw(|| {}), &registry);

        assert_eq!(
            violations_of(check),
            vec![RegistrationViolation::Duplicate {
                name: "Menu".to_string()
            }]
        );
    }

    #[test]
    fn duplicate_with_no_callbacks_reports_both() {
        let registry = registry_with(&["Menu"]);
        let violations = violations_of(validate_registration("Menu", &Callbacks::new(), &registry));

        assert_eq!(violations.len(), 2);
        assert!(violations[0].is_duplicate());
        assert_eq!(violations[1], RegistrationViolation::NoCallbacks);
    }

    #[test]
    fn distinct_name_is_not_duplicate() {
        let registry = registry_with(&["Menu"]);
        let check = validate_registration("Main Menu", &Callbacks::new().on_draw(|| {}), &registry);
        assert!(check.is_success());
    }

    #[test]
    fn violations_of_success_is_empty() {
        let registry = registry_with(&[]);
        let check = validate_registration("A", &Callbacks::new().on_draw(|| {}), &registry);
        assert!(violations_of(check).is_empty());
    }
}
