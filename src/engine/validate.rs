//! Structural checks run once, when a machine or template is assembled.
//!
//! Each check yields a `Validation` so that every violation is gathered
//! before [`finish`] turns the outcome into a `BuildError`.

use crate::builder::{BuildError, StructureError};
use crate::core::{Symbol, NONE};
use crate::engine::Machine;
use std::collections::{HashMap, HashSet};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub(crate) type Check = Validation<(), NonEmptyVec<StructureError>>;

/// Reject every `(from, event)` key that appears more than once.
///
/// A key repeated several times is reported once.
pub(crate) fn check_links<S: Symbol, E: Symbol>(keys: &[(S, E)]) -> Check {
    let mut seen: HashMap<(S, E), usize> = HashMap::new();
    let mut checks: Vec<Check> = Vec::new();

    for key in keys {
        let count = seen.entry(*key).or_insert(0);
        *count += 1;
        let check = if *count == 2 {
            Validation::fail(StructureError::DuplicateLink {
                from: key.0.name().to_string(),
                event: key.1.name().to_string(),
            })
        } else {
            Validation::success(())
        };
        checks.push(check);
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Reject linked symbols that have no index in their set.
///
/// A hand-written [`Symbol`] whose `ALL` omits a variant would leave every
/// tag set to that variant unset. Each missing symbol is reported once.
pub(crate) fn check_symbols<S: Symbol, E: Symbol>(states: &[S], events: &[E]) -> Check {
    let mut reported: HashSet<&'static str> = HashSet::new();
    let names = states
        .iter()
        .filter(|s| s.index() == NONE)
        .map(|s| s.name())
        .chain(events.iter().filter(|e| e.index() == NONE).map(|e| e.name()));

    let checks: Vec<Check> = names
        .filter(|name| reported.insert(*name))
        .map(|name| {
            Validation::fail(StructureError::UndeclaredSymbol {
                name: name.to_string(),
            })
        })
        .collect();

    Validation::all_vec(checks).map(|_| ())
}

/// Reject states registered twice and registered states no link mentions.
pub(crate) fn check_states<S: Symbol>(registered: &[S], linked: &[S]) -> Check {
    let linked: HashSet<S> = linked.iter().copied().collect();
    let mut seen: HashSet<S> = HashSet::new();
    let mut checks: Vec<Check> = Vec::new();

    for state in registered {
        if !seen.insert(*state) {
            checks.push(Validation::fail(StructureError::DuplicateState {
                state: state.name().to_string(),
            }));
            continue;
        }
        let check = if linked.contains(state) {
            Validation::success(())
        } else {
            Validation::fail(StructureError::UnlinkedState {
                state: state.name().to_string(),
            })
        };
        checks.push(check);
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Require `begin` and `end` to be states of `machine` with `end` reachable from `begin`.
pub(crate) fn check_route<S: Symbol, E: Symbol, D>(
    machine: &Machine<S, E, D>,
    begin: S,
    end: S,
) -> Check {
    let known_begin = machine.contains_state(begin);
    let known_end = machine.contains_state(end);
    let mut checks: Vec<Check> = Vec::new();

    if !known_begin {
        checks.push(Validation::fail(StructureError::UnknownBegin {
            state: begin.name().to_string(),
        }));
    }
    if !known_end {
        checks.push(Validation::fail(StructureError::UnknownEnd {
            state: end.name().to_string(),
        }));
    }
    if known_begin && known_end && !machine.reaches(begin, end) {
        checks.push(Validation::fail(StructureError::Unreachable {
            begin: begin.name().to_string(),
            end: end.name().to_string(),
        }));
    }

    Validation::all_vec(checks).map(|_| ())
}

/// Collapse accumulated checks into a build result.
pub(crate) fn finish(checks: Vec<Check>) -> Result<(), BuildError> {
    match Validation::all_vec(checks) {
        Validation::Success(_) => Ok(()),
        Validation::Failure(errors) => {
            let violations: Vec<StructureError> = errors.iter().cloned().collect();
            tracing::debug!(count = violations.len(), "definition rejected");
            Err(BuildError::Invalid(violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols;
    use serde::{Deserialize, Serialize};

    symbols! {
        enum TestState {
            A,
            B,
            C,
        }
    }

    symbols! {
        enum TestEvent {
            X,
            Y,
        }
    }

    #[test]
    fn unique_keys_pass() {
        let keys = [
            (TestState::A, TestEvent::X),
            (TestState::A, TestEvent::Y),
            (TestState::B, TestEvent::X),
        ];
        assert!(check_links(&keys).is_success());
    }

    #[test]
    fn repeated_key_is_reported_once() {
        let keys = [
            (TestState::A, TestEvent::X),
            (TestState::A, TestEvent::X),
            (TestState::A, TestEvent::X),
        ];

        match check_links(&keys) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                assert!(errors
                    .iter()
                    .all(|e| matches!(e, StructureError::DuplicateLink { .. })));
            }
            Validation::Success(_) => panic!("Expected failure, got success"),
        }
    }

    #[test]
    fn state_checks_accumulate() {
        let registered = [TestState::A, TestState::A, TestState::C];
        let linked = [TestState::A, TestState::B];

        match check_states(&registered, &linked) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 2);
                let has_duplicate = errors
                    .iter()
                    .any(|e| matches!(e, StructureError::DuplicateState { .. }));
                let has_unlinked = errors
                    .iter()
                    .any(|e| matches!(e, StructureError::UnlinkedState { .. }));
                assert!(has_duplicate);
                assert!(has_unlinked);
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn finish_maps_failures_to_build_error() {
        let result = finish(vec![
            check_links(&[(TestState::B, TestEvent::Y), (TestState::B, TestEvent::Y)]),
            check_states(&[TestState::C], &[TestState::B]),
        ]);

        let err = result.unwrap_err();
        assert_eq!(err.violations().len(), 2);
    }

    /// `ALL` leaves out `Shut`.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum Gate {
        Open,
        Shut,
    }

    impl Symbol for Gate {
        const ALL: &'static [Self] = &[Self::Open];

        fn name(&self) -> &'static str {
            match self {
                Self::Open => "Open",
                Self::Shut => "Shut",
            }
        }
    }

    #[test]
    fn undeclared_symbols_are_reported_once() {
        let states = [Gate::Shut, Gate::Open, Gate::Shut];
        let events = [TestEvent::X];

        match check_symbols(&states, &events) {
            Validation::Failure(errors) => {
                let errors: Vec<StructureError> = errors.iter().cloned().collect();
                assert_eq!(
                    errors,
                    vec![StructureError::UndeclaredSymbol {
                        name: "Shut".to_string()
                    }]
                );
            }
            Validation::Success(_) => panic!("Expected failure, got success"),
        }
    }

    #[test]
    fn declared_symbols_pass() {
        assert!(check_symbols(&[TestState::A, TestState::C], &[TestEvent::Y]).is_success());
    }

    #[test]
    fn finish_accepts_empty_checks() {
        assert!(finish(Vec::new()).is_ok());
    }
}
