//! Violations reported by the static checker.

use std::fmt::Debug;
use thiserror::Error;

/// A well-formedness problem found in a definition.
///
/// Violations are data: the checker returns them, it never fails with them,
/// and a definition with violations can still drive machines.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Violation<S: Debug> {
    #[error("State {state:?} labels {count} nodes; a state id must be used once")]
    DuplicateStateId { state: S, count: usize },

    #[error("State {state:?} has several initial substates: {initials:?}")]
    MultipleInitialStates { state: S, initials: Vec<S> },

    #[error(
        "State {state:?} is a transition target with substates but declares \
         {initials:?} as initial substates; exactly one is required"
    )]
    TargetWithoutInitialState { state: S, initials: Vec<S> },
}

impl<S: Debug + Copy> Violation<S> {
    /// The state the violation is about.
    pub fn state(&self) -> S {
        match self {
            Self::DuplicateStateId { state, .. }
            | Self::MultipleInitialStates { state, .. }
            | Self::TargetWithoutInitialState { state, .. } => *state,
        }
    }
}
