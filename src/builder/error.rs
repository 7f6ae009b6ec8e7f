//! Build errors for the definition builder.

use std::fmt::Debug;
use thiserror::Error;

/// Errors that can occur when declaring states and transitions.
///
/// The builder fails fast: the offending declaration is not applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError<S: Debug> {
    #[error("State {0:?} is already declared in this definition")]
    DuplicateState(S),

    #[error("Parent state {0:?} is not declared. Declare it before adding substates")]
    UnknownParent(S),

    #[error("Transition target {0:?} is not declared. Declare it before targeting it")]
    UnknownTarget(S),

    #[error("State {0:?} is not declared")]
    UnknownState(S),
}
