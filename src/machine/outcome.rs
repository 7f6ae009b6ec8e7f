//! Results of dispatching an event.

use crate::core::{ActionError, State};
use std::fmt;

/// Step of the dispatch during which a guard or an action failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// A guard failed while resolving the transition
    Guard,
    /// An exit action failed
    Exit,
    /// The action of an external transition failed
    Action,
    /// The action of a local transition failed
    LocalAction,
    /// An entry action failed
    Entry,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Guard => "guard",
            Self::Exit => "exit action",
            Self::Action => "transition action",
            Self::LocalAction => "local transition action",
            Self::Entry => "entry action",
        };
        f.write_str(name)
    }
}

/// A guard or action failure caught during dispatch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatchFailure<S> {
    /// Where the failure happened
    pub phase: Phase,
    /// The state owning the failing guard or action
    pub state: S,
    /// What the guard or action reported
    pub error: ActionError,
}

impl<S> DispatchFailure<S> {
    /// Whether the failure happened before the active chain or the history
    /// were touched.
    ///
    /// Guard failures and local action failures leave the machine as it was;
    /// any other failure interrupts a transition midway.
    pub fn leaves_consistent(&self) -> bool {
        matches!(self.phase, Phase::Guard | Phase::LocalAction)
    }
}

impl<S: State> fmt::Display for DispatchFailure<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} of state {} failed: {}",
            self.phase,
            self.state.name(),
            self.error
        )
    }
}

/// What happened to one fired event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<S> {
    /// No transition of the active chain matched; nothing ran
    Ignored,
    /// A local transition of `state` ran its action
    Local { state: S },
    /// An external transition completed
    Transitioned {
        /// The state declaring the transition
        source: S,
        /// The declared target
        target: S,
        /// Active leaf before the transition
        from: S,
        /// Active leaf after the transition
        to: S,
    },
    /// A guard or an action failed and the dispatch stopped
    Failed(DispatchFailure<S>),
}

impl<S> Outcome<S> {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn failure(&self) -> Option<&DispatchFailure<S>> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::state_enum! {
        enum TestState {
            Off,
        }
    }

    fn failure(phase: Phase) -> DispatchFailure<TestState> {
        DispatchFailure {
            phase,
            state: TestState::Off,
            error: ActionError::new("boom"),
        }
    }

    #[test]
    fn guard_and_local_failures_leave_machine_consistent() {
        assert!(failure(Phase::Guard).leaves_consistent());
        assert!(failure(Phase::LocalAction).leaves_consistent());
        assert!(!failure(Phase::Exit).leaves_consistent());
        assert!(!failure(Phase::Action).leaves_consistent());
        assert!(!failure(Phase::Entry).leaves_consistent());
    }

    #[test]
    fn failure_displays_phase_and_state() {
        assert_eq!(
            failure(Phase::Entry).to_string(),
            "entry action of state Off failed: boom"
        );
    }

    #[test]
    fn outcome_exposes_failure() {
        let outcome = Outcome::Failed(failure(Phase::Exit));
        assert!(outcome.is_failed());
        assert_eq!(outcome.failure().map(|f| f.phase), Some(Phase::Exit));
        assert!(Outcome::<TestState>::Ignored.is_ignored());
    }
}
