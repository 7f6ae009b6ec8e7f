//! Transitions owned by a state node.

use crate::core::{Action, Guard, State};
use std::fmt;

/// What a transition does to the active chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Kind<S> {
    /// May change the active leaf; `index` addresses the target node.
    External { target: S, index: usize },
    /// Runs its action without exiting or entering any state.
    Local,
}

/// A transition declared on a source state.
///
/// External transitions name a target state; local transitions have none.
/// A transition whose target is its own source is a self-transition, which
/// exits and re-enters the source.
pub struct Transition<S, E, O> {
    pub(crate) source: S,
    pub(crate) event: E,
    pub(crate) kind: Kind<S>,
    pub(crate) guard: Option<Guard<O, E>>,
    pub(crate) action: Option<Action<O, E>>,
    pub(crate) description: Option<String>,
}

impl<S: State, E, O> Transition<S, E, O> {
    pub(crate) fn external(source: S, event: E, target: S, index: usize) -> Self {
        Self::with_kind(source, event, Kind::External { target, index })
    }

    pub(crate) fn local(source: S, event: E) -> Self {
        Self::with_kind(source, event, Kind::Local)
    }

    fn with_kind(source: S, event: E, kind: Kind<S>) -> Self {
        Self {
            source,
            event,
            kind,
            guard: None,
            action: None,
            description: None,
        }
    }

    pub fn source(&self) -> S {
        self.source
    }

    /// The event kind this transition reacts to.
    pub fn event(&self) -> &E {
        &self.event
    }

    /// Target of an external transition, `None` for a local one.
    pub fn target(&self) -> Option<S> {
        match self.kind {
            Kind::External { target, .. } => Some(target),
            Kind::Local => None,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self.kind, Kind::Local)
    }

    pub fn is_self_transition(&self) -> bool {
        self.target() == Some(self.source)
    }

    pub fn guard(&self) -> Option<&Guard<O, E>> {
        self.guard.as_ref()
    }

    pub fn action(&self) -> Option<&Action<O, E>> {
        self.action.as_ref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

impl<S: fmt::Debug, E: fmt::Debug, O> fmt::Debug for Transition<S, E, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("source", &self.source)
            .field("event", &self.event)
            .field("kind", &self.kind)
            .field("guard", &self.guard)
            .field("action", &self.action)
            .field("description", &self.description)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Off,
        On,
    }

    impl State for TestState {
        fn name(&self) -> &str {
            match self {
                Self::Off => "Off",
                Self::On => "On",
            }
        }
    }

    #[test]
    fn external_transition_has_target() {
        let transition: Transition<TestState, &str, ()> =
            Transition::external(TestState::Off, "toggle", TestState::On, 2);

        assert_eq!(transition.target(), Some(TestState::On));
        assert!(!transition.is_local());
        assert!(!transition.is_self_transition());
    }

    #[test]
    fn local_transition_has_no_target() {
        let transition: Transition<TestState, &str, ()> = Transition::local(TestState::On, "tick");

        assert_eq!(transition.target(), None);
        assert!(transition.is_local());
        assert!(!transition.is_self_transition());
    }

    #[test]
    fn self_transition_targets_its_source() {
        let transition: Transition<TestState, &str, ()> =
            Transition::external(TestState::On, "restart", TestState::On, 2);

        assert!(transition.is_self_transition());
    }
}
