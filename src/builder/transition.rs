//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Action, ActionResult, Event, Guard, State};
use crate::definition::{Transition, Tree};

/// Pending external transition waiting for its target.
pub struct TargetBuilder<'a, S, E, O> {
    tree: &'a mut Tree<S, E, O>,
    source: usize,
    event: E,
}

impl<'a, S: State, E, O> TargetBuilder<'a, S, E, O> {
    pub(crate) fn new(tree: &'a mut Tree<S, E, O>, source: usize, event: E) -> Self {
        Self {
            tree,
            source,
            event,
        }
    }

    /// Set the target state, which must already be declared.
    pub fn to(self, target: S) -> Result<TransitionBuilder<'a, S, E, O>, BuildError<S>> {
        let index = self
            .tree
            .find(target)
            .ok_or(BuildError::UnknownTarget(target))?;
        let source = self.tree.node(self.source).id;
        let transition = Transition::external(source, self.event, target, index);
        Ok(TransitionBuilder::push(self.tree, self.source, transition))
    }
}

/// Fluent access to a declared transition: guard, action and description.
pub struct TransitionBuilder<'a, S, E, O> {
    transition: &'a mut Transition<S, E, O>,
}

impl<'a, S: State, E, O> TransitionBuilder<'a, S, E, O> {
    pub(crate) fn push(
        tree: &'a mut Tree<S, E, O>,
        source: usize,
        transition: Transition<S, E, O>,
    ) -> Self {
        let transitions = &mut tree.node_mut(source).transitions;
        transitions.push(transition);
        let position = transitions.len() - 1;
        Self {
            transition: &mut transitions[position],
        }
    }

    /// Add a guard predicate.
    pub fn only_if<F>(self, predicate: F) -> Self
    where
        F: Fn(&O, &Event<E>) -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(predicate))
    }

    pub fn only_if_described<F>(self, predicate: F, description: impl Into<String>) -> Self
    where
        F: Fn(&O, &Event<E>) -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(predicate).described(description))
    }

    /// Add a prebuilt guard, for instance a fallible one.
    pub fn guard(self, guard: Guard<O, E>) -> Self {
        self.transition.guard = Some(guard);
        self
    }

    /// Set the action run when the transition is taken.
    pub fn execute<F>(self, action: F) -> Self
    where
        F: Fn(&mut O, &Event<E>) -> ActionResult + Send + Sync + 'static,
    {
        self.action(Action::on_event(action))
    }

    pub fn execute_described<F>(self, action: F, description: impl Into<String>) -> Self
    where
        F: Fn(&mut O, &Event<E>) -> ActionResult + Send + Sync + 'static,
    {
        self.action(Action::on_event(action).described(description))
    }

    pub fn action(self, action: Action<O, E>) -> Self {
        self.transition.action = Some(action);
        self
    }

    pub fn description(self, description: impl Into<String>) -> Self {
        self.transition.description = Some(description.into());
        self
    }
}
