//! Builder for one declared state.

use crate::builder::error::BuildError;
use crate::builder::transition::{TargetBuilder, TransitionBuilder};
use crate::core::{Action, ActionResult, Event, State};
use crate::definition::{Transition, Tree};

/// Fluent access to a declared state.
///
/// Obtained from [`DefinitionBuilder`](crate::builder::DefinitionBuilder);
/// every method either refines the state or moves on to a substate or to one
/// of its transitions.
pub struct StateBuilder<'a, S, E, O> {
    tree: &'a mut Tree<S, E, O>,
    index: usize,
}

impl<'a, S: State, E, O> StateBuilder<'a, S, E, O> {
    pub(crate) fn new(tree: &'a mut Tree<S, E, O>, index: usize) -> Self {
        Self { tree, index }
    }

    pub fn id(&self) -> S {
        self.tree.node(self.index).id
    }

    /// Declare a substate of this state and continue with it.
    pub fn add(self, id: S) -> Result<StateBuilder<'a, S, E, O>, BuildError<S>> {
        if self.tree.find(id).is_some() {
            return Err(BuildError::DuplicateState(id));
        }
        let index = self.tree.push(id, self.index);
        Ok(StateBuilder::new(self.tree, index))
    }

    pub fn description(self, description: impl Into<String>) -> Self {
        self.tree.node_mut(self.index).description = Some(description.into());
        self
    }

    /// Mark this state as the initial substate of its parent.
    pub fn is_initial(self) -> Self {
        self.tree.node_mut(self.index).initial = true;
        self
    }

    /// Remember the active descendants of this state when it is exited.
    pub fn has_history(self) -> Self {
        self.tree.node_mut(self.index).history = true;
        self
    }

    /// Set the entry action. Its event is `None` when the state is entered
    /// by a reset.
    pub fn on_entry<F>(self, action: F) -> Self
    where
        F: Fn(&mut O, Option<&Event<E>>) -> ActionResult + Send + Sync + 'static,
    {
        self.entry_action(Action::new(action))
    }

    pub fn on_entry_described<F>(self, action: F, description: impl Into<String>) -> Self
    where
        F: Fn(&mut O, Option<&Event<E>>) -> ActionResult + Send + Sync + 'static,
    {
        self.entry_action(Action::new(action).described(description))
    }

    pub fn entry_action(self, action: Action<O, E>) -> Self {
        self.tree.node_mut(self.index).entry = Some(action);
        self
    }

    pub fn on_exit<F>(self, action: F) -> Self
    where
        F: Fn(&mut O, Option<&Event<E>>) -> ActionResult + Send + Sync + 'static,
    {
        self.exit_action(Action::new(action))
    }

    pub fn on_exit_described<F>(self, action: F, description: impl Into<String>) -> Self
    where
        F: Fn(&mut O, Option<&Event<E>>) -> ActionResult + Send + Sync + 'static,
    {
        self.exit_action(Action::new(action).described(description))
    }

    pub fn exit_action(self, action: Action<O, E>) -> Self {
        self.tree.node_mut(self.index).exit = Some(action);
        self
    }

    /// Start an external transition triggered by `event`.
    ///
    /// Transitions of one state are tried in declaration order.
    pub fn on(self, event: E) -> TargetBuilder<'a, S, E, O> {
        TargetBuilder::new(self.tree, self.index, event)
    }

    /// Declare a local transition: its action runs without exiting or
    /// entering any state.
    pub fn on_local(self, event: E) -> TransitionBuilder<'a, S, E, O> {
        let source = self.id();
        TransitionBuilder::push(self.tree, self.index, Transition::local(source, event))
    }
}
