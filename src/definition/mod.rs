//! Immutable state tree shared by machine instances.
//!
//! A [`Definition`] is produced once by the
//! [`DefinitionBuilder`](crate::builder::DefinitionBuilder) and never changes
//! afterwards. Cloning it only clones a reference to the shared tree, so one
//! definition can back any number of machines, on any number of threads.

mod transition;
pub(crate) mod tree;

pub use transition::Transition;

pub(crate) use transition::Kind;
pub(crate) use tree::{Tree, ROOT};

use crate::core::{Action, State};
use std::fmt;
use std::sync::Arc;

/// The declared state tree: a root state and all its descendants.
pub struct Definition<S, E, O> {
    pub(crate) tree: Arc<Tree<S, E, O>>,
}

impl<S, E, O> Clone for Definition<S, E, O> {
    fn clone(&self) -> Self {
        Self {
            tree: Arc::clone(&self.tree),
        }
    }
}

impl<S: State, E, O> Definition<S, E, O> {
    pub(crate) fn new(tree: Tree<S, E, O>) -> Self {
        Self {
            tree: Arc::new(tree),
        }
    }

    pub fn root(&self) -> StateRef<'_, S, E, O> {
        StateRef::new(&self.tree, ROOT)
    }

    /// Look up a state by id.
    pub fn state(&self, id: S) -> Option<StateRef<'_, S, E, O>> {
        self.tree.find(id).map(|index| StateRef::new(&self.tree, index))
    }

    /// All states in declaration order, root first.
    pub fn states(&self) -> impl Iterator<Item = StateRef<'_, S, E, O>> + '_ {
        (0..self.tree.len()).map(move |index| StateRef::new(&self.tree, index))
    }

    /// Number of states, root included.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

impl<S: State, E, O> fmt::Debug for Definition<S, E, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("root", &self.root().id())
            .field("states", &self.len())
            .finish()
    }
}

/// Read-only view of one state of a [`Definition`].
pub struct StateRef<'a, S, E, O> {
    tree: &'a Tree<S, E, O>,
    index: usize,
}

impl<S, E, O> Clone for StateRef<'_, S, E, O> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, E, O> Copy for StateRef<'_, S, E, O> {}

impl<'a, S: State, E, O> StateRef<'a, S, E, O> {
    pub(crate) fn new(tree: &'a Tree<S, E, O>, index: usize) -> Self {
        Self { tree, index }
    }

    pub fn id(&self) -> S {
        self.tree.node(self.index).id
    }

    pub fn description(&self) -> Option<&'a str> {
        self.tree.node(self.index).description.as_deref()
    }

    pub fn parent(&self) -> Option<StateRef<'a, S, E, O>> {
        self.tree
            .node(self.index)
            .parent
            .map(|parent| StateRef::new(self.tree, parent))
    }

    pub fn substates(&self) -> impl Iterator<Item = StateRef<'a, S, E, O>> + 'a {
        let tree = self.tree;
        tree.node(self.index)
            .children
            .iter()
            .map(move |&child| StateRef::new(tree, child))
    }

    /// The first substate flagged initial, if any.
    pub fn initial_substate(&self) -> Option<StateRef<'a, S, E, O>> {
        self.tree
            .initial_child(self.index)
            .map(|child| StateRef::new(self.tree, child))
    }

    /// Outgoing transitions in declaration order.
    pub fn transitions(&self) -> &'a [Transition<S, E, O>] {
        &self.tree.node(self.index).transitions
    }

    pub fn entry_action(&self) -> Option<&'a Action<O, E>> {
        self.tree.node(self.index).entry.as_ref()
    }

    pub fn exit_action(&self) -> Option<&'a Action<O, E>> {
        self.tree.node(self.index).exit.as_ref()
    }

    pub fn is_initial(&self) -> bool {
        self.tree.node(self.index).initial
    }

    pub fn has_history(&self) -> bool {
        self.tree.node(self.index).history
    }

    pub fn is_root(&self) -> bool {
        self.index == ROOT
    }

    pub fn is_composite(&self) -> bool {
        self.tree.node(self.index).is_composite()
    }

    pub fn is_leaf(&self) -> bool {
        !self.is_composite()
    }

    /// A leaf without outgoing transitions.
    pub fn is_final(&self) -> bool {
        self.is_leaf() && self.transitions().is_empty()
    }

    /// Distance from the root; the root has depth zero.
    pub fn depth(&self) -> usize {
        self.tree.depth(self.index)
    }
}

impl<S: State, E, O> fmt::Debug for StateRef<'_, S, E, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateRef").field("id", &self.id()).finish()
    }
}
