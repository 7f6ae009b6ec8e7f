//! Arena holding the nodes of a state tree.
//!
//! Nodes are addressed by index. Each node owns the indices of its
//! substates and keeps a non-owning index to its parent. The root is always
//! at index `ROOT`.

use super::transition::Transition;
use crate::core::{Action, State};
use std::collections::HashMap;

pub(crate) const ROOT: usize = 0;

pub(crate) struct Node<S, E, O> {
    pub(crate) id: S,
    pub(crate) description: Option<String>,
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
    pub(crate) initial: bool,
    pub(crate) history: bool,
    pub(crate) entry: Option<Action<O, E>>,
    pub(crate) exit: Option<Action<O, E>>,
    pub(crate) transitions: Vec<Transition<S, E, O>>,
}

impl<S: State, E, O> Node<S, E, O> {
    pub(crate) fn new(id: S, parent: Option<usize>) -> Self {
        Self {
            id,
            description: None,
            parent,
            children: Vec::new(),
            initial: false,
            history: false,
            entry: None,
            exit: None,
            transitions: Vec::new(),
        }
    }

    pub(crate) fn is_composite(&self) -> bool {
        !self.children.is_empty()
    }
}

pub(crate) struct Tree<S, E, O> {
    nodes: Vec<Node<S, E, O>>,
    index: HashMap<S, usize>,
}

impl<S: State, E, O> Tree<S, E, O> {
    pub(crate) fn new(root: S) -> Self {
        Self {
            nodes: vec![Node::new(root, None)],
            index: HashMap::from([(root, ROOT)]),
        }
    }

    /// Append a node under `parent` without checking id uniqueness.
    ///
    /// The index keeps the first node carrying a given id.
    pub(crate) fn push(&mut self, id: S, parent: usize) -> usize {
        let position = self.nodes.len();
        self.nodes.push(Node::new(id, Some(parent)));
        self.nodes[parent].children.push(position);
        self.index.entry(id).or_insert(position);
        position
    }

    pub(crate) fn find(&self, id: S) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub(crate) fn node(&self, index: usize) -> &Node<S, E, O> {
        &self.nodes[index]
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut Node<S, E, O> {
        &mut self.nodes[index]
    }

    pub(crate) fn nodes(&self) -> &[Node<S, E, O>] {
        &self.nodes
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Indices from the root down to `index`, both inclusive.
    pub(crate) fn path_to(&self, index: usize) -> Vec<usize> {
        let mut path = vec![index];
        let mut current = index;
        while let Some(parent) = self.nodes[current].parent {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }

    pub(crate) fn depth(&self, index: usize) -> usize {
        self.path_to(index).len() - 1
    }

    /// First substate flagged initial.
    pub(crate) fn initial_child(&self, index: usize) -> Option<usize> {
        self.nodes[index]
            .children
            .iter()
            .copied()
            .find(|&child| self.nodes[child].initial)
    }

    /// Deepest state that is a proper ancestor of both `source` and
    /// `target`, clamped to the root.
    ///
    /// For a self-transition this is the parent of the source, so the
    /// source itself is exited and re-entered.
    pub(crate) fn least_common_ancestor(&self, source: usize, target: usize) -> usize {
        let source_path = self.path_to(source);
        let target_path = self.path_to(target);
        let source_ancestors = &source_path[..source_path.len() - 1];
        let target_ancestors = &target_path[..target_path.len() - 1];

        source_ancestors
            .iter()
            .zip(target_ancestors)
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| *a)
            .last()
            .unwrap_or(ROOT)
    }
}
