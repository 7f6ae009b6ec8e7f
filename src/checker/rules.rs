//! Well-formedness rules over a definition.

use crate::checker::violations::Violation;
use crate::core::State;
use crate::definition::{Definition, Kind, Tree};
use std::collections::HashMap;

/// Type alias for rule functions.
pub type Rule<S, E, O> = fn(&Definition<S, E, O>) -> Vec<Violation<S>>;

/// All rules, in reporting order.
pub fn rules<S: State, E, O>() -> [Rule<S, E, O>; 3] {
    [
        check_state_id_used_once,
        check_state_has_at_most_one_initial_state,
        check_state_with_afferent_transition_has_initial_state,
    ]
}

/// Every state id must label exactly one node.
pub fn check_state_id_used_once<S: State, E, O>(
    definition: &Definition<S, E, O>,
) -> Vec<Violation<S>> {
    let mut order = Vec::new();
    let mut counts: HashMap<S, usize> = HashMap::new();
    for node in definition.tree.nodes() {
        let count = counts.entry(node.id).or_insert(0);
        if *count == 0 {
            order.push(node.id);
        }
        *count += 1;
    }

    order
        .into_iter()
        .filter_map(|state| match counts[&state] {
            count if count > 1 => Some(Violation::DuplicateStateId { state, count }),
            _ => None,
        })
        .collect()
}

/// A composite state has at most one initial substate.
pub fn check_state_has_at_most_one_initial_state<S: State, E, O>(
    definition: &Definition<S, E, O>,
) -> Vec<Violation<S>> {
    let tree = &definition.tree;
    (0..tree.len())
        .filter_map(|index| {
            let initials = initial_substates(tree, index);
            (initials.len() > 1).then(|| Violation::MultipleInitialStates {
                state: tree.node(index).id,
                initials,
            })
        })
        .collect()
}

/// A composite state targeted by a transition declares exactly one initial
/// substate, so entering it always descends to a leaf.
pub fn check_state_with_afferent_transition_has_initial_state<S: State, E, O>(
    definition: &Definition<S, E, O>,
) -> Vec<Violation<S>> {
    let tree = &definition.tree;
    let mut targets: Vec<usize> = Vec::new();
    for node in tree.nodes() {
        for transition in &node.transitions {
            if let Kind::External { index, .. } = transition.kind {
                if !targets.contains(&index) {
                    targets.push(index);
                }
            }
        }
    }

    targets
        .into_iter()
        .filter(|&index| tree.node(index).is_composite())
        .filter_map(|index| {
            let initials = initial_substates(tree, index);
            (initials.len() != 1).then(|| Violation::TargetWithoutInitialState {
                state: tree.node(index).id,
                initials,
            })
        })
        .collect()
}

fn initial_substates<S: State, E, O>(tree: &Tree<S, E, O>, index: usize) -> Vec<S> {
    tree.node(index)
        .children
        .iter()
        .map(|&child| tree.node(child))
        .filter(|child| child.initial)
        .map(|child| child.id)
        .collect()
}
