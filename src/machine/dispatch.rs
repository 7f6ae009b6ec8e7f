//! Transition resolution and execution over one machine's active chain.
//!
//! A dispatch borrows the parts of a machine it mutates, runs synchronously
//! to completion and reports what happened as an [`Outcome`]. Guard and
//! action failures stop the dispatch where they occur; nothing is rolled
//! back. A guard or action that panics fails the same way as one returning
//! an [`ActionError`].

use crate::core::{ActionError, Event, State};
use crate::definition::{Kind, Transition, Tree, ROOT};
use crate::machine::outcome::{DispatchFailure, Outcome, Phase};
use std::any::Any;
use std::collections::HashMap;
use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

type Step<S> = Result<(), DispatchFailure<S>>;

/// Run a host guard or action on behalf of `state`. A returned error and a
/// panic both become a failure in `phase`.
fn host_call<S, T>(
    phase: Phase,
    state: S,
    call: impl FnOnce() -> Result<T, ActionError>,
) -> Result<T, DispatchFailure<S>> {
    let result = panic::catch_unwind(AssertUnwindSafe(call))
        .unwrap_or_else(|payload| Err(ActionError::new(panic_message(payload.as_ref()))));
    result.map_err(|error| DispatchFailure {
        phase,
        state,
        error,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    let detail = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str));
    match detail {
        Some(detail) => format!("panicked: {detail}"),
        None => "panicked".to_string(),
    }
}

pub(crate) struct Dispatch<'m, S, E, O> {
    tree: &'m Tree<S, E, O>,
    owner: &'m mut O,
    active: &'m mut Vec<usize>,
    history: &'m mut HashMap<usize, Vec<usize>>,
    event: Option<&'m Event<E>>,
    machine: &'m str,
}

impl<'m, S: State, E: PartialEq + Debug, O> Dispatch<'m, S, E, O> {
    pub(crate) fn new(
        tree: &'m Tree<S, E, O>,
        owner: &'m mut O,
        active: &'m mut Vec<usize>,
        history: &'m mut HashMap<usize, Vec<usize>>,
        machine: &'m str,
    ) -> Self {
        Self {
            tree,
            owner,
            active,
            history,
            event: None,
            machine,
        }
    }

    /// Discard history and the active chain, then enter the root and descend
    /// through the initial substates.
    pub(crate) fn reset(mut self) -> Step<S> {
        self.history.clear();
        self.active.clear();
        self.enter(ROOT)?;
        self.complete(ROOT, None)
    }

    /// Dispatch `event` against the active chain.
    pub(crate) fn fire(mut self, event: &'m Event<E>) -> Outcome<S> {
        self.event = Some(event);

        let (source, transition) = match self.resolve(event) {
            Ok(Some(found)) => found,
            Ok(None) => {
                debug!(
                    machine = self.machine,
                    event = ?event.kind(),
                    "no transition matched"
                );
                return Outcome::Ignored;
            }
            Err(failure) => return Outcome::Failed(failure),
        };

        let result = match transition.kind {
            Kind::Local => self.local(source, transition),
            Kind::External { index, .. } => self.external(source, index, transition),
        };
        result.unwrap_or_else(Outcome::Failed)
    }

    /// Find the transition to take: innermost state first, then each state's
    /// transitions in declaration order. The first one whose event matches
    /// and whose guard is absent or true wins.
    ///
    /// A failing guard ends the search.
    fn resolve(
        &self,
        event: &Event<E>,
    ) -> Result<Option<(usize, &'m Transition<S, E, O>)>, DispatchFailure<S>> {
        let tree = self.tree;
        for &index in self.active.iter().rev() {
            let node = tree.node(index);
            let candidates = node
                .transitions
                .iter()
                .filter(|transition| transition.event == *event.kind());
            for transition in candidates {
                let allowed = match &transition.guard {
                    Some(guard) => {
                        host_call(Phase::Guard, node.id, || guard.check(&*self.owner, event))?
                    }
                    None => true,
                };
                if allowed {
                    return Ok(Some((index, transition)));
                }
            }
        }
        Ok(None)
    }

    fn local(
        &mut self,
        source: usize,
        transition: &Transition<S, E, O>,
    ) -> Result<Outcome<S>, DispatchFailure<S>> {
        let state = self.tree.node(source).id;
        self.run_transition_action(transition, state, Phase::LocalAction)?;
        debug!(
            machine = self.machine,
            state = state.name(),
            "local transition executed"
        );
        Ok(Outcome::Local { state })
    }

    fn external(
        &mut self,
        source: usize,
        target: usize,
        transition: &Transition<S, E, O>,
    ) -> Result<Outcome<S>, DispatchFailure<S>> {
        let source_id = self.tree.node(source).id;
        let target_id = self.tree.node(target).id;
        let from = self.leaf();
        let lca = self.tree.least_common_ancestor(source, target);

        self.exit_to(lca)?;
        self.run_transition_action(transition, source_id, Phase::Action)?;

        let restore = if self.tree.node(target).history {
            self.history.remove(&target)
        } else {
            None
        };
        self.enter_path(lca, target)?;
        self.complete(target, restore)?;

        let to = self.leaf();
        debug!(
            machine = self.machine,
            source = source_id.name(),
            target = target_id.name(),
            from = from.name(),
            to = to.name(),
            "transition executed"
        );
        Ok(Outcome::Transitioned {
            source: source_id,
            target: target_id,
            from,
            to,
        })
    }

    /// Exit states from the leaf up to, but excluding, `lca`. Once its exit
    /// action succeeded, a history state records the chain that was active
    /// below it.
    fn exit_to(&mut self, lca: usize) -> Step<S> {
        let snapshot = self.active.clone();
        while let Some(&index) = self.active.last() {
            if index == lca || index == ROOT {
                break;
            }
            let node = self.tree.node(index);
            if let Some(exit) = &node.exit {
                host_call(Phase::Exit, node.id, || exit.run(&mut *self.owner, self.event))?;
            }
            if node.history {
                let below = snapshot[self.active.len()..].to_vec();
                if !below.is_empty() {
                    self.history.insert(index, below);
                }
            }
            self.active.pop();
            debug!(machine = self.machine, state = node.id.name(), "exited state");
        }
        Ok(())
    }

    /// Enter the states below `lca` down to `target`, outermost first.
    fn enter_path(&mut self, lca: usize, target: usize) -> Step<S> {
        let path = self.tree.path_to(target);
        let start = path
            .iter()
            .position(|&index| index == lca)
            .map_or(0, |position| position + 1);
        for &index in &path[start..] {
            self.enter(index)?;
        }
        Ok(())
    }

    /// Finish entering `target`: restore the recorded chain if there is one,
    /// then follow initial substates until a leaf is active.
    fn complete(&mut self, target: usize, restore: Option<Vec<usize>>) -> Step<S> {
        let mut current = target;
        if let Some(chain) = restore {
            debug!(
                machine = self.machine,
                state = self.tree.node(target).id.name(),
                depth = chain.len(),
                "restoring history"
            );
            for index in chain {
                self.enter(index)?;
                current = index;
            }
        }

        while self.tree.node(current).is_composite() {
            match self.tree.initial_child(current) {
                Some(child) => {
                    self.enter(child)?;
                    current = child;
                }
                None => {
                    warn!(
                        machine = self.machine,
                        state = self.tree.node(current).id.name(),
                        "composite state has no initial substate, descent stops"
                    );
                    break;
                }
            }
        }
        Ok(())
    }

    /// Enter one state. Entering a state discards what its history recorded.
    fn enter(&mut self, index: usize) -> Step<S> {
        let node = self.tree.node(index);
        self.history.remove(&index);
        if let Some(entry) = &node.entry {
            host_call(Phase::Entry, node.id, || entry.run(&mut *self.owner, self.event))?;
        }
        self.active.push(index);
        debug!(machine = self.machine, state = node.id.name(), "entered state");
        Ok(())
    }

    fn run_transition_action(
        &mut self,
        transition: &Transition<S, E, O>,
        state: S,
        phase: Phase,
    ) -> Step<S> {
        match &transition.action {
            Some(action) => host_call(phase, state, || action.run(&mut *self.owner, self.event)),
            None => Ok(()),
        }
    }

    fn leaf(&self) -> S {
        let index = self.active.last().copied().unwrap_or(ROOT);
        self.tree.node(index).id
    }
}
