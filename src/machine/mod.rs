//! Running instances of a definition.
//!
//! A [`Machine`] pairs a shared [`Definition`] with an owner object, the
//! chain of active states and the history records. Events are dispatched
//! one at a time through [`Machine::fire`]; every dispatch runs to
//! completion before `fire` returns.
//!
//! # Example
//!
//! ```rust
//! use statechart::builder::DefinitionBuilder;
//! use statechart::machine::Outcome;
//! use statechart::state_enum;
//!
//! state_enum! {
//!     enum Door {
//!         Root,
//!         Closed,
//!         Open,
//!     }
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = DefinitionBuilder::<Door, &str, u32>::new(Door::Root);
//! builder.add_to_root(Door::Closed)?.is_initial();
//! builder.add_to_root(Door::Open)?;
//! builder
//!     .in_state(Door::Closed)?
//!     .on("open")
//!     .to(Door::Open)?
//!     .execute(|openings, _| {
//!         *openings += 1;
//!         Ok(())
//!     });
//! let definition = builder.build();
//!
//! let mut door = definition.machine("front door", 0);
//! assert_eq!(door.active_states(), vec![Door::Root, Door::Closed]);
//!
//! let outcome = door.fire("open")?;
//! assert!(matches!(outcome, Outcome::Transitioned { to: Door::Open, .. }));
//! assert_eq!(*door.context(), 1);
//! assert!(door.fire("open")?.is_ignored());
//! # Ok(())
//! # }
//! ```

mod dispatch;
mod error;
mod outcome;

pub use error::MachineError;
pub use outcome::{DispatchFailure, Outcome, Phase};

use crate::core::{Event, State};
use crate::definition::{Definition, StateRef};
use crate::handlers::{EventHandler, HandlerId};
use dispatch::Dispatch;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

type Handlers<S, E> = Vec<(HandlerId, Box<dyn EventHandler<S, E>>)>;

/// One running instance of a [`Definition`].
pub struct Machine<S, E, O> {
    id: Uuid,
    name: String,
    definition: Definition<S, E, O>,
    owner: O,
    active: Vec<usize>,
    history: HashMap<usize, Vec<usize>>,
    handlers: Handlers<S, E>,
    next_handler: u64,
    alive: bool,
    inconsistency: Option<DispatchFailure<S>>,
}

impl<S: State, E: PartialEq + Debug, O> Definition<S, E, O> {
    /// Create a machine over this definition and reset it.
    ///
    /// A failing entry action during the reset is logged and leaves the
    /// machine inconsistent; see [`Machine::is_consistent`]. Handlers
    /// registered later still see the failure through
    /// [`EventHandler::before_fire`].
    pub fn machine(&self, name: impl Into<String>, owner: O) -> Machine<S, E, O> {
        let mut machine = Machine::new(self.clone(), name, owner);
        if let Err(failure) = machine.reset() {
            warn!(
                machine = machine.name(),
                machine_id = %machine.id(),
                %failure,
                "machine created in an inconsistent state"
            );
        }
        machine
    }
}

impl<S: State, E: PartialEq + Debug, O> Machine<S, E, O> {
    /// Create a machine that is not yet alive. Call [`reset`](Self::reset)
    /// before firing events.
    pub fn new(definition: Definition<S, E, O>, name: impl Into<String>, owner: O) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            definition,
            owner,
            active: Vec::new(),
            history: HashMap::new(),
            handlers: Vec::new(),
            next_handler: 0,
            alive: false,
            inconsistency: None,
        }
    }

    /// Unique id of this instance, used to correlate log lines.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> &Definition<S, E, O> {
        &self.definition
    }

    pub fn root(&self) -> StateRef<'_, S, E, O> {
        self.definition.root()
    }

    /// The owner object guards and actions operate on.
    pub fn context(&self) -> &O {
        &self.owner
    }

    pub fn context_mut(&mut self) -> &mut O {
        &mut self.owner
    }

    pub fn into_context(self) -> O {
        self.owner
    }

    /// Whether the machine was reset at least once.
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// False once an exit, transition or entry action failed midway, until
    /// the next clean reset.
    pub fn is_consistent(&self) -> bool {
        self.inconsistency.is_none()
    }

    /// The failure that left the machine inconsistent, if any.
    pub fn inconsistency(&self) -> Option<&DispatchFailure<S>> {
        self.inconsistency.as_ref()
    }

    /// Active states from the root down to the innermost one.
    pub fn active_states(&self) -> Vec<S> {
        let tree = &self.definition.tree;
        self.active.iter().map(|&index| tree.node(index).id).collect()
    }

    /// The innermost active state.
    pub fn current_state(&self) -> Option<S> {
        let tree = &self.definition.tree;
        self.active.last().map(|&index| tree.node(index).id)
    }

    pub fn is_active(&self, id: S) -> bool {
        let tree = &self.definition.tree;
        self.active.iter().any(|&index| tree.node(index).id == id)
    }

    /// History records: for each exited history state, the chain of
    /// descendants that were active when it was exited, outermost first.
    pub fn history_states(&self) -> HashMap<S, Vec<S>> {
        let tree = &self.definition.tree;
        self.history
            .iter()
            .map(|(&state, chain)| {
                let chain = chain.iter().map(|&index| tree.node(index).id).collect();
                (tree.node(state).id, chain)
            })
            .collect()
    }

    /// Register a handler. Handlers are notified in registration order.
    pub fn add_event_handler<H>(&mut self, handler: H) -> HandlerId
    where
        H: EventHandler<S, E> + 'static,
    {
        let id = HandlerId::new(self.next_handler);
        self.next_handler += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Unregister a handler. Returns whether it was registered.
    pub fn remove_event_handler(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(registered, _)| *registered != id);
        self.handlers.len() != before
    }

    pub fn is_registered(&self, id: HandlerId) -> bool {
        self.handlers.iter().any(|(registered, _)| *registered == id)
    }

    /// Discard all history, then enter the root and descend through the
    /// initial substates. Entry actions see no event.
    ///
    /// The machine is alive afterwards even when an entry action failed; the
    /// failure is returned, reported to the handlers and marks the machine
    /// inconsistent.
    pub fn reset(&mut self) -> Result<(), DispatchFailure<S>> {
        let tree = Arc::clone(&self.definition.tree);
        let result = Dispatch::new(
            &tree,
            &mut self.owner,
            &mut self.active,
            &mut self.history,
            &self.name,
        )
        .reset();

        self.alive = true;
        self.inconsistency = result.as_ref().err().cloned();
        match &result {
            Ok(()) => info!(
                machine = %self.name,
                machine_id = %self.id,
                state = ?self.current_state(),
                "machine reset"
            ),
            Err(failure) => warn!(
                machine = %self.name,
                machine_id = %self.id,
                %failure,
                "machine reset failed"
            ),
        }

        let active = self.active_states();
        for (_, handler) in &mut self.handlers {
            handler.was_reset(&self.name, &active, result.as_ref().err());
        }
        result
    }

    /// Dispatch one event.
    ///
    /// Returns an error only when the event was not dispatched at all: the
    /// machine was never reset or a handler refused the event. Guard and
    /// action failures are part of the returned [`Outcome`].
    pub fn fire(&mut self, event: impl Into<Event<E>>) -> Result<Outcome<S>, MachineError> {
        let event = event.into();
        if !self.alive {
            return Err(MachineError::NotAlive {
                machine: self.name.clone(),
            });
        }
        for (_, handler) in &mut self.handlers {
            handler.before_fire(&self.name, &event, self.inconsistency.as_ref())?;
        }

        let tree = Arc::clone(&self.definition.tree);
        let outcome = Dispatch::new(
            &tree,
            &mut self.owner,
            &mut self.active,
            &mut self.history,
            &self.name,
        )
        .fire(&event);

        match &outcome {
            Outcome::Failed(failure) => {
                if !failure.leaves_consistent() {
                    self.inconsistency = Some(failure.clone());
                }
                warn!(
                    machine = %self.name,
                    machine_id = %self.id,
                    event = ?event.kind(),
                    %failure,
                    "event dispatch failed"
                );
            }
            Outcome::Transitioned { from, to, .. } => debug!(
                machine = %self.name,
                machine_id = %self.id,
                event = ?event.kind(),
                from = from.name(),
                to = to.name(),
                "event dispatched"
            ),
            Outcome::Local { .. } | Outcome::Ignored => {}
        }

        for (_, handler) in &mut self.handlers {
            handler.fired(&self.name, &event, &outcome);
        }
        Ok(outcome)
    }
}

impl<S: State, E: PartialEq + Debug, O> fmt::Debug for Machine<S, E, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tree = &self.definition.tree;
        let active: Vec<S> = self.active.iter().map(|&index| tree.node(index).id).collect();
        f.debug_struct("Machine")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("active", &active)
            .field("alive", &self.alive)
            .field("consistent", &self.is_consistent())
            .finish()
    }
}
