//! Observers attached to a running machine.
//!
//! A machine notifies every registered [`EventHandler`] of resets and fired
//! events. A handler may also refuse an event before it is dispatched, which
//! is how [`DynamicChecker`] stops an inconsistent machine.

mod dynamic;
mod journal;
mod logging;

pub use dynamic::DynamicChecker;
pub use journal::JournalHandler;
pub use logging::LoggingHandler;

use crate::core::Event;
use crate::machine::{DispatchFailure, MachineError, Outcome};

/// Registration key returned by
/// [`Machine::add_event_handler`](crate::machine::Machine::add_event_handler).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

/// Callbacks invoked by a machine around resets and events.
///
/// Every method has an empty default so handlers implement only what they
/// need.
pub trait EventHandler<S, E>: Send {
    /// Called after every reset with the resulting active chain, root first.
    /// `failure` is set when an entry action failed during the reset.
    fn was_reset(&mut self, machine: &str, active: &[S], failure: Option<&DispatchFailure<S>>) {
        let _ = (machine, active, failure);
    }

    /// Called before `event` is dispatched. Returning an error rejects the
    /// event; the active chain is left untouched.
    ///
    /// `inconsistency` is the failure that left the machine inconsistent,
    /// including failures that happened before this handler was registered.
    fn before_fire(
        &mut self,
        machine: &str,
        event: &Event<E>,
        inconsistency: Option<&DispatchFailure<S>>,
    ) -> Result<(), MachineError> {
        let _ = (machine, event, inconsistency);
        Ok(())
    }

    /// Called once the dispatch of `event` finished.
    fn fired(&mut self, machine: &str, event: &Event<E>, outcome: &Outcome<S>) {
        let _ = (machine, event, outcome);
    }
}
