//! Core vocabulary shared by definitions and machines.
//!
//! - State identifiers via the `State` trait
//! - Events wrapping a host-supplied kind
//! - Guard predicates and actions over an owner object
//! - A timestamped journal of transitions

mod action;
mod event;
mod guard;
mod journal;
mod state;

pub use action::{Action, ActionError, ActionFn, ActionResult};
pub use event::Event;
pub use guard::Guard;
pub use journal::{TransitionJournal, TransitionRecord};
pub use state::State;
