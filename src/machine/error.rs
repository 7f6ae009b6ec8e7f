//! Errors returned to the caller of `fire`.

use thiserror::Error;

/// Errors that stop an event from being dispatched.
///
/// Failures of guards and actions are not among them: those are swallowed by
/// the dispatch engine and reported to the event handlers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("Machine '{machine}' was never reset. Call reset() before firing events")]
    NotAlive { machine: String },

    #[error("Machine '{machine}' is inconsistent and cannot dispatch {event}: {cause}")]
    Inconsistent {
        machine: String,
        event: String,
        cause: String,
    },
}
