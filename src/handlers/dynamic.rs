use super::EventHandler;
use crate::core::{Event, State};
use crate::machine::{DispatchFailure, MachineError, Outcome};
use std::fmt::Debug;

/// Refuses events once a dispatch failed midway through a transition.
///
/// Guard failures and local action failures do not count: they leave the
/// active chain as it was. Any other failure leaves the machine in a state
/// nobody declared, so further events are rejected with
/// [`MachineError::Inconsistent`] until a clean reset.
#[derive(Clone, Debug, Default)]
pub struct DynamicChecker {
    cause: Option<String>,
}

impl DynamicChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_consistent(&self) -> bool {
        self.cause.is_none()
    }

    /// The failure that made the machine inconsistent.
    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }
}

impl<S: State, E: Debug> EventHandler<S, E> for DynamicChecker {
    fn was_reset(&mut self, _machine: &str, _active: &[S], failure: Option<&DispatchFailure<S>>) {
        self.cause = failure.map(ToString::to_string);
    }

    fn before_fire(
        &mut self,
        machine: &str,
        event: &Event<E>,
        inconsistency: Option<&DispatchFailure<S>>,
    ) -> Result<(), MachineError> {
        if self.cause.is_none() {
            self.cause = inconsistency.map(ToString::to_string);
        }
        match &self.cause {
            Some(cause) => Err(MachineError::Inconsistent {
                machine: machine.to_string(),
                event: event.to_string(),
                cause: cause.clone(),
            }),
            None => Ok(()),
        }
    }

    fn fired(&mut self, _machine: &str, _event: &Event<E>, outcome: &Outcome<S>) {
        if let Outcome::Failed(failure) = outcome {
            if !failure.leaves_consistent() {
                self.cause = Some(failure.to_string());
            }
        }
    }
}
