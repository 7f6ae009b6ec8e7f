//! Actions run on entry, exit and transition.

use super::event::Event;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by a guard or an action.
///
/// The dispatch engine never propagates it to the caller of `fire`; it is
/// handed to the registered event handlers instead.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ActionError {
    message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

/// Result returned by every action.
pub type ActionResult = Result<(), ActionError>;

/// Type alias for action functions receiving the owner and the event.
///
/// The event is `None` when a state is entered by a reset.
pub type ActionFn<O, E> = Arc<dyn Fn(&mut O, Option<&Event<E>>) -> ActionResult + Send + Sync>;

/// Side-effecting behavior attached to a state or a transition.
///
/// # Example
///
/// ```rust
/// use statechart::core::{Action, Event};
///
/// let action = Action::on_event(|count: &mut u32, _event: &Event<()>| {
///     *count += 1;
///     Ok(())
/// });
///
/// let mut count = 0;
/// action.run(&mut count, Some(&Event::new(()))).unwrap();
/// assert_eq!(count, 1);
/// ```
pub struct Action<O, E> {
    function: ActionFn<O, E>,
    description: Option<String>,
}

impl<O, E> Action<O, E> {
    /// Create an entry or exit action, which also runs during a reset.
    pub fn new<F>(function: F) -> Self
    where
        F: Fn(&mut O, Option<&Event<E>>) -> ActionResult + Send + Sync + 'static,
    {
        Self {
            function: Arc::new(function),
            description: None,
        }
    }

    /// Create an action that only runs for an actual event, as transition
    /// actions always do.
    pub fn on_event<F>(function: F) -> Self
    where
        F: Fn(&mut O, &Event<E>) -> ActionResult + Send + Sync + 'static,
    {
        Self::new(move |owner, event| match event {
            Some(event) => function(owner, event),
            None => Ok(()),
        })
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn run(&self, owner: &mut O, event: Option<&Event<E>>) -> ActionResult {
        (self.function)(owner, event)
    }
}

impl<O, E> Clone for Action<O, E> {
    fn clone(&self) -> Self {
        Self {
            function: Arc::clone(&self.function),
            description: self.description.clone(),
        }
    }
}

impl<O, E> fmt::Debug for Action<O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
