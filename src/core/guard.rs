//! Guard predicates for controlling transitions.
//!
//! Guards are boolean functions over the owner and the incoming event that
//! determine whether a transition may be taken. They only read the owner.

use super::action::ActionError;
use super::event::Event;
use std::fmt;
use std::sync::Arc;

type Predicate<O, E> = Arc<dyn Fn(&O, &Event<E>) -> Result<bool, ActionError> + Send + Sync>;

/// Predicate that determines if a transition can be taken.
///
/// # Example
///
/// ```rust
/// use statechart::core::{Event, Guard};
///
/// struct Radio {
///     needs_maintenance: bool,
/// }
///
/// let guard = Guard::new(|radio: &Radio, _: &Event<()>| radio.needs_maintenance);
///
/// let event = Event::new(());
/// assert!(guard.check(&Radio { needs_maintenance: true }, &event).unwrap());
/// assert!(!guard.check(&Radio { needs_maintenance: false }, &event).unwrap());
/// ```
pub struct Guard<O, E> {
    predicate: Predicate<O, E>,
    description: Option<String>,
}

impl<O, E> Guard<O, E> {
    /// Create a guard from an infallible predicate.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&O, &Event<E>) -> bool + Send + Sync + 'static,
    {
        Self::fallible(move |owner, event| Ok(predicate(owner, event)))
    }

    /// Create a guard from a predicate that may fail.
    ///
    /// A failing guard aborts the dispatch of the event; no other candidate
    /// transition is tried.
    pub fn fallible<F>(predicate: F) -> Self
    where
        F: Fn(&O, &Event<E>) -> Result<bool, ActionError> + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
            description: None,
        }
    }

    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Check if the guard allows the transition for this owner and event.
    pub fn check(&self, owner: &O, event: &Event<E>) -> Result<bool, ActionError> {
        (self.predicate)(owner, event)
    }
}

impl<O, E> Clone for Guard<O, E> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            description: self.description.clone(),
        }
    }
}

impl<O, E> fmt::Debug for Guard<O, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
