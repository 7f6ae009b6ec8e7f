//! Events that drive a machine.

use std::fmt;

/// An immutable event wrapping a host-supplied event kind.
///
/// Transitions match on the kind only.
///
/// # Example
///
/// ```rust
/// use statechart::core::Event;
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum Radio {
///     TogglePower,
/// }
///
/// let event = Event::new(Radio::TogglePower);
/// assert_eq!(*event.kind(), Radio::TogglePower);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Event<E> {
    kind: E,
}

impl<E> Event<E> {
    pub fn new(kind: E) -> Self {
        Self { kind }
    }

    pub fn kind(&self) -> &E {
        &self.kind
    }

    pub fn into_kind(self) -> E {
        self.kind
    }
}

impl<E> From<E> for Event<E> {
    fn from(kind: E) -> Self {
        Self::new(kind)
    }
}

impl<E: fmt::Debug> fmt::Display for Event<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)
    }
}
