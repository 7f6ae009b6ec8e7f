//! Core State trait for state identifiers.
//!
//! A state identifier names exactly one node of a state tree. Identifiers are
//! small, copyable values, typically a fieldless enum supplied by the host.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state identifiers.
///
/// # Required Traits
///
/// - `Copy`: ids are stored in transitions, history records and handlers
/// - `Eq` + `Hash`: ids key the history map and the duplicate checks
/// - `Debug`: ids appear in errors and diagnostics
/// - `Send` + `Sync`: definitions are shared across threads
///
/// # Example
///
/// ```rust
/// use statechart::core::State;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// enum Washer {
///     Root,
///     Running,
///     PowerOff,
/// }
///
/// impl State for Washer {
///     fn name(&self) -> &str {
///         match self {
///             Self::Root => "Root",
///             Self::Running => "Running",
///             Self::PowerOff => "PowerOff",
///         }
///     }
/// }
///
/// assert_eq!(Washer::Running.name(), "Running");
/// ```
pub trait State: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Get the state's name for display/logging.
    fn name(&self) -> &str;
}
