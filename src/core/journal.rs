//! Journal of transitions taken by a machine.
//!
//! Provides an ordered, timestamped record of the leaf-to-leaf moves a
//! machine made. Not to be confused with history states, which live inside
//! the machine and drive re-entry.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single external transition.
///
/// # Example
///
/// ```rust
/// use statechart::core::TransitionRecord;
/// use chrono::Utc;
///
/// let record = TransitionRecord {
///     event: "Rinse".to_string(),
///     source: "Washing",
///     target: "Rinsing",
///     from: "Washing",
///     to: "Rinsing",
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.target, "Rinsing");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRecord<S> {
    /// The event that triggered the transition
    pub event: String,
    /// The state declaring the transition
    pub source: S,
    /// The transition target
    pub target: S,
    /// Active leaf before the transition
    pub from: S,
    /// Active leaf after the transition
    pub to: S,
    /// When the transition completed
    pub timestamp: DateTime<Utc>,
}

/// Ordered journal of transitions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransitionJournal<S> {
    records: Vec<TransitionRecord<S>>,
}

impl<S> Default for TransitionJournal<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> TransitionJournal<S> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    pub fn record(&mut self, record: TransitionRecord<S>) {
        self.records.push(record);
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn records(&self) -> &[TransitionRecord<S>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }
}

impl<S: State> TransitionJournal<S> {
    /// Get the sequence of active leaves traversed.
    ///
    /// Returns the `from` leaf of the first record, then the `to` leaf of
    /// each record.
    pub fn get_path(&self) -> Vec<S> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(first.from);
        }
        path.extend(self.records.iter().map(|record| record.to));
        path
    }
}
