use super::EventHandler;
use crate::core::{Event, State, TransitionJournal, TransitionRecord};
use crate::machine::{DispatchFailure, Outcome};
use chrono::Utc;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};

/// Records every completed external transition into a shared
/// [`TransitionJournal`].
///
/// The journal is cleared on reset.
#[derive(Clone, Debug)]
pub struct JournalHandler<S> {
    journal: Arc<Mutex<TransitionJournal<S>>>,
}

impl<S> Default for JournalHandler<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> JournalHandler<S> {
    pub fn new() -> Self {
        Self {
            journal: Arc::new(Mutex::new(TransitionJournal::new())),
        }
    }

    /// Handle on the journal, readable while the handler is registered.
    pub fn journal(&self) -> Arc<Mutex<TransitionJournal<S>>> {
        Arc::clone(&self.journal)
    }
}

impl<S: State, E: Debug> EventHandler<S, E> for JournalHandler<S> {
    fn was_reset(&mut self, _machine: &str, _active: &[S], _failure: Option<&DispatchFailure<S>>) {
        self.journal
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn fired(&mut self, _machine: &str, event: &Event<E>, outcome: &Outcome<S>) {
        if let Outcome::Transitioned {
            source,
            target,
            from,
            to,
        } = outcome
        {
            let record = TransitionRecord {
                event: event.to_string(),
                source: *source,
                target: *target,
                from: *from,
                to: *to,
                timestamp: Utc::now(),
            };
            self.journal
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .record(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DefinitionBuilder;

    crate::state_enum! {
        enum TestState {
            Root,
            Washing,
            Rinsing,
            Spinning,
        }
    }

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum TestEvent {
        Rinse,
        Spin,
        Count,
    }

    #[test]
    fn journal_follows_external_transitions_only() {
        let mut builder = DefinitionBuilder::<TestState, TestEvent, u32>::new(TestState::Root);
        builder.add_to_root(TestState::Washing).unwrap().is_initial();
        builder.add_to_root(TestState::Rinsing).unwrap();
        builder.add_to_root(TestState::Spinning).unwrap();
        builder
            .in_state(TestState::Washing)
            .unwrap()
            .on(TestEvent::Rinse)
            .to(TestState::Rinsing)
            .unwrap();
        builder
            .in_state(TestState::Rinsing)
            .unwrap()
            .on(TestEvent::Spin)
            .to(TestState::Spinning)
            .unwrap();
        builder
            .in_state(TestState::Rinsing)
            .unwrap()
            .on_local(TestEvent::Count)
            .execute(|count, _| {
                *count += 1;
                Ok(())
            });
        let mut machine = builder.build().machine("washer", 0);
        let handler = JournalHandler::new();
        let journal = handler.journal();
        machine.add_event_handler(handler);

        machine.fire(TestEvent::Rinse).unwrap();
        machine.fire(TestEvent::Count).unwrap();
        machine.fire(TestEvent::Spin).unwrap();

        let journal = journal.lock().unwrap();
        assert_eq!(journal.len(), 2);
        assert_eq!(journal.records()[0].event, "Rinse");
        assert_eq!(
            journal.get_path(),
            vec![TestState::Washing, TestState::Rinsing, TestState::Spinning]
        );
    }

    #[test]
    fn reset_clears_the_journal() {
        let mut builder = DefinitionBuilder::<TestState, TestEvent, ()>::new(TestState::Root);
        builder.add_to_root(TestState::Washing).unwrap().is_initial();
        builder.add_to_root(TestState::Rinsing).unwrap();
        builder
            .in_state(TestState::Washing)
            .unwrap()
            .on(TestEvent::Rinse)
            .to(TestState::Rinsing)
            .unwrap();
        let mut machine = builder.build().machine("washer", ());
        let handler = JournalHandler::new();
        let journal = handler.journal();
        machine.add_event_handler(handler);

        machine.fire(TestEvent::Rinse).unwrap();
        assert_eq!(journal.lock().unwrap().len(), 1);

        machine.reset().unwrap();
        assert!(journal.lock().unwrap().is_empty());
    }
}
