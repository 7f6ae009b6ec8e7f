use super::EventHandler;
use crate::core::{Event, State};
use crate::machine::{DispatchFailure, Outcome};
use std::fmt::Debug;
use tracing::{debug, error, info, trace, warn, Level};

macro_rules! at_level {
    ($level:expr, $($arg:tt)+) => {
        if $level == Level::ERROR {
            error!($($arg)+)
        } else if $level == Level::WARN {
            warn!($($arg)+)
        } else if $level == Level::INFO {
            info!($($arg)+)
        } else if $level == Level::DEBUG {
            debug!($($arg)+)
        } else {
            trace!($($arg)+)
        }
    };
}

/// Emits a `tracing` event for every reset and every fired event.
///
/// Resets, transitions and ignored events are logged at the configured
/// level. Failures are always logged at `WARN`.
#[derive(Clone, Copy, Debug)]
pub struct LoggingHandler {
    level: Level,
}

impl Default for LoggingHandler {
    fn default() -> Self {
        Self::new(Level::INFO)
    }
}

impl LoggingHandler {
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Level {
        self.level
    }
}

impl<S: State, E: Debug> EventHandler<S, E> for LoggingHandler {
    fn was_reset(&mut self, machine: &str, active: &[S], failure: Option<&DispatchFailure<S>>) {
        let active: Vec<&str> = active.iter().map(State::name).collect();
        match failure {
            Some(failure) => warn!(machine, ?active, %failure, "reset failed"),
            None => at_level!(self.level, machine, ?active, "reset"),
        }
    }

    fn fired(&mut self, machine: &str, event: &Event<E>, outcome: &Outcome<S>) {
        match outcome {
            Outcome::Ignored => at_level!(self.level, machine, %event, "event ignored"),
            Outcome::Local { state } => {
                at_level!(self.level, machine, %event, state = state.name(), "local transition")
            }
            Outcome::Transitioned {
                source,
                target,
                from,
                to,
            } => at_level!(
                self.level,
                machine,
                %event,
                source = source.name(),
                target = target.name(),
                from = from.name(),
                to = to.name(),
                "transition"
            ),
            Outcome::Failed(failure) => warn!(machine, %event, %failure, "event failed"),
        }
    }
}
