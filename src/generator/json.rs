use super::Generator;
use crate::core::State;
use crate::definition::{Definition, StateRef, Transition};
use serde::Serialize;
use std::fmt::Debug;
use tracing::warn;

/// Renders a definition as a JSON document: the machine name and the
/// nested state tree with flags, action descriptions and transitions.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonGenerator {
    pretty: bool,
}

#[derive(Serialize)]
struct MachineDocument<'a> {
    name: &'a str,
    root: StateDocument<'a>,
}

#[derive(Serialize)]
struct StateDocument<'a> {
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    initial: bool,
    history: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    entry: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exit: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    transitions: Vec<TransitionDocument<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    substates: Vec<StateDocument<'a>>,
}

#[derive(Serialize)]
struct TransitionDocument<'a> {
    event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<String>,
    local: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    guard: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}

impl JsonGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Indent the output.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

impl Generator for JsonGenerator {
    fn generate<S: State, E: Debug, O>(
        &self,
        definition: &Definition<S, E, O>,
        name: &str,
    ) -> String {
        let document = MachineDocument {
            name,
            root: state_document(definition.root()),
        };
        let rendered = if self.pretty {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        };
        rendered.unwrap_or_else(|error| {
            warn!(machine = name, %error, "failed to render definition as JSON");
            String::new()
        })
    }
}

// Unnamed actions and guards are rendered as an empty description so their
// presence still shows.
fn state_document<'a, S: State, E: Debug, O>(state: StateRef<'a, S, E, O>) -> StateDocument<'a> {
    StateDocument {
        id: state.id().name().to_string(),
        description: state.description(),
        initial: state.is_initial(),
        history: state.has_history(),
        entry: state
            .entry_action()
            .map(|action| action.description().unwrap_or("")),
        exit: state
            .exit_action()
            .map(|action| action.description().unwrap_or("")),
        transitions: state.transitions().iter().map(transition_document).collect(),
        substates: state.substates().map(state_document).collect(),
    }
}

fn transition_document<'a, S: State, E: Debug, O>(
    transition: &'a Transition<S, E, O>,
) -> TransitionDocument<'a> {
    TransitionDocument {
        event: format!("{:?}", transition.event()),
        target: transition.target().map(|target| target.name().to_string()),
        local: transition.is_local(),
        guard: transition
            .guard()
            .map(|guard| guard.description().unwrap_or("")),
        action: transition
            .action()
            .map(|action| action.description().unwrap_or("")),
        description: transition.description(),
    }
}
