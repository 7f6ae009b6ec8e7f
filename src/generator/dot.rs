use super::Generator;
use crate::core::State;
use crate::definition::{Definition, StateRef, Transition};
use std::fmt::Debug;

/// Renders a definition in the Graphviz DOT language.
///
/// Composite states become clusters, leaves become nodes and transitions
/// become edges labelled with their event. Local transitions are drawn as
/// dashed loops.
#[derive(Clone, Copy, Debug, Default)]
pub struct DotGenerator {
    descriptions: bool,
}

impl DotGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add guard and action descriptions to edge labels.
    pub fn with_descriptions(mut self) -> Self {
        self.descriptions = true;
        self
    }

    fn write_state<S: State, E: Debug, O>(
        &self,
        out: &mut String,
        state: StateRef<'_, S, E, O>,
        indent: usize,
    ) {
        let pad = "    ".repeat(indent);
        let label = state_label(state);
        if state.is_composite() {
            out.push_str(&format!("{pad}subgraph {} {{\n", cluster(state.id())));
            out.push_str(&format!("{pad}    label={};\n", quote(&label)));
            out.push_str(&format!(
                "{pad}    {} [shape=point style=invis];\n",
                quote(state.id().name())
            ));
            for substate in state.substates() {
                self.write_state(out, substate, indent + 1);
            }
            out.push_str(&format!("{pad}}}\n"));
        } else {
            let style = if state.is_initial() {
                "rounded,bold"
            } else {
                "rounded"
            };
            out.push_str(&format!(
                "{pad}{} [label={} style=\"{style}\"];\n",
                quote(state.id().name()),
                quote(&label)
            ));
        }
    }

    fn write_edge<S: State, E: Debug, O>(
        &self,
        out: &mut String,
        definition: &Definition<S, E, O>,
        transition: &Transition<S, E, O>,
    ) {
        let source = transition.source();
        let target = transition.target().unwrap_or(source);
        let mut attributes = vec![format!("label={}", quote(&self.edge_label(transition)))];
        if transition.is_local() {
            attributes.push("style=dashed".to_string());
        }
        if is_composite(definition, source) {
            attributes.push(format!("ltail={}", cluster(source)));
        }
        if is_composite(definition, target) {
            attributes.push(format!("lhead={}", cluster(target)));
        }
        out.push_str(&format!(
            "    {} -> {} [{}];\n",
            quote(source.name()),
            quote(target.name()),
            attributes.join(" ")
        ));
    }

    fn edge_label<S: State, E: Debug, O>(&self, transition: &Transition<S, E, O>) -> String {
        let mut label = format!("{:?}", transition.event());
        if !self.descriptions {
            return label;
        }
        if let Some(guard) = transition.guard() {
            label.push_str(&format!(" [{}]", guard.description().unwrap_or("guard")));
        }
        if let Some(action) = transition.action() {
            label.push_str(&format!(" / {}", action.description().unwrap_or("action")));
        }
        label
    }
}

impl Generator for DotGenerator {
    fn generate<S: State, E: Debug, O>(
        &self,
        definition: &Definition<S, E, O>,
        name: &str,
    ) -> String {
        let mut out = String::new();
        out.push_str(&format!("digraph {} {{\n", quote(name)));
        out.push_str("    compound=true;\n");
        out.push_str("    node [shape=box];\n");
        self.write_state(&mut out, definition.root(), 1);
        for state in definition.states() {
            for transition in state.transitions() {
                self.write_edge(&mut out, definition, transition);
            }
        }
        out.push_str("}\n");
        out
    }
}

fn state_label<S: State, E, O>(state: StateRef<'_, S, E, O>) -> String {
    let mut label = state.id().name().to_string();
    if state.has_history() {
        label.push_str(" (H)");
    }
    if let Some(description) = state.description() {
        label.push_str("\\n");
        label.push_str(description);
    }
    label
}

fn is_composite<S: State, E, O>(definition: &Definition<S, E, O>, id: S) -> bool {
    definition
        .state(id)
        .map_or(false, |state| state.is_composite())
}

fn cluster<S: State>(id: S) -> String {
    quote(&format!("cluster_{}", id.name()))
}

fn quote(text: &str) -> String {
    format!("\"{}\"", text.replace('"', "\\\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DefinitionBuilder;

    crate::state_enum! {
        enum TestState {
            Root,
            Off,
            On,
            Fm,
        }
    }

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum TestEvent {
        Power,
        Scan,
    }

    fn definition() -> Definition<TestState, TestEvent, ()> {
        let mut builder = DefinitionBuilder::<TestState, TestEvent, ()>::new(TestState::Root);
        builder.add_to_root(TestState::Off).unwrap().is_initial();
        builder
            .add_to_root(TestState::On)
            .unwrap()
            .has_history()
            .description("powered");
        builder.add_to(TestState::On, TestState::Fm).unwrap().is_initial();
        builder
            .in_state(TestState::Off)
            .unwrap()
            .on(TestEvent::Power)
            .to(TestState::On)
            .unwrap()
            .only_if_described(|_, _| true, "battery ok")
            .execute_described(|_, _| Ok(()), "beep");
        builder
            .in_state(TestState::Fm)
            .unwrap()
            .on_local(TestEvent::Scan);
        builder.build()
    }

    #[test]
    fn composite_states_become_clusters() {
        let dot = DotGenerator::new().generate(&definition(), "radio");

        assert!(dot.starts_with("digraph \"radio\" {\n"));
        assert!(dot.contains("subgraph \"cluster_On\" {"));
        assert!(dot.contains("label=\"On (H)\\npowered\";"));
        assert!(dot.contains("\"Off\" [label=\"Off\" style=\"rounded,bold\"];"));
        assert!(dot.ends_with("}\n"));
    }

    #[test]
    fn transitions_become_edges() {
        let dot = DotGenerator::new().generate(&definition(), "radio");

        assert!(dot.contains("\"Off\" -> \"On\" [label=\"Power\" lhead=\"cluster_On\"];"));
        assert!(dot.contains("\"Fm\" -> \"Fm\" [label=\"Scan\" style=dashed];"));
    }

    #[test]
    fn descriptions_are_optional() {
        let plain = DotGenerator::new().generate(&definition(), "radio");
        let described = DotGenerator::new()
            .with_descriptions()
            .generate(&definition(), "radio");

        assert!(!plain.contains("battery ok"));
        assert!(described.contains("label=\"Power [battery ok] / beep\""));
    }

    #[test]
    fn output_is_deterministic() {
        let definition = definition();
        let generator = DotGenerator::new();

        assert_eq!(
            generator.generate(&definition, "radio"),
            generator.generate(&definition, "radio")
        );
    }
}
