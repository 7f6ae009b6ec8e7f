//! Builder for constructing state tree definitions.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::core::State;
use crate::definition::{Definition, Tree, ROOT};
use tracing::debug;

/// Builder growing a state tree incrementally with a fluent API.
///
/// States must be declared before they are used as a parent or as a
/// transition target. Every state id may be declared only once in the whole
/// tree.
///
/// # Example
///
/// ```rust
/// use statechart::builder::DefinitionBuilder;
/// use statechart::state_enum;
///
/// state_enum! {
///     enum Lamp {
///         Root,
///         Off,
///         On,
///     }
/// }
///
/// #[derive(Clone, Copy, PartialEq, Debug)]
/// enum Switch {
///     Toggle,
/// }
///
/// # fn main() -> Result<(), statechart::builder::BuildError<Lamp>> {
/// let mut builder = DefinitionBuilder::<Lamp, Switch, u32>::new(Lamp::Root);
/// builder.add_to_root(Lamp::Off)?.is_initial();
/// builder.add_to_root(Lamp::On)?;
/// builder.in_state(Lamp::Off)?.on(Switch::Toggle).to(Lamp::On)?;
/// builder
///     .in_state(Lamp::On)?
///     .on(Switch::Toggle)
///     .to(Lamp::Off)?
///     .execute(|count, _| {
///         *count += 1;
///         Ok(())
///     });
///
/// let definition = builder.build();
/// assert_eq!(definition.len(), 3);
/// # Ok(())
/// # }
/// ```
pub struct DefinitionBuilder<S, E, O> {
    tree: Tree<S, E, O>,
}

impl<S: State, E, O> DefinitionBuilder<S, E, O> {
    /// Create a builder whose tree holds only the root state.
    pub fn new(root: S) -> Self {
        Self {
            tree: Tree::new(root),
        }
    }

    /// Declare a direct substate of the root.
    pub fn add_to_root(&mut self, id: S) -> Result<StateBuilder<'_, S, E, O>, BuildError<S>> {
        StateBuilder::new(&mut self.tree, ROOT).add(id)
    }

    /// Declare a substate of an already declared `parent`.
    pub fn add_to(&mut self, parent: S, id: S) -> Result<StateBuilder<'_, S, E, O>, BuildError<S>> {
        let parent = self
            .tree
            .find(parent)
            .ok_or(BuildError::UnknownParent(parent))?;
        StateBuilder::new(&mut self.tree, parent).add(id)
    }

    /// Continue declaring an already declared state: substates, flags,
    /// actions and transitions.
    pub fn in_state(&mut self, id: S) -> Result<StateBuilder<'_, S, E, O>, BuildError<S>> {
        let index = self.tree.find(id).ok_or(BuildError::UnknownState(id))?;
        Ok(StateBuilder::new(&mut self.tree, index))
    }

    pub fn contains(&self, id: S) -> bool {
        self.tree.find(id).is_some()
    }

    /// Freeze the tree into a shareable definition.
    pub fn build(self) -> Definition<S, E, O> {
        debug!(
            root = self.tree.node(ROOT).id.name(),
            states = self.tree.len(),
            "state machine definition built"
        );
        Definition::new(self.tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Event;

    crate::state_enum! {
        enum TestState {
            Root,
            Off,
            On,
            Fm,
            Dab,
        }
    }

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum TestEvent {
        Toggle,
        Tick,
    }

    type Builder = DefinitionBuilder<TestState, TestEvent, Vec<String>>;

    #[test]
    fn duplicate_state_is_rejected() {
        let mut builder = Builder::new(TestState::Root);
        builder.add_to_root(TestState::Off).unwrap();

        let result = builder.add_to_root(TestState::Off);
        assert!(matches!(result, Err(BuildError::DuplicateState(TestState::Off))));
    }

    #[test]
    fn duplicate_is_rejected_anywhere_in_tree() {
        let mut builder = Builder::new(TestState::Root);
        builder.add_to_root(TestState::On).unwrap();
        builder.add_to(TestState::On, TestState::Fm).unwrap();

        assert_eq!(
            builder.add_to_root(TestState::Fm).err(),
            Some(BuildError::DuplicateState(TestState::Fm))
        );
        assert_eq!(
            builder.add_to(TestState::On, TestState::Root).err(),
            Some(BuildError::DuplicateState(TestState::Root))
        );
    }

    #[test]
    fn undeclared_parent_is_rejected() {
        let mut builder = Builder::new(TestState::Root);

        assert_eq!(
            builder.add_to(TestState::On, TestState::Fm).err(),
            Some(BuildError::UnknownParent(TestState::On))
        );
        assert_eq!(
            builder.in_state(TestState::On).err(),
            Some(BuildError::UnknownState(TestState::On))
        );
    }

    #[test]
    fn undeclared_target_is_rejected() {
        let mut builder = Builder::new(TestState::Root);
        builder.add_to_root(TestState::Off).unwrap();

        let result = builder
            .in_state(TestState::Off)
            .unwrap()
            .on(TestEvent::Toggle)
            .to(TestState::On)
            .err();
        assert_eq!(result, Some(BuildError::UnknownTarget(TestState::On)));

        let definition = builder.build();
        assert!(definition.state(TestState::Off).unwrap().transitions().is_empty());
    }

    #[test]
    fn fluent_api_builds_definition() {
        let mut builder = Builder::new(TestState::Root);
        builder.add_to_root(TestState::Off).unwrap().is_initial();
        builder
            .add_to_root(TestState::On)
            .unwrap()
            .has_history()
            .description("powered");
        builder
            .in_state(TestState::On)
            .unwrap()
            .add(TestState::Fm)
            .unwrap()
            .is_initial();
        builder.add_to(TestState::On, TestState::Dab).unwrap();
        builder
            .in_state(TestState::Off)
            .unwrap()
            .on(TestEvent::Toggle)
            .to(TestState::On)
            .unwrap()
            .only_if(|log: &Vec<String>, _: &Event<TestEvent>| log.is_empty())
            .execute(|log: &mut Vec<String>, _: &Event<TestEvent>| {
                log.push("OffToOn".to_string());
                Ok(())
            });
        builder.in_state(TestState::On).unwrap().on_local(TestEvent::Tick);

        let definition = builder.build();
        assert_eq!(definition.len(), 5);

        let on = definition.state(TestState::On).unwrap();
        assert!(on.has_history());
        assert_eq!(on.description(), Some("powered"));
        assert_eq!(on.initial_substate().map(|s| s.id()), Some(TestState::Fm));
        assert!(on.transitions()[0].is_local());

        let off = definition.state(TestState::Off).unwrap();
        let toggle = &off.transitions()[0];
        assert_eq!(toggle.target(), Some(TestState::On));
        assert!(toggle.guard().is_some());
        assert!(toggle.action().is_some());
    }

    #[test]
    fn builds_do_not_share_structure() {
        let build = || {
            let mut builder = Builder::new(TestState::Root);
            builder.add_to_root(TestState::Off).unwrap().is_initial();
            builder.build()
        };

        let first = build();
        let second = build();
        assert!(!std::sync::Arc::ptr_eq(&first.tree, &second.tree));
    }
}
