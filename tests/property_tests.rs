//! Property-based tests for the dispatch engine.
//!
//! These tests use proptest to drive machines with random event sequences
//! and check the invariants that must hold after every dispatch.

use proptest::prelude::*;
use statechart::{state_enum, Definition, DefinitionBuilder, Machine};

state_enum! {
    enum Player {
        Root,
        Stopped,
        Active,
        Playing,
        Normal,
        Shuffle,
        Paused,
        Menu,
        Settings,
        Audio,
        Video,
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Input {
    Play,
    Pause,
    Stop,
    Toggle,
    Open,
    Close,
    Next,
    Tick,
}

const INPUTS: [Input; 8] = [
    Input::Play,
    Input::Pause,
    Input::Stop,
    Input::Toggle,
    Input::Open,
    Input::Close,
    Input::Next,
    Input::Tick,
];

// Root
// ├── Stopped (initial)
// ├── Active (history)
// │   ├── Playing (initial, history)
// │   │   ├── Normal (initial)
// │   │   └── Shuffle
// │   └── Paused
// └── Menu
//     └── Settings (initial)
//         ├── Audio (initial)
//         └── Video
fn player() -> Definition<Player, Input, u32> {
    let mut builder = DefinitionBuilder::<Player, Input, u32>::new(Player::Root);
    builder.add_to_root(Player::Stopped).unwrap().is_initial();
    builder.add_to_root(Player::Active).unwrap().has_history();
    builder
        .add_to(Player::Active, Player::Playing)
        .unwrap()
        .is_initial()
        .has_history();
    builder
        .add_to(Player::Playing, Player::Normal)
        .unwrap()
        .is_initial();
    builder.add_to(Player::Playing, Player::Shuffle).unwrap();
    builder.add_to(Player::Active, Player::Paused).unwrap();
    builder.add_to_root(Player::Menu).unwrap();
    builder
        .add_to(Player::Menu, Player::Settings)
        .unwrap()
        .is_initial();
    builder
        .add_to(Player::Settings, Player::Audio)
        .unwrap()
        .is_initial();
    builder.add_to(Player::Settings, Player::Video).unwrap();

    let transitions = [
        (Player::Stopped, Input::Play, Player::Active),
        (Player::Active, Input::Stop, Player::Stopped),
        (Player::Playing, Input::Pause, Player::Paused),
        (Player::Paused, Input::Play, Player::Playing),
        (Player::Normal, Input::Toggle, Player::Shuffle),
        (Player::Shuffle, Input::Toggle, Player::Normal),
        (Player::Active, Input::Open, Player::Menu),
        (Player::Stopped, Input::Open, Player::Menu),
        (Player::Menu, Input::Close, Player::Active),
        (Player::Audio, Input::Next, Player::Video),
        (Player::Video, Input::Next, Player::Audio),
        (Player::Shuffle, Input::Next, Player::Shuffle),
    ];
    for (source, input, target) in transitions {
        builder
            .in_state(source)
            .unwrap()
            .on(input)
            .to(target)
            .unwrap();
    }
    builder
        .in_state(Player::Playing)
        .unwrap()
        .on_local(Input::Tick)
        .execute(|ticks, _| {
            *ticks += 1;
            Ok(())
        });
    builder.build()
}

fn assert_chain_is_rooted_path(machine: &Machine<Player, Input, u32>) {
    let definition = machine.definition();
    let active = machine.active_states();

    assert_eq!(active.first(), Some(&Player::Root));
    for pair in active.windows(2) {
        let child = definition.state(pair[1]).unwrap();
        assert_eq!(child.parent().map(|parent| parent.id()), Some(pair[0]));
    }
    let leaf = definition.state(*active.last().unwrap()).unwrap();
    assert!(leaf.is_leaf());
}

fn arbitrary_inputs() -> impl Strategy<Value = Vec<Input>> {
    prop::collection::vec(prop::sample::select(INPUTS.to_vec()), 0..40)
}

proptest! {
    #[test]
    fn active_chain_is_always_a_path_from_root_to_leaf(inputs in arbitrary_inputs()) {
        let mut machine = player().machine("player", 0);
        assert_chain_is_rooted_path(&machine);

        for input in inputs {
            machine.fire(input).unwrap();
            assert_chain_is_rooted_path(&machine);
        }
    }

    #[test]
    fn ignored_events_change_nothing(inputs in arbitrary_inputs()) {
        let mut machine = player().machine("player", 0);

        for input in inputs {
            let active = machine.active_states();
            let history = machine.history_states();
            let ticks = *machine.context();

            let outcome = machine.fire(input).unwrap();

            if outcome.is_ignored() {
                prop_assert_eq!(machine.active_states(), active);
                prop_assert_eq!(machine.history_states(), history);
                prop_assert_eq!(*machine.context(), ticks);
            }
        }
    }

    #[test]
    fn history_records_belong_to_inactive_states(inputs in arbitrary_inputs()) {
        let mut machine = player().machine("player", 0);

        for input in inputs {
            machine.fire(input).unwrap();

            let definition = machine.definition();
            for (state, chain) in machine.history_states() {
                prop_assert!(!machine.is_active(state));
                prop_assert!(definition.state(state).unwrap().has_history());
                prop_assert!(!chain.is_empty());

                let first = definition.state(chain[0]).unwrap();
                prop_assert_eq!(first.parent().map(|parent| parent.id()), Some(state));
            }
        }
    }

    #[test]
    fn history_target_restores_its_recorded_chain(inputs in arbitrary_inputs()) {
        let mut machine = player().machine("player", 0);

        for input in inputs {
            let history = machine.history_states();
            let outcome = machine.fire(input).unwrap();

            if let statechart::Outcome::Transitioned { target, .. } = outcome {
                if let Some(recorded) = history.get(&target) {
                    let active = machine.active_states();
                    let position = active.iter().position(|&state| state == target).unwrap();
                    prop_assert_eq!(&active[position + 1..], recorded.as_slice());
                    prop_assert!(!machine.history_states().contains_key(&target));
                }
            }
        }
    }

    #[test]
    fn dispatch_is_deterministic(inputs in arbitrary_inputs()) {
        let definition = player();
        let mut first = definition.machine("first", 0);
        let mut second = definition.machine("second", 0);

        for input in inputs {
            let a = first.fire(input).unwrap();
            let b = second.fire(input).unwrap();
            prop_assert_eq!(a, b);
        }
        prop_assert_eq!(first.active_states(), second.active_states());
        prop_assert_eq!(first.history_states(), second.history_states());
        prop_assert_eq!(first.context(), second.context());
    }

    #[test]
    fn local_transitions_never_move_the_chain(inputs in arbitrary_inputs()) {
        let mut machine = player().machine("player", 0);

        for input in inputs {
            let active = machine.active_states();
            let outcome = machine.fire(input).unwrap();
            if matches!(outcome, statechart::Outcome::Local { .. }) {
                prop_assert_eq!(machine.active_states(), active);
            }
        }
    }

    #[test]
    fn reset_returns_to_initial_chain(inputs in arbitrary_inputs()) {
        let mut machine = player().machine("player", 0);
        for input in inputs {
            machine.fire(input).unwrap();
        }

        machine.reset().unwrap();

        prop_assert_eq!(machine.active_states(), vec![Player::Root, Player::Stopped]);
        prop_assert!(machine.history_states().is_empty());
    }
}
