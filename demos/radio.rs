//! Drives a small radio statechart with logging enabled.
//!
//! Run with `RUST_LOG=debug` to also see every exit and entry.

use statechart::checker::validate;
use statechart::generator::{DotGenerator, Generator};
use statechart::handlers::{DynamicChecker, LoggingHandler};
use statechart::{state_enum, DefinitionBuilder};
use tracing_subscriber::EnvFilter;

state_enum! {
    enum Radio {
        Root,
        Off,
        On,
        Dab,
        Fm,
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Input {
    TogglePower,
    Band,
    Scan,
}

#[derive(Default)]
struct Tuner {
    stations_found: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut builder = DefinitionBuilder::<Radio, Input, Tuner>::new(Radio::Root);
    builder.add_to_root(Radio::Off)?.is_initial();
    builder.add_to_root(Radio::On)?.has_history();
    builder.add_to(Radio::On, Radio::Dab)?.is_initial();
    builder.add_to(Radio::On, Radio::Fm)?;
    builder.in_state(Radio::Off)?.on(Input::TogglePower).to(Radio::On)?;
    builder.in_state(Radio::On)?.on(Input::TogglePower).to(Radio::Off)?;
    builder.in_state(Radio::Dab)?.on(Input::Band).to(Radio::Fm)?;
    builder.in_state(Radio::Fm)?.on(Input::Band).to(Radio::Dab)?;
    builder
        .in_state(Radio::On)?
        .on_local(Input::Scan)
        .execute_described(
            |tuner, _| {
                tuner.stations_found += 1;
                Ok(())
            },
            "scan for stations",
        );
    let definition = builder.build();

    if validate(&definition).is_failure() {
        return Err("radio definition is not well formed".into());
    }
    println!("{}", DotGenerator::new().with_descriptions().generate(&definition, "radio"));

    let mut radio = definition.machine("kitchen radio", Tuner::default());
    radio.add_event_handler(LoggingHandler::default());
    radio.add_event_handler(DynamicChecker::new());

    for input in [
        Input::TogglePower,
        Input::Band,
        Input::Scan,
        Input::TogglePower,
        Input::TogglePower,
    ] {
        radio.fire(input)?;
    }

    println!(
        "active: {:?}, stations found: {}",
        radio.active_states(),
        radio.context().stations_found
    );
    Ok(())
}
