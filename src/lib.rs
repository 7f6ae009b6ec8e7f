//! Statechart: hierarchical state machines with history states
//!
//! A machine is declared once as a tree of nested states with entry and
//! exit actions, guarded transitions and history flags. The resulting
//! [`Definition`] is immutable and can back any number of running
//! [`Machine`] instances, each owning its own context object.
//!
//! # Core Concepts
//!
//! - **Definition**: the frozen state tree, built with [`DefinitionBuilder`]
//! - **Checker**: pure well-formedness rules over a definition
//! - **Machine**: the active state chain, history records and owner of one
//!   instance; events are dispatched synchronously
//! - **Handlers**: observers notified of resets and fired events, such as
//!   the [`DynamicChecker`](handlers::DynamicChecker)
//! - **Generators**: DOT and JSON renderings of a definition
//!
//! # Example
//!
//! ```rust
//! use statechart::{state_enum, DefinitionBuilder};
//!
//! state_enum! {
//!     enum Washer {
//!         Root,
//!         Running,
//!         Washing,
//!         Rinsing,
//!         PowerOff,
//!     }
//! }
//!
//! #[derive(Clone, Copy, PartialEq, Debug)]
//! enum Input {
//!     Rinse,
//!     CutPower,
//!     RestorePower,
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = DefinitionBuilder::<Washer, Input, ()>::new(Washer::Root);
//! builder.add_to_root(Washer::Running)?.is_initial().has_history();
//! builder.add_to(Washer::Running, Washer::Washing)?.is_initial();
//! builder.add_to(Washer::Running, Washer::Rinsing)?;
//! builder.add_to_root(Washer::PowerOff)?;
//! builder.in_state(Washer::Washing)?.on(Input::Rinse).to(Washer::Rinsing)?;
//! builder.in_state(Washer::Running)?.on(Input::CutPower).to(Washer::PowerOff)?;
//! builder.in_state(Washer::PowerOff)?.on(Input::RestorePower).to(Washer::Running)?;
//! let definition = builder.build();
//!
//! let mut washer = definition.machine("washer", ());
//! washer.fire(Input::Rinse)?;
//! washer.fire(Input::CutPower)?;
//! washer.fire(Input::RestorePower)?;
//! assert_eq!(washer.current_state(), Some(Washer::Rinsing));
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod checker;
pub mod core;
pub mod definition;
pub mod generator;
pub mod handlers;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, DefinitionBuilder};
pub use checker::{check, validate, Violation};
pub use self::core::{Action, ActionError, ActionResult, Event, Guard, State};
pub use definition::{Definition, StateRef};
pub use handlers::{EventHandler, HandlerId};
pub use machine::{DispatchFailure, Machine, MachineError, Outcome, Phase};
