//! Builder API for ergonomic definition construction.
//!
//! This module provides a fluent builder and a macro for declaring nested
//! states, their actions and their transitions. Malformed declarations are
//! rejected immediately with a [`BuildError`].

pub mod definition;
pub mod error;
pub mod macros;
pub mod state;
pub mod transition;

pub use definition::DefinitionBuilder;
pub use error::BuildError;
pub use state::StateBuilder;
pub use transition::{TargetBuilder, TransitionBuilder};
