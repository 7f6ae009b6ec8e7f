//! Static well-formedness checks over a definition.
//!
//! The checks are pure: they read a [`Definition`], need no machine, and can
//! be run any number of times. Violations are advisory; the dispatch engine
//! does not enforce them.
//!
//! Following the accumulate-everything style of `stillwater`'s `Validation`,
//! [`validate`] collects every violation of every rule in a single pass.
//!
//! # Example
//!
//! ```rust
//! use statechart::builder::DefinitionBuilder;
//! use statechart::checker::{check, validate};
//! use statechart::state_enum;
//!
//! state_enum! {
//!     enum Player {
//!         Root,
//!         Stopped,
//!         Playing,
//!         Track1,
//!     }
//! }
//!
//! # fn main() -> Result<(), statechart::builder::BuildError<Player>> {
//! let mut builder = DefinitionBuilder::<Player, &str, ()>::new(Player::Root);
//! builder.add_to_root(Player::Stopped)?.is_initial();
//! builder.add_to_root(Player::Playing)?;
//! builder.add_to(Player::Playing, Player::Track1)?;
//! builder.in_state(Player::Stopped)?.on("play").to(Player::Playing)?;
//! let definition = builder.build();
//!
//! let violations = check(&definition);
//! assert_eq!(violations.len(), 1);
//! assert!(validate(&definition).is_failure());
//! # Ok(())
//! # }
//! ```

pub mod rules;
pub mod violations;

pub use rules::{
    check_state_has_at_most_one_initial_state, check_state_id_used_once,
    check_state_with_afferent_transition_has_initial_state, rules, Rule,
};
pub use violations::Violation;

use crate::core::State;
use crate::definition::Definition;
use stillwater::{NonEmptyVec, Validation};

/// Run every rule and return all violations.
pub fn check<S: State, E, O>(definition: &Definition<S, E, O>) -> Vec<Violation<S>> {
    rules()
        .iter()
        .flat_map(|rule| rule(definition))
        .collect()
}

/// Run every rule, accumulating all violations into a `Validation`.
pub fn validate<S: State, E, O>(
    definition: &Definition<S, E, O>,
) -> Validation<(), NonEmptyVec<Violation<S>>> {
    match NonEmptyVec::from_vec(check(definition)) {
        Some(violations) => Validation::Failure(violations),
        None => Validation::Success(()),
    }
}
