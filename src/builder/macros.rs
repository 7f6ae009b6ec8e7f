//! Macros for ergonomic definition construction.

/// Generate a state id enum and its State trait implementation.
///
/// # Example
///
/// ```
/// use statechart::state_enum;
/// use statechart::core::State;
///
/// state_enum! {
///     pub enum Washer {
///         Root,
///         Running,
///         Washing,
///         PowerOff,
///     }
/// }
///
/// assert_eq!(Washer::Washing.name(), "Washing");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::State;
    use std::collections::HashSet;

    state_enum! {
        enum TestState {
            Root,
            Off,
            On,
        }
    }

    #[test]
    fn state_enum_macro_generates_trait() {
        assert_eq!(TestState::Root.name(), "Root");
        assert_eq!(TestState::Off.name(), "Off");
        assert_eq!(TestState::On.name(), "On");
    }

    #[test]
    fn state_enum_supports_visibility() {
        state_enum! {
            pub enum PublicState {
                A,
                B,
            }
        }

        let _state = PublicState::A;
    }

    #[test]
    fn state_enum_derives_hash_and_copy() {
        let state = TestState::On;
        let copy = state;
        let ids: HashSet<_> = [state, copy, TestState::Off].into_iter().collect();
        assert_eq!(ids.len(), 2);
    }
}
