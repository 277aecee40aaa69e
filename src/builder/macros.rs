//! Macros for declaring symbol sets.

/// Declare an enum and implement [`Symbol`](crate::core::Symbol) for it.
///
/// Variants are indexed in declaration order starting at 1 and named
/// after their identifiers. The same macro declares state sets and
/// event sets.
///
/// # Example
///
/// ```
/// use statelink::core::Symbol;
/// use statelink::symbols;
///
/// symbols! {
///     pub enum Token {
///         Digit,
///         Dot,
///         Done,
///     }
/// }
///
/// assert_eq!(Token::Dot.name(), "Dot");
/// assert_eq!(Token::Dot.index(), 2);
/// assert_eq!(Token::ALL.len(), 3);
/// ```
#[macro_export]
macro_rules! symbols {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl $crate::core::Symbol for $name {
            const ALL: &'static [Self] = &[$(Self::$variant),+];

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Symbol, Tag};

    symbols! {
        enum TestState {
            Initial,
            Processing,
            Complete,
        }
    }

    #[test]
    fn symbols_macro_generates_trait() {
        assert_eq!(TestState::Initial.name(), "Initial");
        assert_eq!(TestState::Complete.name(), "Complete");
        assert_eq!(TestState::Processing.index(), 2);
        assert_eq!(TestState::from_index(3), Some(TestState::Complete));
    }

    #[test]
    fn symbols_supports_visibility_and_attributes() {
        symbols! {
            /// Documented set.
            pub enum PublicSymbol {
                A,
                /// Second member.
                B,
            }
        }

        let tag = Tag::of(PublicSymbol::A);
        assert!(tag.is(PublicSymbol::A));
    }

    #[test]
    fn symbols_round_trip_through_serde() {
        let json = serde_json::to_string(&TestState::Processing).unwrap();
        assert_eq!(json, "\"Processing\"");
        let back: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TestState::Processing);
    }
}
