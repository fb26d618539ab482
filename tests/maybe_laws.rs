//! Property-based tests for `Maybe` laws and its lift into `Outcome`.

use fintake::control::{Maybe, Outcome};
use proptest::prelude::*;

fn maybe_strategy() -> impl Strategy<Value = Maybe<i32>> {
    any::<Option<i32>>().prop_map(Maybe::from)
}

fn positive(value: i32) -> Maybe<i32> {
    if value > 0 { Maybe::some(value) } else { Maybe::none() }
}

proptest! {
    #[test]
    fn prop_left_identity(value in any::<i32>()) {
        prop_assert_eq!(Maybe::some(value).bind(positive), positive(value));
    }

    #[test]
    fn prop_none_short_circuits(_value in any::<i32>()) {
        prop_assert_eq!(Maybe::<i32>::none().bind(positive), Maybe::None);
    }

    #[test]
    fn prop_functor_identity(maybe in maybe_strategy()) {
        prop_assert_eq!(maybe.map(|value| value), maybe);
    }

    #[test]
    fn prop_functor_composition(maybe in maybe_strategy()) {
        let first = |value: i32| value.wrapping_add(11);
        let second = |value: i32| value.wrapping_mul(-2);
        prop_assert_eq!(maybe.map(first).map(second), maybe.map(|value| second(first(value))));
    }

    #[test]
    fn prop_ok_or_agrees_with_option(maybe in maybe_strategy()) {
        let lifted: Outcome<i32> = maybe.ok_or("absent".to_string());
        let expected: Result<i32, String> = maybe.into_option().ok_or_else(|| "absent".to_string());
        prop_assert_eq!(lifted.into_result(), expected);
    }

    #[test]
    fn prop_unwrap_or_total(maybe in maybe_strategy(), fallback in any::<i32>()) {
        let expected = maybe.into_option().unwrap_or(fallback);
        prop_assert_eq!(maybe.unwrap_or(fallback), expected);
    }
}
