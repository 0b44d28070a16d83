//! Property tests for the option round-trip law: options read from one
//! instance and written to a fresh instance reproduce every property.

use opus_fieldtype::{FieldType, FieldTypeOptions, RegexType, SelectType, Validation};
use proptest::prelude::*;

fn validation_strategy() -> impl Strategy<Value = Option<Validation>> {
    prop_oneof![
        Just(None),
        Just(Some(Validation::None)),
        Just(Some(Validation::Strict)),
    ]
}

fn pattern_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::string::string_regex("[a-z0-9]{1,8}(\\+|\\*)?").unwrap())
}

fn values_strategy() -> impl Strategy<Value = Option<Vec<String>>> {
    prop::option::of(prop::collection::vec(
        prop::string::string_regex("[a-zA-Z][a-zA-Z0-9 ]{0,10}[a-zA-Z0-9]").unwrap(),
        0..8,
    ))
}

fn assert_round_trip(original: &dyn FieldType, copy: &mut dyn FieldType) -> Result<(), TestCaseError> {
    match original.get_options() {
        Some(encoded) => {
            copy.set_options(encoded.as_str());
            for property in original.option_properties() {
                prop_assert_eq!(copy.option(property), original.option(property));
            }
        }
        None => {
            for property in original.option_properties() {
                prop_assert!(original.option(property).is_none());
            }
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn regex_round_trip(pattern in pattern_strategy(), validation in validation_strategy()) {
        let mut original = RegexType::new();
        if let Some(pattern) = &pattern {
            prop_assert!(original.set_regex(pattern));
        }
        if let Some(validation) = validation {
            original.set_validation(validation);
        }
        assert_round_trip(&original, &mut RegexType::new())?;
    }

    #[test]
    fn select_round_trip(values in values_strategy(), validation in validation_strategy()) {
        let mut original = SelectType::new();
        if let Some(values) = values {
            original.set_values(values);
        }
        if let Some(validation) = validation {
            original.set_validation(validation);
        }
        assert_round_trip(&original, &mut SelectType::new())?;
    }
}
