//! Property-based tests for add-on registration.
//!
//! These tests use proptest to generate random lists and values and verify
//! that registration behaves like an ordered set for every input.

#[cfg(test)]
mod proptest_tests {
    use crate::config::Registration;
    use crate::merge::{append_unique, register, RegistrationOutcome};
    use proptest::prelude::*;
    use serde_json::{json, Value as JsonValue};
    use std::fs;
    use tempfile::TempDir;

    fn strings(list: &[JsonValue]) -> Vec<&str> {
        list.iter().filter_map(JsonValue::as_str).collect()
    }

    proptest! {
        /// Property: appending any value any number of times leaves exactly one copy
        #[test]
        fn append_unique_leaves_single_copy(
            initial in prop::collection::vec("[a-z/]{1,8}", 0..8),
            value in "[a-z/]{1,8}",
            repeats in 1usize..5,
        ) {
            let mut initial = initial;
            initial.sort();
            initial.dedup();
            let mut list: Vec<JsonValue> = initial.iter().map(|s| json!(s)).collect();
            let was_present = initial.contains(&value);

            for attempt in 0..repeats {
                let changed = append_unique(&mut list, &value);
                prop_assert_eq!(changed, attempt == 0 && !was_present);
            }

            let count = strings(&list).iter().filter(|s| **s == value).count();
            prop_assert_eq!(count, 1);
        }

        /// Property: existing entries keep their relative order and are never dropped
        #[test]
        fn append_unique_preserves_existing_order(
            initial in prop::collection::vec("[a-z]{1,6}", 0..8),
            values in prop::collection::vec("[a-z]{1,6}", 0..8),
        ) {
            let mut list: Vec<JsonValue> = initial.iter().map(|s| json!(s)).collect();
            for value in &values {
                append_unique(&mut list, value);
            }

            let result = strings(&list);
            let expected: Vec<&str> = initial.iter().map(String::as_str).collect();
            prop_assert_eq!(&result[..expected.len()], &expected[..]);
        }

        /// Property: a file registered with duplicate-free input stays duplicate-free
        /// no matter how often each add-on is registered
        #[test]
        fn register_never_writes_duplicates(
            values in prop::collection::vec("packages/[a-z]{1,6}", 1..6),
        ) {
            let temp = TempDir::new().unwrap();
            let file = temp.path().join("package.json");
            fs::write(&file, "{\"workspaces\": []}\n").unwrap();

            for value in values.iter().chain(values.iter()) {
                let outcome = register(temp.path(), &Registration {
                    file: "package.json".to_string(),
                    path: "workspaces".to_string(),
                    value: value.clone(),
                }).unwrap();
                prop_assert_ne!(outcome, RegistrationOutcome::Skipped);
            }

            let document: JsonValue =
                serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
            let list = document["workspaces"].as_array().unwrap();
            let mut unique = strings(list);
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), list.len());
        }
    }
}
