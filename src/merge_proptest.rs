//! Property-based tests for the option merger.
//!
//! These tests use proptest to generate random parent/child collections and
//! check that the merge laws hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::merge::{append, merge_options, merge_shallow, override_list};
    use crate::options::{OptionSet, OptionValue};
    use crate::target::VarMap;
    use proptest::prelude::*;

    fn option_value() -> impl Strategy<Value = OptionValue> {
        prop_oneof![
            Just(OptionValue::Flag),
            "[a-z0-9.]{1,8}".prop_map(OptionValue::Scalar),
            prop::collection::vec("[a-z0-9.]{0,8}", 0..4).prop_map(OptionValue::Multi),
        ]
    }

    fn option_set() -> impl Strategy<Value = OptionSet> {
        prop::collection::vec(("[a-zA-Z]{1,6}", option_value()), 0..6)
            .prop_map(|entries| entries.into_iter().collect())
    }

    fn var_map() -> impl Strategy<Value = VarMap> {
        prop::collection::vec(("[a-z]{1,6}", prop::option::of("[a-z]{0,6}")), 0..6)
            .prop_map(|entries| entries.into_iter().collect())
    }

    fn file_list() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec("[a-z]{1,6}\\.md", 0..4)
    }

    proptest! {
        /// Property: a key only in the child comes through with its exact value and plurality
        #[test]
        fn child_only_keys_are_verbatim(parent in option_set(), child in option_set()) {
            let merged = merge_options(&parent, &child);
            for (key, value) in &child {
                if !parent.contains_key(key) {
                    prop_assert_eq!(&merged[key], value);
                }
            }
        }

        /// Property: a key only in the parent is unchanged
        #[test]
        fn parent_only_keys_are_unchanged(parent in option_set(), child in option_set()) {
            let merged = merge_options(&parent, &child);
            for (key, value) in &parent {
                if !child.contains_key(key) {
                    prop_assert_eq!(&merged[key], value);
                }
            }
        }

        /// Property: a scalar key in both yields a 2-element list, parent first
        #[test]
        fn scalar_in_both_yields_pair(key in "[a-z]{1,4}", a in "[a-z]{1,4}", b in "[a-z]{1,4}") {
            let mut parent = OptionSet::new();
            parent.insert(key.clone(), OptionValue::Scalar(a.clone()));
            let mut child = OptionSet::new();
            child.insert(key.clone(), OptionValue::Scalar(b.clone()));

            let merged = merge_options(&parent, &child);
            prop_assert_eq!(&merged[&key], &OptionValue::Multi(vec![a, b]));
        }

        /// Property: occurrences of a shared key are parent's followed by child's
        #[test]
        fn shared_keys_concatenate_occurrences(parent in option_set(), child in option_set()) {
            let merged = merge_options(&parent, &child);
            for (key, value) in &child {
                if let Some(old) = parent.get(key) {
                    let mut expected = old.values();
                    expected.extend(value.values());
                    prop_assert_eq!(merged[key].values(), expected);
                }
            }
        }

        /// Property: merged key set is the union of both key sets
        #[test]
        fn merged_keys_are_union(parent in option_set(), child in option_set()) {
            let merged = merge_options(&parent, &child);
            for key in parent.keys().chain(child.keys()) {
                prop_assert!(merged.contains_key(key));
            }
            prop_assert!(merged.len() <= parent.len() + child.len());
        }

        /// Property: filters always concatenate, including empty sides
        #[test]
        fn filters_concatenate(parent in file_list(), child in file_list()) {
            let merged = append(&parent, &child);
            prop_assert_eq!(merged.len(), parent.len() + child.len());
            prop_assert_eq!(&merged[..parent.len()], &parent[..]);
            prop_assert_eq!(&merged[parent.len()..], &child[..]);
        }

        /// Property: file lists are replaced by a non-empty child and inherited otherwise
        #[test]
        fn file_lists_override_or_inherit(parent in file_list(), child in file_list()) {
            let merged = override_list(&parent, &child);
            if child.is_empty() {
                prop_assert_eq!(merged, parent);
            } else {
                prop_assert_eq!(merged, child);
            }
        }

        /// Property: shallow merge takes the child's value on every collision
        #[test]
        fn shallow_merge_child_wins(parent in var_map(), child in var_map()) {
            let merged = merge_shallow(&parent, &child);
            for (key, value) in &child {
                prop_assert_eq!(&merged[key], value);
            }
            for (key, value) in &parent {
                if !child.contains_key(key) {
                    prop_assert_eq!(&merged[key], value);
                }
            }
        }
    }
}
