//! # Option Merger
//!
//! Pure functions combining a parent collection with a child collection of the
//! same kind. Every function builds a new collection; the parent's structures
//! are never modified.
//!
//! | Collection                                   | Rule                 |
//! |----------------------------------------------|----------------------|
//! | `options`                                    | multi-value merge    |
//! | `variables`, `metadata`                      | shallow overwrite    |
//! | `filters`                                    | append               |
//! | `input_files`, `preamble`, `output_basename` | override-or-inherit  |

use crate::options::{OptionSet, OptionValue};
use crate::target::VarMap;

/// Combines two values for the same option key, parent first.
///
/// | parent   | child    | result                         |
/// |----------|----------|--------------------------------|
/// | single   | single   | `Multi([parent, child])`       |
/// | single   | `Multi`  | `Multi([parent, child...])`    |
/// | `Multi`  | single   | `Multi([parent..., child])`    |
/// | `Multi`  | `Multi`  | `Multi([parent..., child...])` |
///
/// A [`OptionValue::Flag`] counts as a single, argument-less occurrence.
pub fn merge_option_value(parent: OptionValue, child: OptionValue) -> OptionValue {
    let mut merged = into_occurrences(parent);
    merged.extend(into_occurrences(child));
    OptionValue::Multi(merged)
}

fn into_occurrences(value: OptionValue) -> Vec<String> {
    match value {
        OptionValue::Flag => vec![String::new()],
        OptionValue::Scalar(v) => vec![v],
        OptionValue::Multi(vs) => vs,
    }
}

/// Merges one option into a set under construction.
///
/// A key absent from the set is inserted verbatim, keeping its plurality.
pub fn merge_option_entry(set: &mut OptionSet, key: &str, value: OptionValue) {
    match set.get_mut(key) {
        Some(existing) => {
            let previous = std::mem::replace(existing, OptionValue::Flag);
            *existing = merge_option_value(previous, value);
        }
        None => {
            set.insert(key.to_string(), value);
        }
    }
}

/// Multi-value merge of two option sets.
///
/// Keys keep the parent's order; keys new in the child follow in the child's
/// order.
pub fn merge_options(parent: &OptionSet, child: &OptionSet) -> OptionSet {
    let mut merged = parent.clone();
    for (key, value) in child {
        merge_option_entry(&mut merged, key, value.clone());
    }
    merged
}

/// Shallow overwrite merge: the child's value wins on every key collision.
pub fn merge_shallow(parent: &VarMap, child: &VarMap) -> VarMap {
    let mut merged = parent.clone();
    for (key, value) in child {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Append merge: the parent's items followed by the child's, duplicates kept.
pub fn append<T: Clone>(parent: &[T], child: &[T]) -> Vec<T> {
    let mut merged = Vec::with_capacity(parent.len() + child.len());
    merged.extend_from_slice(parent);
    merged.extend_from_slice(child);
    merged
}

/// Override-or-inherit for file lists: a non-empty child list replaces the
/// parent's entirely, an empty one inherits a copy of it.
pub fn override_list(parent: &[String], child: &[String]) -> Vec<String> {
    if child.is_empty() {
        parent.to_vec()
    } else {
        child.to_vec()
    }
}

/// Override-or-inherit for optional values.
pub fn override_or_inherit<T: Clone>(parent: Option<&T>, child: Option<T>) -> Option<T> {
    child.or_else(|| parent.cloned())
}
