//! # Converter Options
//!
//! Option values as they appear in a build file and, after merging, in the
//! converter command line.
//!
//! An option key maps to one of three explicit shapes:
//!
//! - [`OptionValue::Flag`]: the option is given without an argument (`s:` or
//!   `s: ""` in YAML, `-s` in an option string).
//! - [`OptionValue::Scalar`]: the option is given exactly once with an argument.
//! - [`OptionValue::Multi`]: the option is given several times, either as a
//!   YAML sequence or by accumulation across inheritance levels. An empty
//!   element stands for an argument-less occurrence.
//!
//! Keys are case-sensitive. A single-character key is a short option (`-t`),
//! anything longer is a long option (`--to`).

use indexmap::IndexMap;
use serde_yaml::Value;

/// The value of one converter option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    /// Option without an argument.
    Flag,
    /// Option given once with an argument.
    Scalar(String),
    /// Option given several times; empty strings are argument-less occurrences.
    Multi(Vec<String>),
}

impl OptionValue {
    /// Builds a single-occurrence value, treating an empty or absent argument
    /// as a flag.
    pub fn single(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.is_empty() => OptionValue::Scalar(v),
            _ => OptionValue::Flag,
        }
    }

    /// Every occurrence of the option in order. A flag yields one empty value.
    pub fn values(&self) -> Vec<&str> {
        match self {
            OptionValue::Flag => vec![""],
            OptionValue::Scalar(v) => vec![v.as_str()],
            OptionValue::Multi(vs) => vs.iter().map(String::as_str).collect(),
        }
    }

    /// Converts a YAML value into an option value.
    ///
    /// Returns `None` when the value is a mapping or a sequence containing
    /// anything other than scalars.
    pub fn from_yaml(value: &Value) -> Option<Self> {
        match value {
            Value::Sequence(items) => items
                .iter()
                .map(|item| scalar_text(item).map(Option::unwrap_or_default))
                .collect::<Option<Vec<_>>>()
                .map(OptionValue::Multi),
            other => scalar_text(other).map(OptionValue::single),
        }
    }
}

/// An insertion-ordered set of converter options.
pub type OptionSet = IndexMap<String, OptionValue>;

/// Returns `true` if `key` is written as a short (`-k`) option.
pub fn is_short(key: &str) -> bool {
    key.chars().count() == 1
}

/// Renders a YAML scalar as text.
///
/// `null` renders as `Some(None)`; strings, numbers and booleans as their
/// textual form. Mappings, sequences and tagged values are not scalars and
/// yield `None`.
pub fn scalar_text(value: &Value) -> Option<Option<String>> {
    match value {
        Value::Null => Some(None),
        Value::String(s) => Some(Some(s.clone())),
        Value::Bool(b) => Some(Some(b.to_string())),
        Value::Number(n) => Some(Some(n.to_string())),
        _ => None,
    }
}

/// Parses options written in converter command-line syntax.
///
/// `=` is treated as whitespace, so `--to=beamer` and `--to beamer` are the
/// same. A token following an option is its argument unless it starts with
/// `-`. Bare words that do not follow an option are input file names and are
/// returned separately. Repeated options accumulate in order.
///
/// # Examples
///
/// ```
/// use panbuild::options::{parse_option_string, OptionValue};
///
/// let (inputs, options) = parse_option_string("a.md -t beamer -s --pdf-engine=xelatex -F a -F b");
/// assert_eq!(inputs, vec!["a.md"]);
/// assert_eq!(options["t"], OptionValue::Scalar("beamer".to_string()));
/// assert_eq!(options["s"], OptionValue::Flag);
/// assert_eq!(options["pdf-engine"].values(), vec!["xelatex"]);
/// assert_eq!(options["F"].values(), vec!["a", "b"]);
/// ```
pub fn parse_option_string(args: &str) -> (Vec<String>, OptionSet) {
    let spaced = args.replace('=', " ");
    let mut tokens = spaced.split_whitespace().peekable();
    let mut inputs = Vec::new();
    let mut options = OptionSet::new();

    while let Some(token) = tokens.next() {
        let key = if let Some(long) = token.strip_prefix("--") {
            long
        } else if let Some(short) = token.strip_prefix('-') {
            short
        } else {
            inputs.push(token.to_string());
            continue;
        };

        let value = match tokens.peek() {
            Some(next) if !next.starts_with('-') => tokens.next().map(str::to_string),
            _ => None,
        };

        crate::merge::merge_option_entry(&mut options, key, OptionValue::single(value));
    }

    (inputs, options)
}
