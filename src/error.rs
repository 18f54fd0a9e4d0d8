//! # Error Handling
//!
//! This module defines the centralized error type for `panbuild`. It uses the
//! `thiserror` library to describe every way resolving a build file or
//! synthesizing a converter command can fail.
//!
//! ## Taxonomy
//!
//! - **Structural errors**: a recognized field has the wrong shape, the common
//!   node declares subtargets, `pandoc_targets` is missing, or the document
//!   itself is not shaped like a build file.
//! - **Value errors**: an empty or ambiguous output path, an empty or ambiguous
//!   output format, or no input files once inheritance has been applied.
//! - **Lookup errors**: a requested target name is not among the resolved
//!   leaves. These are reported per name and never abort the others.
//!
//! Structural and value errors always carry the fully-qualified target name
//! (its `subname`) and the field at fault.

use thiserror::Error;

/// Main error type for panbuild operations
#[derive(Error, Debug)]
pub enum Error {
    /// A recognized field of a target declaration has an unexpected shape.
    #[error("Illegal format for {field} attribute in target {target}: expected {expected}")]
    InvalidField {
        target: String,
        field: String,
        expected: String,
    },

    /// The `pandoc_common` node declared nested subtargets.
    #[error("Common options cannot include subtargets (found {count})")]
    CommonHasSubtargets { count: usize },

    /// The build file has no `pandoc_targets` section.
    #[error("No targets have been specified: missing 'pandoc_targets' section")]
    MissingTargets,

    /// The build file is not shaped like a build file at all.
    #[error("Invalid build file: {message}")]
    InvalidDocument { message: String },

    /// A field has the right shape but a value that cannot produce a command.
    #[error("Invalid {field} for target {target}: {message}")]
    InvalidValue {
        target: String,
        field: String,
        message: String,
    },

    /// A requested target does not exist among the resolved targets.
    #[error("Target '{name}' does not exist in build file{}", hint.as_ref().map(|h| format!("\n  hint: Did you mean '{}'?", h)).unwrap_or_default())]
    TargetNotFound {
        name: String,
        /// Closest existing target name, if any is similar enough
        hint: Option<String>,
    },

    /// A converter command line cannot be turned into a sample build file.
    #[error("Cannot generate a sample build file: {message}")]
    InvalidSample { message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    pub(crate) fn invalid_field(target: &str, field: &str, expected: &str) -> Self {
        Error::InvalidField {
            target: target.to_string(),
            field: field.to_string(),
            expected: expected.to_string(),
        }
    }

    pub(crate) fn invalid_value(target: &str, field: &str, message: impl Into<String>) -> Self {
        Error::InvalidValue {
            target: target.to_string(),
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// The fully-qualified target name this error is attributed to, if any.
    pub fn target(&self) -> Option<&str> {
        match self {
            Error::InvalidField { target, .. } | Error::InvalidValue { target, .. } => {
                Some(target)
            }
            Error::TargetNotFound { name, .. } => Some(name),
            _ => None,
        }
    }
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
