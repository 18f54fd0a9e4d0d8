//! # Build File and Settings
//!
//! This module defines the already-loaded build file handed to the resolver,
//! and the [`Settings`] threaded through a resolution run.
//!
//! A build file is a YAML mapping with these top-level keys:
//!
//! ```yaml
//! dual: true              # optional, dual-language mode
//! lang1: SP               # optional, first language tag
//! lang2: EN               # optional, second language tag
//! dual_filters_dir: dir   # optional, where dual_md.py/teaching_md.py live
//! pandoc_common:          # optional, inherited by every target
//!   options: {s: ~}
//! pandoc_targets:         # required
//!   slides:
//!     options: {t: beamer}
//!     input_files: [a.md]
//! ```
//!
//! Other top-level keys are ignored, so a build file can live in a larger
//! YAML document.

use crate::error::{Error, Result};
use serde::Deserialize;
use serde_yaml::{Mapping, Value};

/// Name of the converter invoked when none is configured.
pub const DEFAULT_CONVERTER: &str = "pandoc";

/// Default build file looked up by the CLI.
pub const DEFAULT_BUILD_FILE: &str = "build.yaml";

/// Default first language tag in dual mode.
pub const DEFAULT_LANG1: &str = "SP";

/// Default second language tag in dual mode.
pub const DEFAULT_LANG2: &str = "EN";

/// Per-run settings for resolution and command synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Dual-language mode: every top-level target gets one child per language
    /// and the dual filters wrap each filter list.
    #[serde(default)]
    pub dual: bool,
    #[serde(default = "default_lang1")]
    pub lang1: String,
    #[serde(default = "default_lang2")]
    pub lang2: String,
    /// Directory holding the dual-mode filter scripts.
    #[serde(default)]
    pub dual_filters_dir: Option<String>,
    /// Converter executable placed as argument 0 of every command.
    #[serde(skip, default = "default_converter")]
    pub converter: String,
}

fn default_lang1() -> String {
    DEFAULT_LANG1.to_string()
}

fn default_lang2() -> String {
    DEFAULT_LANG2.to_string()
}

fn default_converter() -> String {
    DEFAULT_CONVERTER.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            dual: false,
            lang1: default_lang1(),
            lang2: default_lang2(),
            dual_filters_dir: None,
            converter: default_converter(),
        }
    }
}

impl Settings {
    /// The two language tags, in declaration order.
    pub fn languages(&self) -> [&str; 2] {
        [&self.lang1, &self.lang2]
    }
}

/// A loaded build file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildFile {
    #[serde(flatten)]
    pub settings: Settings,
    /// Raw declaration of the common node.
    #[serde(default)]
    pub pandoc_common: Option<Value>,
    /// Top-level target declarations, in document order.
    #[serde(default)]
    pub pandoc_targets: Option<Mapping>,
}

impl BuildFile {
    /// Builds a build file from an already-parsed YAML document.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_mapping() {
            return Err(Error::InvalidDocument {
                message: "the build file must be a YAML mapping".to_string(),
            });
        }
        Ok(serde_yaml::from_value(value)?)
    }
}

/// Parses build file YAML text.
pub fn parse(yaml_content: &str) -> Result<BuildFile> {
    let value: Value = serde_yaml::from_str(yaml_content)?;
    BuildFile::from_value(value)
}

/// Parses a build file from a path.
pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<BuildFile> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}
