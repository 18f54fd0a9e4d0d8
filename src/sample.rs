//! # Sample Build Files
//!
//! Turns a converter command line into a starter build file. Input files and
//! filters go to `pandoc_common`; everything else becomes the options of one
//! target named after the output format.
//!
//! ```
//! use panbuild::sample::{sample_build_file, SampleOptions};
//!
//! let yaml = sample_build_file("talk.md -t beamer -s", &SampleOptions::default()).unwrap();
//! let doc: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
//! assert_eq!(doc["pandoc_common"]["input_files"][0], "talk.md");
//! assert_eq!(doc["pandoc_targets"]["BEAMER"]["options"], "-t beamer -s");
//! ```

use log::debug;
use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::command::push_option;
use crate::error::{Error, Result};
use crate::options::{parse_option_string, OptionSet, OptionValue};

/// Option keys moved to `pandoc_common` as filters.
const FILTER_KEYS: &[&str] = &["F", "filter"];

/// Option keys naming the output format, in lookup order.
const FORMAT_KEYS: &[&str] = &["t", "to"];

/// How the sample is laid out.
#[derive(Debug, Clone, Default)]
pub struct SampleOptions {
    /// Write the options as a YAML mapping instead of a command-line string.
    pub yaml_options: bool,
    /// Target name; defaults to the upper-cased output format.
    pub target_name: Option<String>,
    /// Mark the build file as dual-language.
    pub dual: bool,
}

#[derive(Debug, Serialize)]
struct SampleFile {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    dual: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pandoc_common: Option<SampleCommon>,
    pandoc_targets: Mapping,
}

#[derive(Debug, Serialize)]
struct SampleCommon {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    input_files: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    filters: Vec<String>,
}

/// Builds the YAML text of a sample build file from converter arguments.
///
/// Fails if the arguments contain no option at all, or do not name exactly
/// one output format.
pub fn sample_build_file(args: &str, sample: &SampleOptions) -> Result<String> {
    let (input_files, options) = parse_option_string(args);
    if options.is_empty() {
        return Err(invalid_sample("no options found in the converter command"));
    }

    let format = output_format(&options)?;
    let target_name = sample
        .target_name
        .clone()
        .unwrap_or_else(|| format.to_uppercase());

    let filters: Vec<String> = FILTER_KEYS
        .iter()
        .filter_map(|key| options.get(*key))
        .flat_map(|value| value.values())
        .filter(|filter| !filter.is_empty())
        .map(str::to_string)
        .collect();

    let kept: OptionSet = options
        .into_iter()
        .filter(|(key, _)| !FILTER_KEYS.contains(&key.as_str()))
        .collect();

    let rendered = if sample.yaml_options {
        options_mapping(&kept)
    } else {
        Value::String(option_text(&kept))
    };

    let mut target = Mapping::new();
    target.insert(Value::from("options"), rendered);
    let mut targets = Mapping::new();
    targets.insert(Value::from(target_name.as_str()), Value::Mapping(target));

    let pandoc_common = if input_files.is_empty() && filters.is_empty() {
        None
    } else {
        Some(SampleCommon {
            input_files,
            filters,
        })
    };

    debug!("Generating sample build file with target {}", target_name);
    let file = SampleFile {
        dual: sample.dual,
        pandoc_common,
        pandoc_targets: targets,
    };
    Ok(serde_yaml::to_string(&file)?)
}

fn invalid_sample(message: &str) -> Error {
    Error::InvalidSample {
        message: message.to_string(),
    }
}

/// The single output format named by `-t`/`--to`.
fn output_format(options: &OptionSet) -> Result<String> {
    let value = FORMAT_KEYS
        .iter()
        .find_map(|key| options.get(*key))
        .ok_or_else(|| invalid_sample("no output format (-t/--to) in the converter command"))?;

    match value.values().as_slice() {
        [format] if !format.is_empty() => Ok(format.to_string()),
        [] | [_] => Err(invalid_sample("the output format is empty")),
        many => Err(Error::InvalidSample {
            message: format!("{} output formats given, expected one", many.len()),
        }),
    }
}

/// Options rendered back in command-line syntax.
fn option_text(options: &OptionSet) -> String {
    let mut args = Vec::new();
    for (key, value) in options {
        push_option(&mut args, key, value);
    }
    args.join(" ")
}

/// Options as a YAML mapping; argument-less occurrences become `null`.
fn options_mapping(options: &OptionSet) -> Value {
    let occurrence = |item: &str| {
        if item.is_empty() {
            Value::Null
        } else {
            Value::from(item)
        }
    };

    let mut map = Mapping::new();
    for (key, value) in options {
        let rendered = match value {
            OptionValue::Flag => Value::Null,
            OptionValue::Scalar(v) => Value::from(v.as_str()),
            OptionValue::Multi(vs) => {
                Value::Sequence(vs.iter().map(|v| occurrence(v.as_str())).collect())
            }
        };
        map.insert(Value::from(key.as_str()), rendered);
    }
    Value::Mapping(map)
}
