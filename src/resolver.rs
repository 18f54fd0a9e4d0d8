//! # Tree Resolver
//!
//! Walks the nested target declarations of a [`BuildFile`] depth-first and
//! returns the flat list of leaf [`Target`]s, in declaration order.
//!
//! ## Levels
//!
//! - **Level 0** is the common node (`pandoc_common`). It may not declare
//!   subtargets.
//! - **Level 1** targets (`pandoc_targets`) start from a full copy of the
//!   common node's state and merge their own fields on top. They have no
//!   parent reference, so their subname is their bare name.
//! - **Level 2+** subtargets start empty and are merged with their parent at
//!   construction, which gives them the `parent/name` subname.
//!
//! Only leaves are returned: a node with subtargets is an inheritance step,
//! never a buildable target.
//!
//! ## Dual-language mode
//!
//! With [`Settings::dual`] on, every level-1 target other than `common` gets
//! one child per language tag. A child the user already declared under that
//! tag gets `lang_enabled: <tag>` added to its metadata; a missing one is
//! created with only that metadata.
//!
//! ## Failure policy
//!
//! Resolution is all-or-nothing: the first malformed field anywhere in the
//! tree aborts the run and names the target and field at fault.

use std::sync::Arc;

use log::{debug, warn};
use serde_yaml::{Mapping, Value};

use crate::config::{BuildFile, Settings};
use crate::error::{Error, Result};
use crate::merge;
use crate::options::{parse_option_string, scalar_text, OptionValue};
use crate::suggestions;
use crate::target::{OutputBasename, Target, TargetFields, VarMap};

/// Name of the level-0 node.
pub const COMMON_NAME: &str = "common";

/// Metadata key injected into language children in dual mode.
pub const LANG_ENABLED_KEY: &str = "lang_enabled";

/// Keys of a target declaration that are fields rather than subtargets.
pub const RECOGNIZED_FIELDS: &[&str] = &[
    "options",
    "variables",
    "metadata",
    "filters",
    "input_files",
    "preamble",
    "output_basename",
];

/// Resolves a build file with its own settings.
pub fn resolve(file: &BuildFile) -> Result<Vec<Target>> {
    resolve_with(file, &file.settings)
}

/// Resolves a build file with explicit settings.
pub fn resolve_with(file: &BuildFile, settings: &Settings) -> Result<Vec<Target>> {
    let resolver = Resolver { settings };

    let common = file
        .pandoc_common
        .as_ref()
        .map(|decl| resolver.resolve_common(decl))
        .transpose()?;

    let targets = file.pandoc_targets.as_ref().ok_or(Error::MissingTargets)?;

    let mut leaves = Vec::new();
    for (key, body) in targets {
        let name = key_name(key, "pandoc_targets")?;
        let pending = Pending {
            name,
            body: Some(body),
            injected: VarMap::new(),
        };
        leaves.extend(resolver.resolve_node(pending, Origin::TopLevel(common.as_ref()))?);
    }

    debug!("Resolved {} target(s)", leaves.len());
    Ok(leaves)
}

/// A subtarget waiting to be resolved.
struct Pending<'a> {
    name: String,
    /// Declaration body; `None` for a synthesized language child.
    body: Option<&'a Value>,
    /// Metadata added on top of whatever the body declares.
    injected: VarMap,
}

/// Where a node below the common node sits, and what it inherits from.
enum Origin<'p> {
    /// Level 1, copying the common node's state if there is one.
    TopLevel(Option<&'p Target>),
    /// Level 2 and below, merged with the parent at construction.
    Nested(&'p Arc<Target>, usize),
}

impl Origin<'_> {
    fn level(&self) -> usize {
        match self {
            Origin::TopLevel(_) => 1,
            Origin::Nested(_, level) => *level,
        }
    }

    fn subname_of(&self, name: &str) -> String {
        match self {
            Origin::Nested(parent, _) => format!("{}/{}", parent.subname(), name),
            _ => name.to_string(),
        }
    }
}

struct Resolver<'s> {
    settings: &'s Settings,
}

impl Resolver<'_> {
    fn resolve_common(&self, body: &Value) -> Result<Target> {
        let (fields, children) = parse_declaration(COMMON_NAME, Some(body))?;
        if !children.is_empty() {
            return Err(Error::CommonHasSubtargets {
                count: children.len(),
            });
        }
        debug!("Resolved common node");
        Ok(Target::new(COMMON_NAME, None, fields))
    }

    fn resolve_node<'a>(&self, pending: Pending<'a>, origin: Origin<'_>) -> Result<Vec<Target>> {
        let level = origin.level();
        let subname = origin.subname_of(&pending.name);

        let (mut declared, mut children) = parse_declaration(&subname, pending.body)?;
        declared.metadata = merge::merge_shallow(&declared.metadata, &pending.injected);

        let target = match origin {
            Origin::TopLevel(Some(common)) => Target::new(
                &pending.name,
                None,
                TargetFields::inherit(common.fields(), declared),
            ),
            Origin::TopLevel(None) => Target::new(&pending.name, None, declared),
            Origin::Nested(parent, _) => {
                Target::new(&pending.name, Some(Arc::clone(parent)), declared)
            }
        };

        if self.settings.dual && level == 1 && pending.name != COMMON_NAME {
            self.expand_languages(&mut children);
        }

        debug!(
            "Resolved target {} (level {}, {} subtarget(s))",
            target.subname(),
            level,
            children.len()
        );

        if children.is_empty() {
            return Ok(vec![target]);
        }

        let node = Arc::new(target);
        let mut leaves = Vec::new();
        for child in children {
            leaves.extend(self.resolve_node(child, Origin::Nested(&node, level + 1))?);
        }
        Ok(leaves)
    }

    /// Makes sure both language children exist and carry `lang_enabled`.
    fn expand_languages(&self, children: &mut Vec<Pending<'_>>) {
        for lang in self.settings.languages() {
            let tag = Some(lang.to_string());
            match children.iter_mut().find(|child| child.name == lang) {
                Some(child) => {
                    child.injected.insert(LANG_ENABLED_KEY.to_string(), tag);
                }
                None => {
                    let mut injected = VarMap::new();
                    injected.insert(LANG_ENABLED_KEY.to_string(), tag);
                    children.push(Pending {
                        name: lang.to_string(),
                        body: None,
                        injected,
                    });
                }
            }
        }
    }
}

/// Splits a declaration into its fields and its subtargets.
fn parse_declaration<'a>(
    subname: &str,
    body: Option<&'a Value>,
) -> Result<(TargetFields, Vec<Pending<'a>>)> {
    let mut fields = TargetFields::default();
    let mut children = Vec::new();

    let map = match body {
        None | Some(Value::Null) => return Ok((fields, children)),
        Some(Value::Mapping(map)) => map,
        Some(_) => {
            return Err(Error::InvalidDocument {
                message: format!("declaration of target {} must be a mapping", subname),
            })
        }
    };

    for (key, value) in map {
        let key = key_name(key, subname)?;
        match key.as_str() {
            "options" => parse_options(subname, value, &mut fields)?,
            "variables" => fields.variables = parse_var_map(subname, "variables", value)?,
            "metadata" => fields.metadata = parse_var_map(subname, "metadata", value)?,
            "filters" => fields.filters = parse_filters(subname, value)?,
            "input_files" => fields.input_files = parse_file_list(subname, "input_files", value)?,
            "preamble" => fields.preamble = parse_file_list(subname, "preamble", value)?,
            "output_basename" => fields.output_basename = parse_output_basename(subname, value)?,
            _ => {
                if let Some(field) = suggestions::similar_field(&key) {
                    warn!(
                        "Treating '{}' in target {} as a subtarget; did you mean '{}'?",
                        key, subname, field
                    );
                }
                children.push(Pending {
                    name: key,
                    body: Some(value),
                    injected: VarMap::new(),
                });
            }
        }
    }

    Ok((fields, children))
}

fn key_name(key: &Value, context: &str) -> Result<String> {
    match scalar_text(key) {
        Some(Some(name)) if !name.is_empty() => Ok(name),
        _ => Err(Error::InvalidDocument {
            message: format!("keys in {} must be non-empty scalars, found {:?}", context, key),
        }),
    }
}

fn parse_options(subname: &str, value: &Value, fields: &mut TargetFields) -> Result<()> {
    match value {
        Value::Mapping(map) => {
            for (key, raw) in map {
                let key = key_name(key, subname)?;
                let option = OptionValue::from_yaml(raw).ok_or_else(|| {
                    Error::invalid_field(
                        subname,
                        "options",
                        "scalar or sequence-of-scalar option values",
                    )
                })?;
                merge::merge_option_entry(&mut fields.options, &key, option);
            }
            Ok(())
        }
        Value::String(args) => {
            let (inputs, options) = parse_option_string(args);
            if !inputs.is_empty() {
                debug!(
                    "Ignoring input names {:?} in option string of target {}",
                    inputs, subname
                );
            }
            fields.options = merge::merge_options(&fields.options, &options);
            Ok(())
        }
        _ => Err(Error::invalid_field(
            subname,
            "options",
            "a mapping or an option string",
        )),
    }
}

fn parse_var_map(subname: &str, field: &str, value: &Value) -> Result<VarMap> {
    let map: &Mapping = value
        .as_mapping()
        .ok_or_else(|| Error::invalid_field(subname, field, "a mapping"))?;

    map.iter()
        .map(|(key, raw)| {
            let key = key_name(key, subname)?;
            let text = scalar_text(raw)
                .ok_or_else(|| Error::invalid_field(subname, field, "scalar values"))?;
            Ok((key, text))
        })
        .collect()
}

fn parse_filters(subname: &str, value: &Value) -> Result<Vec<String>> {
    let items = value
        .as_sequence()
        .ok_or_else(|| Error::invalid_field(subname, "filters", "a sequence"))?;
    string_items(subname, "filters", items)
}

fn parse_file_list(subname: &str, field: &str, value: &Value) -> Result<Vec<String>> {
    match value {
        Value::String(path) => Ok(vec![path.clone()]),
        Value::Sequence(items) => string_items(subname, field, items),
        _ => Err(Error::invalid_field(
            subname,
            field,
            "a file name or a sequence of file names",
        )),
    }
}

fn string_items(subname: &str, field: &str, items: &[Value]) -> Result<Vec<String>> {
    items
        .iter()
        .map(|item| match scalar_text(item) {
            Some(Some(text)) => Ok(text),
            _ => Err(Error::invalid_field(subname, field, "a sequence of strings")),
        })
        .collect()
}

/// An empty string or mapping counts as not given, so the parent's basename
/// is inherited.
fn parse_output_basename(subname: &str, value: &Value) -> Result<Option<OutputBasename>> {
    let expected = "a string or a mapping from target name to string";
    match value {
        Value::String(name) if name.is_empty() => Ok(None),
        Value::String(name) => Ok(Some(OutputBasename::Single(name.clone()))),
        Value::Mapping(map) if map.is_empty() => Ok(None),
        Value::Mapping(map) => map
            .iter()
            .map(|(key, raw)| match (scalar_text(key), raw.as_str()) {
                (Some(Some(target)), Some(base)) => Ok((target, base.to_string())),
                _ => Err(Error::invalid_field(subname, "output_basename", expected)),
            })
            .collect::<Result<_>>()
            .map(|bases| Some(OutputBasename::PerTarget(bases))),
        _ => Err(Error::invalid_field(subname, "output_basename", expected)),
    }
}
