//! # Targets
//!
//! A [`Target`] is one node of the resolved build tree. It is built once from
//! its parent (if any) and the fields declared on it, and never changes
//! afterwards except for the converter command attached by the command
//! synthesizer.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::merge;
use crate::options::OptionSet;

/// Variables and metadata: keys with an optional value.
pub type VarMap = IndexMap<String, Option<String>>;

/// Base name for the output file of a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputBasename {
    /// The same base name for every target inheriting it.
    Single(String),
    /// Base names keyed by target name.
    PerTarget(IndexMap<String, String>),
}

/// The collections a node carries, before or after inheritance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetFields {
    pub options: OptionSet,
    pub variables: VarMap,
    pub metadata: VarMap,
    pub filters: Vec<String>,
    pub input_files: Vec<String>,
    pub preamble: Vec<String>,
    pub output_basename: Option<OutputBasename>,
}

impl TargetFields {
    /// Merges `child` on top of `parent` with each collection's merge rule.
    pub fn inherit(parent: &TargetFields, child: TargetFields) -> TargetFields {
        TargetFields {
            options: merge::merge_options(&parent.options, &child.options),
            variables: merge::merge_shallow(&parent.variables, &child.variables),
            metadata: merge::merge_shallow(&parent.metadata, &child.metadata),
            filters: merge::append(&parent.filters, &child.filters),
            input_files: merge::override_list(&parent.input_files, &child.input_files),
            preamble: merge::override_list(&parent.preamble, &child.preamble),
            output_basename: merge::override_or_inherit(
                parent.output_basename.as_ref(),
                child.output_basename,
            ),
        }
    }
}

/// The synthesized converter invocation for a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterCommand {
    /// Argument vector; the first element is the converter executable.
    pub args: Vec<String>,
    /// Resolved output file path, also present in `args` after `-o`.
    pub outfile: String,
}

/// A resolved node of the build tree.
#[derive(Debug, Clone)]
pub struct Target {
    name: String,
    subname: String,
    parent: Option<Arc<Target>>,
    fields: TargetFields,
    command: Option<ConverterCommand>,
}

impl Target {
    /// Builds a node from its parent and the fields declared on it.
    ///
    /// With a parent, the declared fields are merged on top of the parent's
    /// and the subname is `parent/name`. Without one, the fields are taken as
    /// they are and the subname is the bare name.
    pub fn new(name: &str, parent: Option<Arc<Target>>, declared: TargetFields) -> Self {
        let (subname, fields) = match &parent {
            Some(p) => (
                format!("{}/{}", p.subname, name),
                TargetFields::inherit(&p.fields, declared),
            ),
            None => (name.to_string(), declared),
        };

        Target {
            name: name.to_string(),
            subname,
            parent,
            fields,
            command: None,
        }
    }

    /// Name of the node among its siblings.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fully-qualified name, unique within a resolution run.
    pub fn subname(&self) -> &str {
        &self.subname
    }

    pub fn parent(&self) -> Option<&Target> {
        self.parent.as_deref()
    }

    /// Merged collections of this node.
    pub fn fields(&self) -> &TargetFields {
        &self.fields
    }

    pub fn options(&self) -> &OptionSet {
        &self.fields.options
    }

    pub fn variables(&self) -> &VarMap {
        &self.fields.variables
    }

    pub fn metadata(&self) -> &VarMap {
        &self.fields.metadata
    }

    pub fn filters(&self) -> &[String] {
        &self.fields.filters
    }

    pub fn input_files(&self) -> &[String] {
        &self.fields.input_files
    }

    pub fn preamble(&self) -> &[String] {
        &self.fields.preamble
    }

    pub fn output_basename(&self) -> Option<&OutputBasename> {
        self.fields.output_basename.as_ref()
    }

    /// Resolved output file, once the command has been synthesized.
    pub fn outfile(&self) -> Option<&str> {
        self.command.as_ref().map(|c| c.outfile.as_str())
    }

    /// Converter argument vector, once the command has been synthesized.
    pub fn command(&self) -> Option<&[String]> {
        self.command.as_ref().map(|c| c.args.as_slice())
    }

    /// Attaches the synthesized command. Only the first call has an effect.
    pub(crate) fn attach_command(&mut self, command: ConverterCommand) {
        if self.command.is_none() {
            self.command = Some(command);
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.subname)
    }
}
