//! # Build Plan
//!
//! Runs the whole pipeline over a loaded build file: resolve the target tree,
//! then synthesize a converter command for every leaf. The result is a
//! [`BuildPlan`], the ordered list of buildable targets handed to whatever
//! executes the converter.
//!
//! Building a plan is all-or-nothing. Looking targets up in a plan is not: an
//! unknown name is reported on its own and the other names still resolve.

use log::info;

use crate::command;
use crate::config::{BuildFile, Settings};
use crate::error::{Error, Result};
use crate::resolver;
use crate::suggestions;
use crate::target::Target;

/// Resolved targets with their converter commands, in declaration order.
#[derive(Debug, Clone)]
pub struct BuildPlan {
    targets: Vec<Target>,
}

impl BuildPlan {
    /// Builds the plan using the build file's own settings.
    pub fn build(file: &BuildFile) -> Result<Self> {
        Self::build_with(file, &file.settings)
    }

    /// Builds the plan with explicit settings.
    pub fn build_with(file: &BuildFile, settings: &Settings) -> Result<Self> {
        let mut targets = resolver::resolve_with(file, settings)?;
        for target in &mut targets {
            command::build_command(target, settings)?;
        }
        info!("Planned {} target(s)", targets.len());
        Ok(BuildPlan { targets })
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Finds a target by its fully-qualified name.
    pub fn get(&self, subname: &str) -> Option<&Target> {
        self.targets.iter().find(|t| t.subname() == subname)
    }

    /// Selects targets by fully-qualified name.
    ///
    /// An empty request selects every target. Found targets come back in
    /// request order; each unknown name yields its own
    /// [`Error::TargetNotFound`], with a hint when a similar name exists.
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> (Vec<&Target>, Vec<Error>) {
        if names.is_empty() {
            return (self.targets.iter().collect(), Vec::new());
        }

        let mut found = Vec::new();
        let mut missing = Vec::new();
        for name in names {
            let name = name.as_ref();
            match self.get(name) {
                Some(target) => found.push(target),
                None => missing.push(Error::TargetNotFound {
                    name: name.to_string(),
                    hint: suggestions::closest_name(
                        name,
                        self.targets.iter().map(Target::subname),
                    ),
                }),
            }
        }
        (found, missing)
    }

    /// Output files of every target, in plan order.
    pub fn outfiles(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().filter_map(Target::outfile)
    }
}
