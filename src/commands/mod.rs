//! # CLI Command Implementations
//!
//! Each subcommand of `panbuild` lives in its own file with an `Args` struct
//! derived using `clap` and an `execute` function.
//!
//! Subcommands that need the resolved targets go through [`load_plan`], which
//! reads the build file, applies the global overrides to its settings and
//! builds the plan. `sample` works without a build file.

pub mod completions;
pub mod list;
pub mod sample;
pub mod validate;

use anyhow::Result;

use panbuild::config;
use panbuild::BuildPlan;

use crate::cli::GlobalArgs;

/// Loads the build file named by the global arguments and builds its plan.
pub fn load_plan(global: &GlobalArgs) -> Result<BuildPlan> {
    let path = &global.build_file;
    if !path.exists() {
        return Err(panbuild::suggestions::build_file_not_found(path));
    }

    let mut build_file = config::from_file(path)
        .map_err(|e| anyhow::anyhow!("Failed to load build file {}: {}", path.display(), e))?;

    if global.dual_mode {
        build_file.settings.dual = true;
    }
    if let Some(exe) = &global.pandoc_exe {
        build_file.settings.converter = exe.clone();
    }

    BuildPlan::build(&build_file)
        .map_err(|e| anyhow::anyhow!("Failed to resolve {}: {}", path.display(), e))
}
