//! # Sample Command Implementation
//!
//! Prints a starter build file for a converter command line, so an existing
//! Pandoc invocation can be turned into build rules:
//!
//! ```bash
//! panbuild sample "talk.md -t beamer -s -F pandoc-citeproc" > build.yaml
//! ```
//!
//! The global `-D/--dual-mode` flag marks the generated file as dual-language.

use anyhow::Result;
use clap::Args;

use panbuild::sample::{sample_build_file, SampleOptions};

use crate::cli::GlobalArgs;

/// Print a sample build file for a converter command line
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Converter arguments: '[INPUT_FILES...] OPTIONS...'
    #[arg(value_name = "PANDOC_OPTIONS", allow_hyphen_values = true)]
    pub pandoc_options: String,

    /// Write the options as a YAML mapping instead of a command-line string.
    #[arg(short = 'y', long)]
    pub yaml_options: bool,

    /// Name of the generated target (defaults to the upper-cased format).
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,
}

/// Execute the `sample` command.
pub fn execute(args: SampleArgs, global: &GlobalArgs) -> Result<()> {
    let options = SampleOptions {
        yaml_options: args.yaml_options,
        target_name: args.name,
        dual: global.dual_mode,
    };
    let yaml = sample_build_file(&args.pandoc_options, &options)?;
    print!("{}", yaml);
    Ok(())
}
