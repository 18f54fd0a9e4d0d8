//! # List Command Implementation
//!
//! Lists the buildable targets of a build file. By default only the target
//! names are printed; `--outputs` adds the output file of each target and
//! `--commands` the full converter command line.
//!
//! Target names given on the command line restrict the listing. Unknown names
//! are reported one by one on stderr without hiding the known ones, and make
//! the command fail once everything else has been printed.

use anyhow::Result;
use clap::Args;

use panbuild::output::OutputConfig;

use crate::cli::GlobalArgs;
use crate::commands::load_plan;

/// List the targets defined in the build file
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Print the output file produced by each target.
    #[arg(short = 'o', long, conflicts_with = "commands")]
    pub outputs: bool,

    /// Print the full converter command of each target.
    #[arg(short = 'c', long)]
    pub commands: bool,

    /// Targets to list (all targets if omitted).
    #[arg(value_name = "TARGETS")]
    pub targets: Vec<String>,
}

/// Execute the `list` command.
pub fn execute(args: ListArgs, global: &GlobalArgs) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(&global.color);
    let plan = load_plan(global)?;
    let (selected, missing) = plan.select(&args.targets);

    for target in &selected {
        let name = out.target_name(target.subname());
        if args.commands {
            let command = target.command().unwrap_or_default().join(" ");
            println!("{}: {}", name, command);
        } else if args.outputs {
            println!("{}: {}", name, out.file_name(target.outfile().unwrap_or_default()));
        } else {
            println!("{}", name);
        }
    }

    for error in &missing {
        eprintln!("{}", error);
    }
    if !missing.is_empty() {
        anyhow::bail!("{} requested target(s) not found", missing.len());
    }

    Ok(())
}
