//! # Validate Command Implementation
//!
//! Resolves a build file and synthesizes every converter command without
//! running anything, then prints a summary. Any structural or value error in
//! the build file makes the command fail with the target and field at fault.

use anyhow::Result;
use clap::Args;
use std::collections::HashMap;

use panbuild::output::{emoji, OutputConfig};

use crate::cli::GlobalArgs;
use crate::commands::load_plan;

/// Check that every target in the build file resolves to a command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Fail if two targets write the same output file.
    #[arg(long)]
    pub strict: bool,
}

/// Execute the `validate` command.
pub fn execute(args: ValidateArgs, global: &GlobalArgs) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(&global.color);
    println!(
        "{} Validating build file: {}",
        emoji(&out, "🔍", "[SCAN]"),
        global.build_file.display()
    );

    let plan = match load_plan(global) {
        Ok(plan) => plan,
        Err(e) => {
            println!("{} {}", emoji(&out, "❌", "[ERR]"), e);
            return Err(e);
        }
    };

    println!(
        "{} {} target(s) resolved",
        emoji(&out, "✅", "[OK]"),
        plan.len()
    );
    for target in plan.targets() {
        println!(
            "   {} -> {}",
            out.target_name(target.subname()),
            out.file_name(target.outfile().unwrap_or_default())
        );
    }

    let shared = shared_outputs(plan.outfiles());
    for (outfile, count) in &shared {
        println!(
            "{} {} is written by {} targets",
            emoji(&out, "⚠️ ", "[WARN]"),
            outfile,
            count
        );
    }
    if args.strict && !shared.is_empty() {
        anyhow::bail!("{} output file(s) are shared between targets", shared.len());
    }

    Ok(())
}

/// Output files produced by more than one target, in first-seen order.
fn shared_outputs<'a>(outfiles: impl Iterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut order = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for outfile in outfiles {
        let count = counts.entry(outfile).or_insert(0);
        if *count == 0 {
            order.push(outfile);
        }
        *count += 1;
    }
    order
        .into_iter()
        .filter_map(|f| counts.get(f).filter(|&&c| c > 1).map(|&c| (f, c)))
        .collect()
}
