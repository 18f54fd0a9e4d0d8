//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use panbuild::config::DEFAULT_BUILD_FILE;

use crate::commands;

/// Panbuild - a YAML-based builder for Pandoc
#[derive(Parser, Debug)]
#[command(name = "panbuild")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalArgs,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// File containing the build rules.
    #[arg(
        short = 'f',
        long,
        global = true,
        value_name = "FILE",
        env = "PANBUILD_FILE",
        default_value = DEFAULT_BUILD_FILE
    )]
    pub build_file: PathBuf,

    /// Pandoc executable to use instead of `pandoc` from the PATH.
    #[arg(short = 'e', long, global = true, value_name = "EXE", env = "PANBUILD_PANDOC")]
    pub pandoc_exe: Option<String>,

    /// Resolve in dual-language mode even if the build file does not enable
    /// it; with `sample`, mark the generated build file as dual.
    #[arg(short = 'D', long, global = true)]
    pub dual_mode: bool,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the targets defined in the build file
    List(commands::list::ListArgs),

    /// Check that every target in the build file resolves to a command
    Validate(commands::validate::ValidateArgs),

    /// Print a sample build file for a converter command line
    Sample(commands::sample::SampleArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.global.log_level);

        match self.command {
            Commands::List(args) => commands::list::execute(args, &self.global),
            Commands::Validate(args) => commands::validate::execute(args, &self.global),
            Commands::Sample(args) => commands::sample::execute(args, &self.global),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Routes `log` records to stderr. `RUST_LOG` takes precedence over the flag.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
