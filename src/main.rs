//! # panbuild CLI
//!
//! Binary entry point for the `panbuild` command-line tool. It parses
//! arguments with `clap`, sets up logging and dispatches to a subcommand.
//!
//! The resolution and command synthesis logic lives in the library crate;
//! the binary only loads the build file and prints what it resolved to.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
