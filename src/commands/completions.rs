//! # Completions Command Implementation
//!
//! Generates shell completion scripts for `panbuild` with `clap_complete`.
//!
//! ```bash
//! panbuild completions bash > ~/.local/share/bash-completion/completions/panbuild
//! panbuild completions zsh > ~/.zfunc/_panbuild
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Generate shell completion scripts
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the `completions` command, writing the script to stdout.
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "panbuild", &mut io::stdout());
    Ok(())
}
