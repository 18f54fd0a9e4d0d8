//! # panbuild
//!
//! A build tool for Pandoc documents. A YAML build file declares a tree of
//! targets; this library resolves it into a flat list of buildable targets,
//! each with a ready-to-run converter command line.
//!
//! ## Quick Example
//!
//! ```
//! use panbuild::{config, BuildPlan};
//!
//! let build_file = config::parse(r#"
//! pandoc_common:
//!   input_files: [talk.md]
//!   output_basename: talk
//! pandoc_targets:
//!   slides:
//!     options: {t: beamer, s: ~}
//!   notes:
//!     options: {t: latex}
//! "#).unwrap();
//!
//! let plan = BuildPlan::build(&build_file).unwrap();
//! let slides = plan.get("slides").unwrap();
//! assert_eq!(slides.outfile(), Some("talk.pdf"));
//! assert_eq!(
//!     slides.command().unwrap().join(" "),
//!     "pandoc -t beamer -s -o talk.pdf talk.md"
//! );
//! assert_eq!(plan.get("notes").unwrap().outfile(), Some("talk.tex"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Build file (`config`)**: the loaded YAML document and the per-run
//!   [`Settings`](config::Settings).
//! - **Option merger (`merge`)**: how a child's options, variables, metadata,
//!   filters and file lists combine with its parent's.
//! - **Targets (`target`)**: resolved nodes of the target tree.
//! - **Resolver (`resolver`)**: the depth-first walk producing leaf targets,
//!   including dual-language expansion.
//! - **Command synthesis (`command`)**: the ordered converter argument vector
//!   and output file name of one target.
//! - **Plan (`plan`)**: resolution plus synthesis for a whole build file.
//! - **Samples (`sample`)**: a starter build file from a converter command
//!   line.

pub mod command;
pub mod config;
pub mod error;
pub mod merge;
pub mod options;
pub mod output;
pub mod plan;
pub mod resolver;
pub mod sample;
pub mod suggestions;
pub mod target;

pub use error::{Error, Result};
pub use plan::BuildPlan;
pub use target::Target;

#[cfg(test)]
mod merge_proptest;
