//! Shared test utilities for integration and E2E tests.
//!
//! Add `mod common;` to a test file, then `use common::prelude::*;`.

#![allow(dead_code)]

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    pub use assert_cmd::Command;
    pub use assert_fs::prelude::*;
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::build_files;
    pub use super::panbuild_cmd;
    #[allow(unused_imports)]
    pub use super::with_build_file;
}

/// Build file snippets for testing.
#[allow(dead_code)]
pub mod build_files {
    /// A single target with one input file.
    pub const MINIMAL: &str = r#"
pandoc_targets:
  doc:
    input_files: doc.md
"#;

    /// A talk with slides and a handout sharing common settings.
    pub const TALK: &str = r#"
pandoc_common:
  input_files: [talk.md]
  output_basename: talk
  filters: [pandoc-citeproc]
pandoc_targets:
  slides:
    options: {t: beamer, s: ~}
  handout:
    options: {t: latex}
    variables: {geometry: a4paper}
"#;

    /// The talk in dual-language mode with per-language file names.
    pub const DUAL_TALK: &str = r#"
dual: true
lang1: ES
lang2: EN
dual_filters_dir: filters
pandoc_common:
  input_files: [talk.md]
  output_basename: {ES: charla, EN: talk}
pandoc_targets:
  slides:
    options: {t: beamer, s: ~}
"#;

    /// Two output files for one target.
    pub const AMBIGUOUS_OUTPUT: &str = r#"
pandoc_targets:
  doc:
    options: {output: [a.pdf, b.pdf]}
    input_files: doc.md
"#;

    /// A misshapen field deep in the tree.
    pub const BAD_FIELD: &str = r#"
pandoc_targets:
  doc:
    input_files: doc.md
    print:
      variables: [not, a, mapping]
"#;

    /// Invalid YAML for error testing.
    pub const INVALID_YAML: &str = "pandoc_targets: [unclosed";
}

/// Get a Command for the panbuild binary, isolated from the caller's
/// panbuild environment and with colours off.
pub fn panbuild_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::cargo_bin("panbuild").unwrap();
    cmd.env_remove("PANBUILD_FILE")
        .env_remove("PANBUILD_PANDOC")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Creates a temporary directory holding `build.yaml` with `content`.
pub fn with_build_file(content: &str) -> assert_fs::TempDir {
    use assert_fs::prelude::*;

    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("build.yaml").write_str(content).unwrap();
    temp
}
