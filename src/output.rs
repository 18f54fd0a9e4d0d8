//! # Output Configuration
//!
//! Controls how the CLI prints target listings: whether status markers are
//! emoji or plain tags, and whether target names are coloured.
//!
//! The following flags and environment variables are respected:
//! - `--color=never|always|auto`
//! - `NO_COLOR` disables colours when set (per https://no-color.org/)
//! - `CLICOLOR=0` disables colours
//! - `CLICOLOR_FORCE=1` forces colours even when stdout is not a TTY
//! - `TERM=dumb` disables colours

use std::env;

use console::style;

/// Output configuration for controlling colours and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colours and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from the environment and the value of
    /// the `--color` flag (`always`, `never` or `auto`).
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }
        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Renders a target name, bold when colours are enabled.
    pub fn target_name(&self, name: &str) -> String {
        if self.use_color {
            style(name).bold().force_styling(true).to_string()
        } else {
            name.to_string()
        }
    }

    /// Renders an output file name, dimmed when colours are enabled.
    pub fn file_name(&self, name: &str) -> String {
        if self.use_color {
            style(name).dim().force_styling(true).to_string()
        } else {
            name.to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns `emoji_str` when colours are enabled and `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}
