//! Output formatting utilities
//!
//! This module provides formatters for CLI output in both human-readable
//! and JSON formats. It also handles progress bars and colored output.

mod formatter;
mod progress;

pub use formatter::Formatter;
pub use progress::ProgressBar;

/// When to emit ANSI styling
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Style only when the stream is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Parse the `[defaults] color` setting; unknown values mean `Auto`
    pub fn from_setting(value: &str) -> Self {
        match value {
            "always" => ColorMode::Always,
            "never" => ColorMode::Never,
            _ => ColorMode::Auto,
        }
    }
}

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Use JSON output format
    pub json: bool,
    /// Color mode; `--no-color` sets `Never`
    pub color: ColorMode,
    /// Disable progress bar
    pub no_progress: bool,
    /// Suppress non-error output
    pub quiet: bool,
}

impl OutputConfig {
    /// Apply `[defaults]` from the config file beneath the command-line flags
    pub fn with_defaults(mut self, defaults: &ap_core::config::Defaults) -> Self {
        self.json |= defaults.output == "json";
        if self.color == ColorMode::Auto {
            self.color = ColorMode::from_setting(&defaults.color);
        }
        self.no_progress |= !defaults.progress;
        self
    }
}
