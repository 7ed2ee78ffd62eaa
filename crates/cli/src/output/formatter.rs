//! Output formatter for human-readable and JSON output
//!
//! Ensures consistent output formatting across all commands. In JSON mode
//! stdout carries exactly one JSON document per invocation.

use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use console::{Style, StyledObject};
use serde::Serialize;

use super::{ColorMode, OutputConfig};

/// Formatter for CLI output
///
/// Handles both human-readable and JSON output formats based on configuration.
/// When JSON mode is enabled, all output is strict JSON without colors or progress.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Check if JSON output mode is enabled
    pub fn is_json(&self) -> bool {
        self.config.json
    }

    /// Check if colors may be used; in `Auto` mode only on a terminal
    pub fn colors_enabled(&self) -> bool {
        self.config.color != ColorMode::Never && !self.config.json
    }

    /// The output configuration this formatter was built from
    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Output a success message
    pub fn success(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }
        println!("{} {message}", self.paint(&Style::new().green(), "✓"));
    }

    /// Output an error message
    ///
    /// Errors are always printed, even in quiet mode.
    pub fn error(&self, message: &str) {
        if self.config.json {
            let error = serde_json::json!({ "error": message });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&error).unwrap_or_else(|_| message.to_string())
            );
        } else {
            eprintln!("{} {message}", self.paint_stderr(&Style::new().red(), "✗"));
        }
    }

    /// Output a warning message
    pub fn warning(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }
        eprintln!("{} {message}", self.paint_stderr(&Style::new().yellow(), "⚠"));
    }

    /// Output JSON directly
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }

    /// Print a line of text (respects quiet mode)
    pub fn println(&self, message: &str) {
        if self.config.quiet {
            return;
        }
        println!("{message}");
    }

    /// Print a table (respects quiet mode)
    pub fn table(&self, table: &Table) {
        if self.config.quiet {
            return;
        }
        println!("{table}");
    }

    /// A table with the CLI's preset, sized to the terminal
    pub fn new_table<I, S>(&self, header: I) -> Table
    where
        I: IntoIterator<Item = S>,
        S: Into<comfy_table::Cell>,
    {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(header);
        if !self.colors_enabled() {
            table.force_no_tty();
        }
        table
    }

    /// Style a resource or control name
    pub fn style_name(&self, text: &str) -> String {
        self.paint(&Style::new().bold(), text)
    }

    /// Style a passing outcome
    pub fn style_pass(&self, text: &str) -> String {
        self.paint(&Style::new().green(), text)
    }

    /// Style a failing outcome
    pub fn style_fail(&self, text: &str) -> String {
        self.paint(&Style::new().red(), text)
    }

    /// Style secondary detail
    pub fn style_dim(&self, text: &str) -> String {
        self.paint(&Style::new().dim(), text)
    }

    fn paint(&self, style: &Style, text: &str) -> String {
        self.render(style.apply_to(text))
    }

    fn paint_stderr(&self, style: &Style, text: &str) -> String {
        self.render(style.apply_to(text).for_stderr())
    }

    fn render(&self, styled: StyledObject<&str>) -> String {
        if !self.colors_enabled() {
            return styled.force_styling(false).to_string();
        }
        match self.config.color {
            ColorMode::Always => styled.force_styling(true).to_string(),
            // console decides from the stream and CLICOLOR/NO_COLOR
            _ => styled.to_string(),
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatter_default() {
        let formatter = Formatter::default();
        assert!(!formatter.is_json());
        assert_eq!(formatter.config().color, ColorMode::Auto);
        assert!(formatter.colors_enabled());
    }

    #[test]
    fn test_formatter_json_mode() {
        let config = OutputConfig {
            json: true,
            ..Default::default()
        };
        let formatter = Formatter::new(config);
        assert!(formatter.is_json());
        assert!(!formatter.colors_enabled()); // Colors disabled in JSON mode
    }

    #[test]
    fn test_formatter_no_color() {
        let config = OutputConfig {
            color: ColorMode::Never,
            ..Default::default()
        };
        let formatter = Formatter::new(config);
        assert!(!formatter.colors_enabled());
        assert_eq!(formatter.style_fail("failed"), "failed");
    }

    #[test]
    fn test_always_forces_styling() {
        let formatter = Formatter::new(OutputConfig {
            color: ColorMode::Always,
            ..Default::default()
        });
        let styled = formatter.style_pass("passed");
        assert!(styled.contains("passed"));
        assert!(styled.contains('\u{1b}'));
    }

    #[test]
    fn test_auto_follows_terminal_detection() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);

        let formatter = Formatter::default();
        assert_eq!(formatter.style_pass("passed"), "passed");
        assert_eq!(formatter.paint_stderr(&Style::new().red(), "✗"), "✗");
    }

    #[test]
    fn test_table_plain_rendering() {
        let formatter = Formatter::new(OutputConfig {
            color: ColorMode::Never,
            ..Default::default()
        });
        let mut table = formatter.new_table(["ATTRIBUTE", "VALUE"]);
        table.add_row(["status_code", "403"]);
        let rendered = table.to_string();
        assert!(rendered.contains("ATTRIBUTE"));
        assert!(rendered.contains("403"));
        assert!(!rendered.contains('\u{1b}'));
    }
}
