//! Output formatter for human-readable and JSON output
//!
//! Keeps formatting consistent across commands: JSON mode is strict
//! (no colors, no decorations), quiet mode suppresses everything but
//! errors.

use console::Style;
use serde::Serialize;

use super::OutputConfig;

/// Color theme for styled output
#[derive(Debug, Clone)]
pub struct Theme {
    /// Bucket/alias names - bold
    pub name: Style,
    /// URLs/endpoints - cyan + underline
    pub url: Style,
    /// Sizes - green
    pub size: Style,
    /// Timestamps and secondary detail - dim
    pub date: Style,
    /// Delete markers - red
    pub marker: Style,
    /// Success messages - green
    pub success: Style,
    /// Error messages - red
    pub error: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: Style::new().bold(),
            url: Style::new().cyan().underlined(),
            size: Style::new().green(),
            date: Style::new().dim(),
            marker: Style::new().red(),
            success: Style::new().green(),
            error: Style::new().red(),
        }
    }
}

impl Theme {
    /// Theme with no styling, for no-color and JSON modes
    pub fn plain() -> Self {
        Self {
            name: Style::new(),
            url: Style::new(),
            size: Style::new(),
            date: Style::new(),
            marker: Style::new(),
            success: Style::new(),
            error: Style::new(),
        }
    }
}

/// Formatter for CLI output
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
    theme: Theme,
}

impl Formatter {
    pub fn new(config: OutputConfig) -> Self {
        let theme = if config.no_color || config.json {
            Theme::plain()
        } else {
            Theme::default()
        };
        Self { config, theme }
    }

    pub fn is_json(&self) -> bool {
        self.config.json
    }

    pub fn style_name(&self, text: &str) -> String {
        self.theme.name.apply_to(text).to_string()
    }

    pub fn style_url(&self, text: &str) -> String {
        self.theme.url.apply_to(text).to_string()
    }

    pub fn style_size(&self, text: &str) -> String {
        self.theme.size.apply_to(text).to_string()
    }

    pub fn style_date(&self, text: &str) -> String {
        self.theme.date.apply_to(text).to_string()
    }

    pub fn style_marker(&self, text: &str) -> String {
        self.theme.marker.apply_to(text).to_string()
    }

    /// Print a line of text (suppressed in quiet mode)
    pub fn println(&self, message: &str) {
        if self.config.quiet {
            return;
        }
        println!("{message}");
    }

    /// Print a success message (suppressed in quiet and JSON modes,
    /// where success is carried by the exit code)
    pub fn success(&self, message: &str) {
        if self.config.quiet || self.config.json {
            return;
        }
        let checkmark = self.theme.success.apply_to("✓");
        println!("{checkmark} {message}");
    }

    /// Print an error message; errors are never suppressed
    pub fn error(&self, message: &str) {
        if self.config.json {
            let error = serde_json::json!({ "error": message });
            eprintln!(
                "{}",
                serde_json::to_string_pretty(&error).unwrap_or_else(|_| message.to_string())
            );
        } else {
            let cross = self.theme.error.apply_to("✗");
            eprintln!("{cross} {message}");
        }
    }

    /// Print a pre-built JSON structure
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}
