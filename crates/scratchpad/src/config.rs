//! Scratchpad configuration.

use common::{Color, ScratchpadError, ScratchpadResult, Severity};
use js_engine::ExecutionOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use ui::output::{is_valid_timestamp_format, DEFAULT_TIMESTAMP_FORMAT};
use ui::{ThemeName, UiTheme};

/// Source shown in the editor on start.
pub const DEFAULT_SOURCE: &str =
    "// Your JavaScript code goes here...\nconsole.log(\"Hello, World!\");";

/// Scratchpad configuration.
///
/// Every field has a default, so a configuration file only needs the keys
/// it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScratchpadConfig {
    /// Editor contents on start.
    pub initial_source: String,
    /// chrono strftime pattern for entry timestamps.
    pub timestamp_format: String,
    /// Color theme.
    pub theme: ThemeName,
    /// Console colors replacing the theme's, keyed by severity.
    pub severity_colors: BTreeMap<Severity, Color>,
    /// Maximum iterations of a single loop.
    pub loop_iteration_limit: Option<u64>,
    /// Maximum call depth.
    pub recursion_limit: Option<usize>,
}

impl ScratchpadConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON configuration file.
    pub fn from_file(path: &Path) -> ScratchpadResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot.
    pub fn validate(&self) -> ScratchpadResult<()> {
        if !is_valid_timestamp_format(&self.timestamp_format) {
            return Err(ScratchpadError::config(format!(
                "invalid timestamp format: {}",
                self.timestamp_format
            )));
        }
        if self.loop_iteration_limit == Some(0) {
            return Err(ScratchpadError::config("loop_iteration_limit must be positive"));
        }
        if self.recursion_limit == Some(0) {
            return Err(ScratchpadError::config("recursion_limit must be positive"));
        }
        Ok(())
    }

    /// Set initial source.
    pub fn with_source(mut self, source: &str) -> Self {
        self.initial_source = source.to_string();
        self
    }

    /// Set theme.
    pub fn with_theme(mut self, theme: ThemeName) -> Self {
        self.theme = theme;
        self
    }

    /// Set timestamp format.
    pub fn with_timestamp_format(mut self, format: &str) -> Self {
        self.timestamp_format = format.to_string();
        self
    }

    /// Override the console color of one severity.
    pub fn with_severity_color(mut self, severity: Severity, color: Color) -> Self {
        self.severity_colors.insert(severity, color);
        self
    }

    /// Theme with the severity overrides applied.
    pub fn ui_theme(&self) -> UiTheme {
        let mut theme = UiTheme::from_name(self.theme);
        for (severity, color) in &self.severity_colors {
            theme.set_severity_color(*severity, *color);
        }
        theme
    }

    /// Set loop iteration limit.
    pub fn with_loop_iteration_limit(mut self, limit: u64) -> Self {
        self.loop_iteration_limit = Some(limit);
        self
    }

    /// Set recursion limit.
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    /// Engine options derived from the limits.
    pub fn execution_options(&self) -> ExecutionOptions {
        let mut options = ExecutionOptions::new();
        if let Some(limit) = self.loop_iteration_limit {
            options = options.with_loop_iteration_limit(limit);
        }
        if let Some(limit) = self.recursion_limit {
            options = options.with_recursion_limit(limit);
        }
        options
    }
}

impl Default for ScratchpadConfig {
    fn default() -> Self {
        Self {
            initial_source: DEFAULT_SOURCE.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            theme: ThemeName::Dark,
            severity_colors: BTreeMap::new(),
            loop_iteration_limit: None,
            recursion_limit: None,
        }
    }
}
