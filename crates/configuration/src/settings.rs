use crate::error::ConfigError;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub import: ImportSettings,
    pub logging: LoggingSettings,
    pub display: DisplaySettings,
}

impl Config {
    /// Checks values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let offset = self.import.closing_time_offset_hours;
        if !(-23..=23).contains(&offset) {
            return Err(ConfigError::ValidationError(format!(
                "import.closing_time_offset_hours must be within -23..=23, got {offset}"
            )));
        }
        if self.display.recent_trades == 0 {
            return Err(ConfigError::ValidationError(
                "display.recent_trades must be at least 1".to_string(),
            ));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Contains parameters for reading broker statements.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    /// Wall-clock offset (hours east of UTC) of the statement's closing times.
    /// The supported export labels its column `Closing Time (UTC+8)`.
    pub closing_time_offset_hours: i32,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            closing_time_offset_hours: 8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Contains parameters for how results are presented.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub output: OutputFormat,
    /// How many of the latest trades to include in summaries and assistant context.
    pub recent_trades: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            output: OutputFormat::Table,
            recent_trades: 5,
        }
    }
}
