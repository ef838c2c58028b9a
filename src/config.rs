//! Configuration management for the lineage tool

use crate::lineage::TraversalOrder;
use crate::reports::SUPPORTED_FORMATS;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Tool settings. Precedence is defaults, then the YAML file, then `LINEAGE_*`
/// environment variables; command-line flags are applied last by the binary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub traversal: TraversalSettings,
    pub output: OutputSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalSettings {
    pub default_order: TraversalOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub format: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for TraversalSettings {
    fn default() -> Self {
        Self {
            default_order: TraversalOrder::BreadthFirst,
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file. Missing keys keep their defaults.
    pub async fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub async fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    /// Override settings with any `LINEAGE_*` environment variables that are set
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Override settings from a `LINEAGE_*` key lookup. Every key that
    /// resolves wins over the current value, even when it equals the default.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(order) = lookup("LINEAGE_ORDER") {
            self.traversal.default_order = order.parse()?;
        }

        if let Some(format) = lookup("LINEAGE_OUTPUT_FORMAT") {
            self.output.format = format;
        }

        if let Some(level) = lookup("LINEAGE_LOG_LEVEL") {
            self.logging.level = level;
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let format = self.output.format.to_lowercase();
        if !SUPPORTED_FORMATS.contains(&format.as_str()) {
            return Err(anyhow::anyhow!(
                "Output format must be one of {:?}, got '{}'",
                SUPPORTED_FORMATS,
                self.output.format
            ));
        }

        let level = self.logging.level.to_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(anyhow::anyhow!(
                "Log level must be one of {:?}, got '{}'",
                LOG_LEVELS,
                self.logging.level
            ));
        }

        Ok(())
    }
}
