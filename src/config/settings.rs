//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::render::{Metrics, Variant};

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Grid and pin dimensions.
    #[serde(default)]
    pub metrics: Metrics,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.metrics.spacing <= 0 {
            return Err(ConfigError::ValidationError {
                message: format!("spacing must be positive, got {}", self.metrics.spacing),
            });
        }
        if self.metrics.pin_length <= 0 {
            return Err(ConfigError::ValidationError {
                message: format!("pin_length must be positive, got {}", self.metrics.pin_length),
            });
        }

        if self.output.variants.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "at least one output variant is required".to_string(),
            });
        }
        if let Some(unknown) = self
            .output
            .variants
            .iter()
            .find(|name| Variant::from_name(name).is_none())
        {
            let valid: Vec<&str> = Variant::ALL.iter().map(Variant::name).collect();
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid variant '{unknown}'. Must be one of: {}",
                    valid.join(", ")
                ),
            });
        }
        Ok(())
    }

    /// Configured variants, unknown names skipped.
    #[must_use]
    pub fn variants(&self) -> Vec<Variant> {
        self.output
            .variants
            .iter()
            .filter_map(|name| Variant::from_name(name))
            .collect()
    }
}

/// Output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Variants generated for every package, in order.
    #[serde(default = "default_variants")]
    pub variants: Vec<String>,

    /// Directory receiving the generated files; beside each source when unset.
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Indent the generated JSON.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            variants: default_variants(),
            directory: None,
            pretty: default_true(),
        }
    }
}

fn default_variants() -> Vec<String> {
    Variant::ALL.iter().map(|v| v.name().to_string()).collect()
}

const fn default_true() -> bool {
    true
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}
