//! CLI configuration.
//!
//! Loaded from a TOML file (`s2f.toml` by default) with `S2F_*`
//! environment overrides. Every section is optional:
//!
//! ```toml
//! log_level = "info"
//!
//! [model]
//! granularity = "W"
//! halving_dates = ["2012-11-28", "2016-07-09", "2020-05-18", "2024-05-18"]
//! horizon_end = "2026-01-31"
//!
//! [model.reference_window]
//! start = "2017-10-08"
//! end = "2019-10-08"
//!
//! [input]
//! issuance_path = "data/blockchair.csv"
//! price_path = "data/coinmetrics.csv"
//!
//! [output]
//! format = "csv"
//! ```

use std::path::{Path, PathBuf};

use adapter_loader::csv_source::{
    ColumnSpec, DEFAULT_GENERATION_COLUMN, DEFAULT_PRICE_COLUMN, DEFAULT_TIME_COLUMN,
};
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, Result};
use crate::output::OutputFormat;
use s2f_model::ModelConfig;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Input file locations and header names
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputConfig {
    /// Issuance CSV
    pub issuance_path: Option<PathBuf>,
    /// Price CSV
    pub price_path: Option<PathBuf>,
    /// Timestamp header in both files
    #[serde(default = "default_time_column")]
    pub time_column: String,
    /// Issuance header
    #[serde(default = "default_generation_column")]
    pub generation_column: String,
    /// Price header
    #[serde(default = "default_price_column")]
    pub price_column: String,
}

fn default_time_column() -> String {
    DEFAULT_TIME_COLUMN.to_string()
}

fn default_generation_column() -> String {
    DEFAULT_GENERATION_COLUMN.to_string()
}

fn default_price_column() -> String {
    DEFAULT_PRICE_COLUMN.to_string()
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            issuance_path: None,
            price_path: None,
            time_column: default_time_column(),
            generation_column: default_generation_column(),
            price_column: default_price_column(),
        }
    }
}

impl InputConfig {
    /// Issuance column pair
    pub fn issuance_columns(&self) -> ColumnSpec {
        ColumnSpec::new(&self.time_column, &self.generation_column)
    }

    /// Price column pair
    pub fn price_columns(&self) -> ColumnSpec {
        ColumnSpec::new(&self.time_column, &self.price_column)
    }
}

/// Export destination
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Output file; stdout when unset
    pub path: Option<PathBuf>,
    /// Export format
    #[serde(default)]
    pub format: OutputFormat,
}

/// `s2f` configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Model parameters
    #[serde(default)]
    pub model: ModelConfig,

    /// Input files
    #[serde(default)]
    pub input: InputConfig,

    /// Export settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content).map_err(|message| CliError::Parse {
            path: path.display().to_string(),
            message,
        })
    }

    /// Parse configuration text
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load the file if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply `S2F_*` environment overrides
    pub fn with_env_override(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(granularity) = lookup("S2F_GRANULARITY") {
            self.model.granularity = granularity
                .parse()
                .map_err(|e| CliError::InvalidArgument(format!("S2F_GRANULARITY: {}", e)))?;
        }

        if let Some(path) = lookup("S2F_ISSUANCE_PATH") {
            self.input.issuance_path = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup("S2F_PRICE_PATH") {
            self.input.price_path = Some(PathBuf::from(path));
        }

        if let Some(log_level) = lookup("S2F_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Some(format) = lookup("S2F_OUTPUT_FORMAT") {
            self.output.format = format
                .parse()
                .map_err(|e| CliError::InvalidArgument(format!("S2F_OUTPUT_FORMAT: {}", e)))?;
        }

        Ok(self)
    }

    /// Every configuration problem
    pub fn problems(&self) -> Vec<String> {
        let mut errors: Vec<String> = self.model.problems().iter().map(|e| e.to_string()).collect();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        let columns = [
            ("time_column", &self.input.time_column),
            ("generation_column", &self.input.generation_column),
            ("price_column", &self.input.price_column),
        ];
        for (name, value) in columns {
            if value.trim().is_empty() {
                errors.push(format!("{} cannot be empty", name));
            }
        }

        errors
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let errors = self.problems();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(CliError::Validation(errors))
        }
    }
}
