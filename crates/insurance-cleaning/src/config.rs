//! Configuration types for the cleaning pipeline.
//!
//! The cleaning rules themselves are fixed. Configuration covers where the
//! raw table comes from, where the cleaned table goes, and how the CSV reader
//! infers column types.

use crate::io::{DataSource, LoadOptions};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Public copy of the raw insurance customer dataset.
pub const DEFAULT_SOURCE: &str =
    "https://raw.githubusercontent.com/data-bootcamp-v4/data/main/file1.csv";

/// File name the cleaned table is written to when none is given.
pub const DEFAULT_DESTINATION: &str = "cleaned_data.csv";

/// Rows sampled by the CSV reader when inferring column types.
pub const DEFAULT_INFER_SCHEMA_LENGTH: usize = 100;

/// Configuration for a pipeline run.
///
/// Use [`CleaningConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use insurance_cleaning::CleaningConfig;
///
/// let config = CleaningConfig::builder()
///     .source("data/file1.csv")
///     .destination("out/cleaned_data.csv")
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Local path or http(s) URL of the raw CSV.
    /// Default: the public bootcamp `file1.csv`
    pub source: String,

    /// Path the cleaned CSV is written to.
    /// Default: "cleaned_data.csv"
    pub destination: PathBuf,

    /// Rows used for CSV type inference. `None` scans the whole file.
    /// Default: Some(100)
    pub infer_schema_length: Option<usize>,

    /// Whether to write the cleaned table to `destination`.
    /// When false, results are kept in memory only.
    /// Default: true
    pub save_to_disk: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            destination: PathBuf::from(DEFAULT_DESTINATION),
            infer_schema_length: Some(DEFAULT_INFER_SCHEMA_LENGTH),
            save_to_disk: true,
        }
    }
}

impl CleaningConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleaningConfigBuilder {
        CleaningConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.source.trim().is_empty() {
            return Err(ConfigValidationError::EmptySource);
        }

        if self.save_to_disk && self.destination.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyDestination);
        }

        if self.infer_schema_length == Some(0) {
            return Err(ConfigValidationError::InvalidInferSchemaLength);
        }

        Ok(())
    }

    /// Where to read the raw table from.
    pub fn data_source(&self) -> DataSource {
        DataSource::from(self.source.as_str())
    }

    /// Reader options derived from this configuration.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            infer_schema_length: self.infer_schema_length,
            ..LoadOptions::default()
        }
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Source must not be empty")]
    EmptySource,

    #[error("Destination must not be empty when saving to disk")]
    EmptyDestination,

    #[error("Invalid infer_schema_length: 0 (use None to scan every row)")]
    InvalidInferSchemaLength,
}

/// Builder for [`CleaningConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleaningConfigBuilder {
    source: Option<String>,
    destination: Option<PathBuf>,
    infer_schema_length: Option<Option<usize>>,
    save_to_disk: Option<bool>,
}

impl CleaningConfigBuilder {
    /// Set the raw data source (path or http(s) URL).
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the path the cleaned CSV is written to.
    pub fn destination(mut self, path: impl Into<PathBuf>) -> Self {
        self.destination = Some(path.into());
        self
    }

    /// Set how many rows the CSV reader samples for type inference.
    ///
    /// `None` scans every row.
    pub fn infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }

    /// Enable or disable writing the cleaned table.
    pub fn save_to_disk(mut self, save: bool) -> Self {
        self.save_to_disk = Some(save);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `CleaningConfig` or an error if validation fails.
    pub fn build(self) -> Result<CleaningConfig, ConfigValidationError> {
        let config = CleaningConfig {
            source: self.source.unwrap_or_else(|| DEFAULT_SOURCE.to_string()),
            destination: self
                .destination
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DESTINATION)),
            infer_schema_length: self
                .infer_schema_length
                .unwrap_or(Some(DEFAULT_INFER_SCHEMA_LENGTH)),
            save_to_disk: self.save_to_disk.unwrap_or(true),
        };

        config.validate()?;
        Ok(config)
    }
}
