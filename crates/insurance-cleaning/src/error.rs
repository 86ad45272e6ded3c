//! Custom error types for the cleaning pipeline.
//!
//! Every stage failure is wrapped in [`CleaningError::Stage`] so callers can
//! tell which stage and which column broke the run. Errors serialize as a
//! `{code, message}` pair for consumers that want machine-readable output.

use crate::config::ConfigValidationError;
use crate::pipeline::CleaningStage;
use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the cleaning pipeline.
#[derive(Error, Debug)]
pub enum CleaningError {
    /// A value expected to be numeric (or delimited numeric) could not be parsed.
    #[error("Failed to parse value '{value}' in column '{column}': {reason}")]
    Parse {
        column: String,
        value: String,
        reason: String,
    },

    /// A statistic required for imputation is undefined because the column
    /// has no present values.
    #[error("Column '{0}' has no present values to compute a statistic from")]
    EmptyColumn(String),

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Two columns share a name after schema normalization.
    #[error("Duplicate column '{0}' after normalizing column names")]
    DuplicateColumn(String),

    /// A numeric statistic was requested for a column that is not numeric.
    #[error("Column '{column}' has non-numeric type {dtype}")]
    NonNumericColumn { column: String, dtype: String },

    /// A numeric column still holds missing values when integer coercion runs.
    #[error("Column '{column}' still has {count} missing values")]
    UnresolvedMissing { column: String, count: usize },

    /// The source table could not be loaded.
    #[error("Failed to load data: {0}")]
    Load(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigValidationError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request error (remote sources, only with "remote" feature).
    #[cfg(feature = "remote")]
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// A stage failed; `source` holds the underlying cause.
    #[error("{stage} failed: {source}")]
    Stage {
        stage: CleaningStage,
        #[source]
        source: Box<CleaningError>,
    },

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CleaningError>,
    },
}

impl CleaningError {
    /// Build a parse error for a raw cell value.
    pub fn parse(
        column: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        CleaningError::Parse {
            column: column.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CleaningError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Attribute this error to a pipeline stage.
    ///
    /// An error that already names a stage keeps the innermost one.
    pub fn in_stage(self, stage: CleaningStage) -> Self {
        match self {
            already @ CleaningError::Stage { .. } => already,
            other => CleaningError::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// The stage that failed, if the error has been attributed to one.
    pub fn stage(&self) -> Option<CleaningStage> {
        match self {
            Self::Stage { stage, .. } => Some(*stage),
            Self::WithContext { source, .. } => source.stage(),
            _ => None,
        }
    }

    /// The column involved in the failure, when there is one.
    pub fn column(&self) -> Option<&str> {
        match self {
            Self::Parse { column, .. }
            | Self::NonNumericColumn { column, .. }
            | Self::UnresolvedMissing { column, .. } => Some(column),
            Self::EmptyColumn(column)
            | Self::ColumnNotFound(column)
            | Self::DuplicateColumn(column) => Some(column),
            Self::Stage { source, .. } | Self::WithContext { source, .. } => source.column(),
            _ => None,
        }
    }

    /// Get a stable error code for machine-readable output.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "PARSE_ERROR",
            Self::EmptyColumn(_) => "EMPTY_COLUMN",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::DuplicateColumn(_) => "DUPLICATE_COLUMN",
            Self::NonNumericColumn { .. } => "NON_NUMERIC_COLUMN",
            Self::UnresolvedMissing { .. } => "UNRESOLVED_MISSING",
            Self::Load(_) => "LOAD_FAILED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            #[cfg(feature = "remote")]
            Self::Http(_) => "HTTP_REQUEST_ERROR",
            Self::Stage { source, .. } | Self::WithContext { source, .. } => source.error_code(),
        }
    }
}

impl Serialize for CleaningError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("CleaningError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for cleaning operations.
pub type Result<T> = std::result::Result<T, CleaningError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CleaningError::Polars(e).with_context(context))
    }
}
