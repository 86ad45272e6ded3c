use crate::pipeline::CleaningStage;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Output of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct CleaningResult {
    /// The cleaned table.
    pub data: DataFrame,
    /// What the pipeline did to get there.
    pub summary: CleaningSummary,
}

// ============================================================================
// Cleaning Summary Types
// ============================================================================

/// Human-readable summary of what the pipeline did.
///
/// # Example
///
/// ```rust,ignore
/// let result = Pipeline::builder().build().process(df)?;
/// println!(
///     "Cleaned {} rows into {} in {}ms",
///     result.summary.rows_before, result.summary.rows_after, result.summary.duration_ms
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Total execution time in milliseconds.
    pub duration_ms: u64,

    /// Number of rows before cleaning.
    pub rows_before: usize,
    /// Number of rows after cleaning.
    pub rows_after: usize,

    /// Number of columns before cleaning.
    pub columns_before: usize,
    /// Number of columns after cleaning.
    pub columns_after: usize,

    /// Rows removed because they were exact duplicates.
    pub duplicates_removed: usize,
    /// Rows removed because the customer identifier was missing.
    pub rows_dropped_missing_customer: usize,

    /// Missing cells across the whole table before cleaning.
    pub nulls_before: usize,
    /// Missing cells across the whole table after cleaning.
    pub nulls_after: usize,

    /// RFC 3339 timestamp of when the run finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,

    /// One report per executed stage, in execution order.
    pub stages: Vec<StageReport>,
}

impl CleaningSummary {
    /// Create a new empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total rows removed by any stage.
    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }

    /// Calculate the percentage of rows removed.
    pub fn rows_removed_percentage(&self) -> f32 {
        if self.rows_before == 0 {
            0.0
        } else {
            (self.rows_removed() as f32 / self.rows_before as f32) * 100.0
        }
    }

    /// Report for a given stage, if it ran.
    pub fn stage(&self, stage: CleaningStage) -> Option<&StageReport> {
        self.stages.iter().find(|report| report.stage == stage)
    }
}

/// What a single stage did to the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: CleaningStage,
    pub rows_before: usize,
    pub rows_after: usize,
    /// Step messages emitted by the stage.
    pub actions: Vec<String>,
}

impl StageReport {
    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }
}
