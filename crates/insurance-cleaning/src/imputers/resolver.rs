//! Column-specific missing-value resolution.

use super::StatisticalImputer;
use crate::error::Result;
use crate::schema::ColumnId;
use polars::prelude::*;
use std::fmt;
use tracing::{debug, info};

/// Label written into categorical columns whose value is unknown.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// How missing values in one column are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingValuePolicy {
    /// Fill with the median of present values
    Median,
    /// Fill with the mean of present values
    Mean,
    /// Fill with the most frequent present value (smallest on ties)
    Mode,
    /// Fill with a fixed label
    Constant(&'static str),
    /// Drop rows where the value is missing
    DropRows,
}

impl fmt::Display for MissingValuePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Median => f.write_str("median"),
            Self::Mean => f.write_str("mean"),
            Self::Mode => f.write_str("mode"),
            Self::Constant(value) => write!(f, "constant '{}'", value),
            Self::DropRows => f.write_str("drop rows"),
        }
    }
}

/// The resolution plan, executed top to bottom.
///
/// Numeric statistics are computed before the `customer` drop, and the drop
/// happens before the categorical fills. Reordering changes the computed
/// statistics.
pub const RESOLUTION_PLAN: [(ColumnId, MissingValuePolicy); 11] = [
    (ColumnId::CustomerLifetimeValue, MissingValuePolicy::Median),
    (ColumnId::Income, MissingValuePolicy::Median),
    (ColumnId::MonthlyPremiumAuto, MissingValuePolicy::Mean),
    (ColumnId::NumberOfOpenComplaints, MissingValuePolicy::Mode),
    (ColumnId::TotalClaimAmount, MissingValuePolicy::Median),
    (ColumnId::Customer, MissingValuePolicy::DropRows),
    (ColumnId::State, MissingValuePolicy::Constant(UNKNOWN_LABEL)),
    (ColumnId::Gender, MissingValuePolicy::Constant(UNKNOWN_LABEL)),
    (ColumnId::Education, MissingValuePolicy::Mode),
    (ColumnId::PolicyType, MissingValuePolicy::Mode),
    (ColumnId::VehicleClass, MissingValuePolicy::Mode),
];

/// Apply one policy to one column.
pub fn apply_policy(
    mut df: DataFrame,
    column: ColumnId,
    policy: MissingValuePolicy,
    steps: &mut Vec<String>,
) -> Result<DataFrame> {
    debug!("Resolving missing '{}' with {}", column, policy);
    match policy {
        MissingValuePolicy::Median => {
            StatisticalImputer::apply_numeric_median(&mut df, column, steps)?
        }
        MissingValuePolicy::Mean => StatisticalImputer::apply_numeric_mean(&mut df, column, steps)?,
        MissingValuePolicy::Mode => {
            StatisticalImputer::apply_mode_imputation(&mut df, column, steps)?
        }
        MissingValuePolicy::Constant(value) => {
            StatisticalImputer::apply_constant_imputation(&mut df, column, value, steps)?
        }
        MissingValuePolicy::DropRows => {
            return StatisticalImputer::drop_missing_rows(df, column, steps);
        }
    }
    Ok(df)
}

/// Resolve missing values in every planned column.
///
/// After this stage none of the planned columns holds a null. Fails with
/// [`CleaningError::EmptyColumn`](crate::CleaningError::EmptyColumn) when a
/// statistic is needed for a column without present values.
pub fn resolve_missing_values(mut df: DataFrame, steps: &mut Vec<String>) -> Result<DataFrame> {
    let rows_before = df.height();
    for (column, policy) in RESOLUTION_PLAN {
        df = apply_policy(df, column, policy, steps)?;
    }
    info!(
        "Missing values resolved ({} -> {} rows)",
        rows_before,
        df.height()
    );
    Ok(df)
}
