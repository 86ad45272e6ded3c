//! Statistical imputation methods.
//!
//! Provides median, mean, mode and constant fills plus row dropping, each
//! scoped to one known column.

use crate::error::{CleaningError, Result};
use crate::normalizers::parse_numeric_text;
use crate::schema::{self, ColumnId};
use crate::utils::{
    fill_numeric_nulls, fill_string_nulls, is_numeric_dtype, numeric_mode, string_mode,
};
use polars::prelude::*;
use tracing::debug;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill missing values with the column median.
    pub fn apply_numeric_median(
        df: &mut DataFrame,
        column: ColumnId,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        let Some(series) = Self::numeric_with_missing(df, column)? else {
            return Ok(());
        };
        let median = series
            .median()
            .ok_or_else(|| CleaningError::EmptyColumn(column.as_str().to_string()))?;
        Self::fill_with_value(df, column, median, &series, processing_steps, "median")
    }

    /// Fill missing values with the column mean.
    pub fn apply_numeric_mean(
        df: &mut DataFrame,
        column: ColumnId,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        let Some(series) = Self::numeric_with_missing(df, column)? else {
            return Ok(());
        };
        let mean = series
            .mean()
            .ok_or_else(|| CleaningError::EmptyColumn(column.as_str().to_string()))?;
        Self::fill_with_value(df, column, mean, &series, processing_steps, "mean")
    }

    /// Fill missing values with the most frequent value.
    ///
    /// Numeric columns use the numeric mode, everything else the string mode.
    /// Ties resolve to the smallest candidate.
    pub fn apply_mode_imputation(
        df: &mut DataFrame,
        column: ColumnId,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        let series = schema::series(df, column)?;
        if series.null_count() == 0 {
            return Ok(());
        }
        let series = series.clone();
        let empty = || CleaningError::EmptyColumn(column.as_str().to_string());

        if is_numeric_dtype(series.dtype()) {
            let mode = numeric_mode(&series)?.ok_or_else(empty)?;
            Self::fill_with_value(df, column, mode, &series, processing_steps, "mode")
        } else {
            let mode = string_mode(&series)?.ok_or_else(empty)?;
            let filled = fill_string_nulls(&series, &mode)?;
            df.replace(column.as_str(), filled)?;

            debug!("Filled '{}' with mode '{}'", column, mode);
            processing_steps.push(format!(
                "Filled {} missing '{}' values with mode: '{}'",
                series.null_count(),
                column,
                mode
            ));
            Ok(())
        }
    }

    /// Fill missing values with a constant label.
    pub fn apply_constant_imputation(
        df: &mut DataFrame,
        column: ColumnId,
        value: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<()> {
        let series = schema::series(df, column)?;
        let missing = series.null_count();
        if missing == 0 {
            return Ok(());
        }
        let filled = fill_string_nulls(series, value)?;
        df.replace(column.as_str(), filled)?;

        debug!("Filled '{}' with constant '{}'", column, value);
        processing_steps.push(format!(
            "Filled {} missing '{}' values with constant value: '{}'",
            missing, column, value
        ));
        Ok(())
    }

    /// Drop every row where `column` is missing.
    pub fn drop_missing_rows(
        df: DataFrame,
        column: ColumnId,
        processing_steps: &mut Vec<String>,
    ) -> Result<DataFrame> {
        let series = schema::series(&df, column)?;
        let missing = series.null_count();
        if missing == 0 {
            return Ok(df);
        }
        let mask = series.is_not_null();
        let df = df.filter(&mask)?;

        debug!("Dropped {} rows with missing '{}'", missing, column);
        processing_steps.push(format!(
            "Dropped {} rows with missing '{}'",
            missing, column
        ));
        Ok(df)
    }

    /// The column as Float64 if it has missing values, `None` otherwise.
    ///
    /// A column with no present values fails with `EmptyColumn` whatever its
    /// dtype. Text columns are parsed when every present value is a number.
    fn numeric_with_missing(df: &DataFrame, column: ColumnId) -> Result<Option<Series>> {
        let series = schema::series(df, column)?;
        let missing = series.null_count();
        if missing == 0 {
            return Ok(None);
        }
        if missing == series.len() {
            return Err(CleaningError::EmptyColumn(column.as_str().to_string()));
        }

        let non_numeric = || CleaningError::NonNumericColumn {
            column: column.as_str().to_string(),
            dtype: series.dtype().to_string(),
        };
        match series.dtype() {
            dtype if is_numeric_dtype(dtype) => Ok(Some(series.cast(&DataType::Float64)?)),
            DataType::String => parse_numeric_text(series, column)
                .map(Some)
                .map_err(|_| non_numeric()),
            _ => Err(non_numeric()),
        }
    }

    /// Fill numeric column with a specific value.
    fn fill_with_value(
        df: &mut DataFrame,
        column: ColumnId,
        fill_value: f64,
        series: &Series,
        processing_steps: &mut Vec<String>,
        method: &str,
    ) -> Result<()> {
        let result = fill_numeric_nulls(series, fill_value)?;
        df.replace(column.as_str(), result)?;

        debug!("Filled '{}' with {} {:.2}", column, method, fill_value);
        processing_steps.push(format!(
            "Filled {} missing '{}' values with {}: {:.2}",
            series.null_count(),
            column,
            method,
            fill_value
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn float_at(df: &DataFrame, column: &str, idx: usize) -> f64 {
        df.column(column).unwrap().get(idx).unwrap().try_extract::<f64>().unwrap()
    }

    fn str_at(df: &DataFrame, column: &str, idx: usize) -> String {
        df.column(column)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .get(idx)
            .unwrap()
            .to_string()
    }

    // ========================================================================
    // apply_numeric_median() tests
    // ========================================================================

    #[test]
    fn test_apply_numeric_median_basic() {
        let mut df = df![
            "income" => [Some(1.0), None, Some(3.0), None, Some(5.0)],
        ]
        .unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::apply_numeric_median(&mut df, ColumnId::Income, &mut steps).unwrap();

        assert_eq!(df.column("income").unwrap().null_count(), 0);
        // Median of [1, 3, 5] = 3
        assert_eq!(float_at(&df, "income", 1), 3.0);
        assert_eq!(float_at(&df, "income", 3), 3.0);
        assert!(steps[0].contains("median"));
    }

    #[test]
    fn test_apply_numeric_median_even_count() {
        let mut df = df!["income" => [Some(1i64), Some(4), None]].unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::apply_numeric_median(&mut df, ColumnId::Income, &mut steps).unwrap();

        assert_eq!(float_at(&df, "income", 2), 2.5);
        assert!(steps[0].contains("2.50"));
    }

    #[test]
    fn test_apply_numeric_median_no_nulls_is_noop() {
        let mut df = df!["income" => [1i64, 2, 3]].unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::apply_numeric_median(&mut df, ColumnId::Income, &mut steps).unwrap();

        assert_eq!(df.column("income").unwrap().dtype(), &DataType::Int64);
        assert!(steps.is_empty());
    }

    #[test]
    fn test_apply_numeric_median_all_nulls() {
        let mut df = df!["income" => [Option::<f64>::None, None, None]].unwrap();
        let mut steps = Vec::new();

        let err = StatisticalImputer::apply_numeric_median(&mut df, ColumnId::Income, &mut steps)
            .unwrap_err();

        assert!(matches!(err, CleaningError::EmptyColumn(ref c) if c == "income"));
        assert!(steps.is_empty());
    }

    #[test]
    fn test_apply_numeric_median_all_nulls_read_as_text() {
        let mut df = df!["income" => [Option::<&str>::None, None]].unwrap();
        let mut steps = Vec::new();

        let err = StatisticalImputer::apply_numeric_median(&mut df, ColumnId::Income, &mut steps)
            .unwrap_err();

        assert_eq!(err.error_code(), "EMPTY_COLUMN");
    }

    #[test]
    fn test_apply_numeric_median_parses_numeric_text() {
        let mut df = df!["income" => [Some("1000"), None, Some("3000"), Some("2000")]].unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::apply_numeric_median(&mut df, ColumnId::Income, &mut steps).unwrap();

        let income = df.column("income").unwrap();
        assert_eq!(income.dtype(), &DataType::Float64);
        assert_eq!(income.f64().unwrap().get(1), Some(2000.0));
        assert!(steps[0].contains("median: 2000.00"));
    }

    #[test]
    fn test_apply_numeric_median_nonexistent_column() {
        let mut df = df!["other" => [1.0, 2.0, 3.0]].unwrap();
        let mut steps = Vec::new();

        let err = StatisticalImputer::apply_numeric_median(&mut df, ColumnId::Income, &mut steps)
            .unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_apply_numeric_median_rejects_text() {
        let mut df = df!["income" => [Some("a"), None]].unwrap();
        let mut steps = Vec::new();

        let err = StatisticalImputer::apply_numeric_median(&mut df, ColumnId::Income, &mut steps)
            .unwrap_err();
        assert_eq!(err.error_code(), "NON_NUMERIC_COLUMN");
    }

    // ========================================================================
    // apply_numeric_mean() tests
    // ========================================================================

    #[test]
    fn test_apply_numeric_mean_basic() {
        let mut df = df!["monthly_premium_auto" => [Some(10.0), None, Some(20.0)]].unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::apply_numeric_mean(&mut df, ColumnId::MonthlyPremiumAuto, &mut steps)
            .unwrap();

        // Original values preserved, mean = 15
        assert_eq!(float_at(&df, "monthly_premium_auto", 0), 10.0);
        assert_eq!(float_at(&df, "monthly_premium_auto", 1), 15.0);
        assert_eq!(float_at(&df, "monthly_premium_auto", 2), 20.0);
        assert!(steps[0].contains("mean"));
        assert!(matches!(
            df.column("monthly_premium_auto").unwrap().dtype(),
            DataType::Float64
        ));
    }

    // ========================================================================
    // apply_mode_imputation() tests
    // ========================================================================

    #[test]
    fn test_apply_mode_imputation_strings() {
        let mut df = df![
            "education" => [Some("Bachelor"), Some("Master"), Some("Bachelor"), None],
        ]
        .unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::apply_mode_imputation(&mut df, ColumnId::Education, &mut steps)
            .unwrap();

        assert_eq!(df.column("education").unwrap().null_count(), 0);
        assert_eq!(str_at(&df, "education", 3), "Bachelor");
        assert!(steps[0].contains("mode"));
    }

    #[test]
    fn test_apply_mode_imputation_numeric() {
        let mut df = df![
            "number_of_open_complaints" => [Some(0.0), Some(1.0), Some(0.0), None],
        ]
        .unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::apply_mode_imputation(
            &mut df,
            ColumnId::NumberOfOpenComplaints,
            &mut steps,
        )
        .unwrap();

        assert_eq!(float_at(&df, "number_of_open_complaints", 3), 0.0);
    }

    #[test]
    fn test_apply_mode_imputation_tie_breaking() {
        let mut df = df!["policy_type" => [Some("Personal Auto"), Some("Corporate Auto"), None]]
            .unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::apply_mode_imputation(&mut df, ColumnId::PolicyType, &mut steps)
            .unwrap();

        assert_eq!(str_at(&df, "policy_type", 2), "Corporate Auto");
    }

    #[test]
    fn test_apply_mode_imputation_all_nulls() {
        let mut df = df!["vehicle_class" => [Option::<&str>::None, None]].unwrap();
        let mut steps = Vec::new();

        let err =
            StatisticalImputer::apply_mode_imputation(&mut df, ColumnId::VehicleClass, &mut steps)
                .unwrap_err();
        assert_eq!(err.error_code(), "EMPTY_COLUMN");
    }

    // ========================================================================
    // apply_constant_imputation() tests
    // ========================================================================

    #[test]
    fn test_apply_constant_imputation_basic() {
        let mut df = df!["state" => [Some("Arizona"), None, Some("Nevada")]].unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::apply_constant_imputation(
            &mut df,
            ColumnId::State,
            "Unknown",
            &mut steps,
        )
        .unwrap();

        assert_eq!(df.column("state").unwrap().null_count(), 0);
        assert_eq!(str_at(&df, "state", 1), "Unknown");
        assert_eq!(str_at(&df, "state", 2), "Nevada");
        assert!(steps[0].contains("Unknown"));
    }

    #[test]
    fn test_apply_constant_imputation_entirely_missing() {
        let mut df = df!["gender" => [Option::<&str>::None, None]].unwrap();
        let mut steps = Vec::new();

        StatisticalImputer::apply_constant_imputation(
            &mut df,
            ColumnId::Gender,
            "Unknown",
            &mut steps,
        )
        .unwrap();

        assert_eq!(str_at(&df, "gender", 0), "Unknown");
    }

    // ========================================================================
    // drop_missing_rows() tests
    // ========================================================================

    #[test]
    fn test_drop_missing_rows() {
        let df = df![
            "customer" => [Some("A"), None, Some("C")],
            "income" => [1i64, 2, 3],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let df = StatisticalImputer::drop_missing_rows(df, ColumnId::Customer, &mut steps).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.column("customer").unwrap().null_count(), 0);
        assert_eq!(df.column("income").unwrap().get(1).unwrap().try_extract::<i64>().unwrap(), 3);
        assert!(steps[0].contains("Dropped 1 rows"));
    }
}
