//! Shared utilities for the cleaning pipeline.
//!
//! Series helpers used by more than one stage: dtype checks, value mapping,
//! null filling and central-tendency statistics.

use polars::prelude::*;
use std::cmp::Ordering;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Rewrite every present value of a Series as a string.
///
/// The Series is cast to String first; nulls are left untouched.
pub fn map_string_values<F>(series: &Series, f: F) -> PolarsResult<Series>
where
    F: Fn(&str) -> String,
{
    let as_str = series.cast(&DataType::String)?;
    let values: Vec<Option<String>> = as_str.str()?.into_iter().map(|v| v.map(&f)).collect();
    Ok(Series::new(series.name().clone(), values))
}

/// Fill null values in a numeric Series with a specific value.
///
/// The result is always Float64.
pub fn fill_numeric_nulls(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let as_float = series.cast(&DataType::Float64)?;
    let values: Vec<f64> = as_float
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(fill_value))
        .collect();
    Ok(Series::new(series.name().clone(), values))
}

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let as_str = series.cast(&DataType::String)?;
    let values: Vec<String> = as_str
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or(fill_value).to_string())
        .collect();
    Ok(Series::new(series.name().clone(), values))
}

/// Total number of nulls across all columns.
pub fn total_null_count(df: &DataFrame) -> usize {
    df.get_columns().iter().map(|col| col.null_count()).sum()
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Most frequent value under `cmp`; ties resolve to the smallest candidate.
fn first_mode<T, F>(mut values: Vec<T>, cmp: F) -> Option<T>
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    values.sort_by(&cmp);
    let mut best: Option<&[T]> = None;
    for run in values.chunk_by(|a, b| cmp(a, b).is_eq()) {
        if best.is_none_or(|b| run.len() > b.len()) {
            best = Some(run);
        }
    }
    best.map(|run| run[0].clone())
}

/// Calculate the mode of a numeric Series, ignoring nulls.
///
/// Returns `None` when the Series has no present values.
pub fn numeric_mode(series: &Series) -> PolarsResult<Option<f64>> {
    let as_float = series.cast(&DataType::Float64)?;
    let values: Vec<f64> = as_float.f64()?.into_iter().flatten().collect();
    Ok(first_mode(values, |a, b| a.total_cmp(b)))
}

/// Calculate the mode (most frequent value) of a string Series, ignoring nulls.
///
/// Returns `None` when the Series has no present values.
pub fn string_mode(series: &Series) -> PolarsResult<Option<String>> {
    let as_str = series.cast(&DataType::String)?;
    let values: Vec<&str> = as_str.str()?.into_iter().flatten().collect();
    Ok(first_mode(values, |a, b| a.cmp(b)).map(str::to_string))
}

// =============================================================================
// Tests
// =============================================================================
