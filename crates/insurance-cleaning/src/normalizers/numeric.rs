//! Numeric parsing of text-encoded columns.

use crate::error::{CleaningError, Result};
use crate::schema::{self, ColumnId};
use crate::utils::is_numeric_dtype;
use polars::prelude::*;
use std::borrow::Cow;
use tracing::debug;

/// Remove every `%` from a raw lifetime-value string.
pub fn strip_percent(raw: &str) -> Cow<'_, str> {
    if raw.contains('%') {
        Cow::Owned(raw.replace('%', ""))
    } else {
        Cow::Borrowed(raw)
    }
}

/// The complaint count encoded in a raw value.
///
/// Values of the form `A/B/C` carry the count in the middle field; anything
/// without a `/` is the count itself.
pub fn complaint_count_token(raw: &str) -> &str {
    raw.split('/').nth(1).unwrap_or(raw)
}

/// Parse a column into Float64, extracting the numeric token of each value
/// with `extract` first.
///
/// Columns that are already numeric are cast directly. `NaN` parses to a
/// missing value; infinities are rejected.
fn parse_float_column<F>(series: &Series, column: ColumnId, extract: F) -> Result<Series>
where
    F: Fn(&str) -> Cow<'_, str>,
{
    if is_numeric_dtype(series.dtype()) {
        return Ok(series.cast(&DataType::Float64)?);
    }

    let as_str = series.cast(&DataType::String)?;
    let mut values: Vec<Option<f64>> = Vec::with_capacity(as_str.len());
    for raw in as_str.str()?.into_iter() {
        let parsed = match raw {
            Some(raw) => {
                let token = extract(raw);
                let value = token
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| CleaningError::parse(column.as_str(), raw, e))?;
                if value.is_infinite() {
                    return Err(CleaningError::parse(column.as_str(), raw, "value is not finite"));
                }
                (!value.is_nan()).then_some(value)
            }
            None => None,
        };
        values.push(parsed);
    }

    Ok(Series::new(series.name().clone(), values))
}

/// Parse a column read as plain text into Float64.
///
/// Used for numeric columns that the loader could only read as text.
pub(crate) fn parse_numeric_text(series: &Series, column: ColumnId) -> Result<Series> {
    parse_float_column(series, column, |raw| Cow::Borrowed(raw))
}

/// Strip `%` from `customer_lifetime_value` and parse it as a float.
///
/// Fails with [`CleaningError::Parse`] when the stripped value is not a number.
pub fn normalize_customer_lifetime_value(
    mut df: DataFrame,
    steps: &mut Vec<String>,
) -> Result<DataFrame> {
    let column = ColumnId::CustomerLifetimeValue;
    let parsed = parse_float_column(schema::series(&df, column)?, column, strip_percent)?;
    let present = parsed.len() - parsed.null_count();
    df.replace(column.as_str(), parsed)?;

    debug!("Parsed {} lifetime values", present);
    steps.push(format!("Parsed '{}' as numeric ({} values)", column, present));
    Ok(df)
}

/// Decode `number_of_open_complaints` values and parse them as floats.
///
/// `1/2/00` becomes `2.0`, `3` becomes `3.0`. Fails with
/// [`CleaningError::Parse`] when the extracted token is not a number.
pub fn fix_open_complaints(mut df: DataFrame, steps: &mut Vec<String>) -> Result<DataFrame> {
    let column = ColumnId::NumberOfOpenComplaints;
    let parsed = parse_float_column(schema::series(&df, column)?, column, |raw| {
        Cow::Borrowed(complaint_count_token(raw))
    })?;
    let present = parsed.len() - parsed.null_count();
    df.replace(column.as_str(), parsed)?;

    debug!("Decoded {} complaint counts", present);
    steps.push(format!("Decoded '{}' complaint counts ({} values)", column, present));
    Ok(df)
}
