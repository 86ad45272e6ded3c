//! Integer coercion of numeric columns.

use crate::error::{CleaningError, Result};
use crate::normalizers::parse_numeric_text;
use crate::schema::ColumnId;
use crate::utils::is_numeric_dtype;
use polars::prelude::*;
use tracing::debug;

/// Cast every numeric column to Int64, truncating toward zero.
///
/// Known numeric columns that were loaded as text are parsed first and fail
/// with [`CleaningError::Parse`] on a value that is not a number. Other
/// non-numeric columns are left alone. A numeric column that still holds
/// missing values fails with [`CleaningError::UnresolvedMissing`].
pub fn coerce_numeric_types(mut df: DataFrame, steps: &mut Vec<String>) -> Result<DataFrame> {
    let numeric_columns: Vec<(String, DataType, Option<ColumnId>)> = df
        .get_columns()
        .iter()
        .filter_map(|col| {
            let text_id = ColumnId::from_name(col.name())
                .filter(|id| id.is_numeric() && col.dtype() == &DataType::String);
            (is_numeric_dtype(col.dtype()) || text_id.is_some())
                .then(|| (col.name().to_string(), col.dtype().clone(), text_id))
        })
        .collect();

    let mut converted = Vec::new();
    for (name, dtype, text_id) in numeric_columns {
        let raw = df.column(&name)?.as_materialized_series();
        let series = match text_id {
            Some(id) => parse_numeric_text(raw, id)?,
            None => raw.clone(),
        };
        let missing = series.null_count();
        if missing > 0 {
            return Err(CleaningError::UnresolvedMissing {
                column: name,
                count: missing,
            });
        }
        if dtype == DataType::Int64 {
            continue;
        }

        let cast = series.strict_cast(&DataType::Int64)?;
        df.replace(&name, cast)?;
        debug!("Cast '{}' from {} to Int64", name, dtype);
        converted.push(name);
    }

    if converted.is_empty() {
        steps.push("No numeric columns needed integer conversion".to_string());
    } else {
        steps.push(format!(
            "Converted {} numeric columns to integers: {}",
            converted.len(),
            converted.join(", ")
        ));
    }
    Ok(df)
}
