//! Categorical remaps onto fixed vocabularies.

use super::ValueMap;
use crate::error::Result;
use crate::schema::{self, ColumnId};
use crate::utils::map_string_values;
use once_cell::sync::Lazy;
use polars::prelude::*;
use tracing::debug;

/// Gender variants, matched after lowercasing.
pub static GENDER_MAP: Lazy<ValueMap> = Lazy::new(|| {
    ValueMap::new(&[
        ("female", "F"),
        ("femal", "F"),
        ("f", "F"),
        ("male", "M"),
        ("m", "M"),
    ])
});

/// State abbreviations and shorthands.
pub static STATE_MAP: Lazy<ValueMap> = Lazy::new(|| {
    ValueMap::new(&[("AZ", "Arizona"), ("Cali", "California"), ("WA", "Washington")])
});

pub static EDUCATION_MAP: Lazy<ValueMap> =
    Lazy::new(|| ValueMap::new(&[("Bachelors", "Bachelor")]));

/// Luxury vehicle labels collapse into a single class.
pub static VEHICLE_CLASS_MAP: Lazy<ValueMap> = Lazy::new(|| {
    ValueMap::new(&[
        ("Sports Car", "Luxury"),
        ("Luxury SUV", "Luxury"),
        ("Luxury Car", "Luxury"),
    ])
});

/// Rewrite a column through a [`ValueMap`], optionally lowercasing first.
fn remap_column(
    mut df: DataFrame,
    column: ColumnId,
    map: &ValueMap,
    lowercase: bool,
    steps: &mut Vec<String>,
) -> Result<DataFrame> {
    let series = schema::series(&df, column)?;

    let mut changed = 0usize;
    let remapped = {
        let as_str = series.cast(&DataType::String)?;
        for raw in as_str.str()?.into_iter().flatten() {
            let key = if lowercase { raw.to_lowercase() } else { raw.to_string() };
            if map.apply(&key) != raw {
                changed += 1;
            }
        }
        map_string_values(series, |raw| {
            if lowercase {
                map.apply(&raw.to_lowercase()).to_string()
            } else {
                map.apply(raw).to_string()
            }
        })?
    };

    df.replace(column.as_str(), remapped)?;

    debug!("Normalized '{}': {} values changed", column, changed);
    steps.push(format!("Normalized '{}': {} values changed", column, changed));
    Ok(df)
}

/// Lowercase `gender` values and map them onto `F` / `M`.
///
/// Unmapped values keep their lowercased form.
pub fn normalize_gender(df: DataFrame, steps: &mut Vec<String>) -> Result<DataFrame> {
    remap_column(df, ColumnId::Gender, &GENDER_MAP, true, steps)
}

/// Expand state abbreviations (`AZ`, `Cali`, `WA`) to full names.
pub fn normalize_state(df: DataFrame, steps: &mut Vec<String>) -> Result<DataFrame> {
    remap_column(df, ColumnId::State, &STATE_MAP, false, steps)
}

/// Replace `Bachelors` with `Bachelor`.
pub fn normalize_education(df: DataFrame, steps: &mut Vec<String>) -> Result<DataFrame> {
    remap_column(df, ColumnId::Education, &EDUCATION_MAP, false, steps)
}

/// Collapse sports and luxury vehicle labels into `Luxury`.
pub fn normalize_vehicle_class(df: DataFrame, steps: &mut Vec<String>) -> Result<DataFrame> {
    remap_column(df, ColumnId::VehicleClass, &VEHICLE_CLASS_MAP, false, steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CleaningError;

    fn strings(df: &DataFrame, column: &str) -> Vec<Option<String>> {
        df.column(column)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    #[test]
    fn test_normalize_gender() {
        let df = df![
            "gender" => [Some("Female"), Some("femal"), Some("F"), Some("MALE"), Some("m"), None, Some("Other")],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let df = normalize_gender(df, &mut steps).unwrap();

        assert_eq!(
            strings(&df, "gender"),
            vec![
                Some("F".to_string()),
                Some("F".to_string()),
                Some("F".to_string()),
                Some("M".to_string()),
                Some("M".to_string()),
                None,
                Some("other".to_string()),
            ]
        );
        assert!(steps[0].contains("gender"));
    }

    #[test]
    fn test_normalize_gender_vocabulary() {
        let df = df![
            "gender" => ["f", "M", "female", "Male", "FEMAL"],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let df = normalize_gender(df, &mut steps).unwrap();

        for value in strings(&df, "gender").into_iter().flatten() {
            assert!(["F", "M"].contains(&value.as_str()), "unexpected label {value}");
        }
    }

    #[test]
    fn test_normalize_state() {
        let df = df![
            "state" => [Some("AZ"), Some("Cali"), Some("WA"), Some("Oregon"), None, Some("az")],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let df = normalize_state(df, &mut steps).unwrap();

        assert_eq!(
            strings(&df, "state"),
            vec![
                Some("Arizona".to_string()),
                Some("California".to_string()),
                Some("Washington".to_string()),
                Some("Oregon".to_string()),
                None,
                Some("az".to_string()),
            ]
        );
        assert!(steps[0].contains("3 values changed"));
    }

    #[test]
    fn test_normalize_education() {
        let df = df!["education" => ["Bachelors", "Master", "Bachelor"]].unwrap();
        let mut steps = Vec::new();

        let df = normalize_education(df, &mut steps).unwrap();

        assert_eq!(
            strings(&df, "education"),
            vec![
                Some("Bachelor".to_string()),
                Some("Master".to_string()),
                Some("Bachelor".to_string()),
            ]
        );
    }

    #[test]
    fn test_normalize_vehicle_class() {
        let df = df![
            "vehicle_class" => ["Sports Car", "Luxury SUV", "Luxury Car", "SUV", "Two-Door Car"],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let df = normalize_vehicle_class(df, &mut steps).unwrap();

        assert_eq!(
            strings(&df, "vehicle_class"),
            vec![
                Some("Luxury".to_string()),
                Some("Luxury".to_string()),
                Some("Luxury".to_string()),
                Some("SUV".to_string()),
                Some("Two-Door Car".to_string()),
            ]
        );
    }

    #[test]
    fn test_missing_column() {
        let df = df!["income" => [1, 2]].unwrap();
        let mut steps = Vec::new();

        let err = normalize_state(df, &mut steps).unwrap_err();
        assert!(matches!(err, CleaningError::ColumnNotFound(ref c) if c == "state"));
        assert!(steps.is_empty());
    }

    #[test]
    fn test_row_count_unchanged() {
        let df = df!["gender" => [Some("f"), None, Some("x")]].unwrap();
        let mut steps = Vec::new();

        let df = normalize_gender(df, &mut steps).unwrap();
        assert_eq!(df.height(), 3);
        assert_eq!(df.column("gender").unwrap().null_count(), 1);
    }
}
