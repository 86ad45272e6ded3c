//! Known columns of the customer dataset and column-name normalization.
//!
//! Every column the pipeline touches is addressed through [`ColumnId`], so a
//! typo in a column name is a compile error rather than a runtime lookup
//! failure. The remaining runtime failure, a column absent from the loaded
//! table, is reported as [`CleaningError::ColumnNotFound`].

use crate::error::{CleaningError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

/// Raw column name that is renamed to [`ColumnId::State`].
pub const STATE_ALIAS: &str = "st";

/// Columns of the customer dataset, under their normalized names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnId {
    /// Customer identifier
    Customer,
    State,
    Gender,
    Education,
    CustomerLifetimeValue,
    Income,
    MonthlyPremiumAuto,
    NumberOfOpenComplaints,
    PolicyType,
    VehicleClass,
    TotalClaimAmount,
}

impl ColumnId {
    /// All known columns, in the order they appear in the source file.
    pub const ALL: [ColumnId; 11] = [
        ColumnId::Customer,
        ColumnId::State,
        ColumnId::Gender,
        ColumnId::Education,
        ColumnId::CustomerLifetimeValue,
        ColumnId::Income,
        ColumnId::MonthlyPremiumAuto,
        ColumnId::NumberOfOpenComplaints,
        ColumnId::PolicyType,
        ColumnId::VehicleClass,
        ColumnId::TotalClaimAmount,
    ];

    /// The normalized column name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::State => "state",
            Self::Gender => "gender",
            Self::Education => "education",
            Self::CustomerLifetimeValue => "customer_lifetime_value",
            Self::Income => "income",
            Self::MonthlyPremiumAuto => "monthly_premium_auto",
            Self::NumberOfOpenComplaints => "number_of_open_complaints",
            Self::PolicyType => "policy_type",
            Self::VehicleClass => "vehicle_class",
            Self::TotalClaimAmount => "total_claim_amount",
        }
    }

    /// Look up a column by its normalized name.
    pub fn from_name(name: &str) -> Option<ColumnId> {
        Self::ALL.into_iter().find(|id| id.as_str() == name)
    }

    /// Whether the cleaned table stores this column as an integer.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::CustomerLifetimeValue
                | Self::Income
                | Self::MonthlyPremiumAuto
                | Self::NumberOfOpenComplaints
                | Self::TotalClaimAmount
        )
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrow a known column as a materialized series.
pub fn series(df: &DataFrame, column: ColumnId) -> Result<&Series> {
    df.column(column.as_str())
        .map(|c| c.as_materialized_series())
        .map_err(|_| CleaningError::ColumnNotFound(column.as_str().to_string()))
}

/// Lowercase a column name and replace spaces with underscores.
pub fn normalize_column_name(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Normalize every column name and rename `st` to `state`.
///
/// Row count and values are untouched. Fails with
/// [`CleaningError::DuplicateColumn`] when two names collapse to the same
/// normalized name.
pub fn normalize_column_names(mut df: DataFrame, steps: &mut Vec<String>) -> Result<DataFrame> {
    let renames: Vec<(String, String)> = df
        .get_column_names()
        .iter()
        .map(|name| {
            let mut target = normalize_column_name(name);
            if target == STATE_ALIAS {
                target = ColumnId::State.as_str().to_string();
            }
            (name.to_string(), target)
        })
        .collect();

    let mut seen = HashSet::with_capacity(renames.len());
    for (_, target) in &renames {
        if !seen.insert(target.as_str()) {
            return Err(CleaningError::DuplicateColumn(target.clone()));
        }
    }

    let mut renamed = 0;
    for (original, target) in renames.iter().filter(|(o, t)| o != t) {
        df.rename(original, target.as_str().into())?;
        debug!("Renamed column '{}' -> '{}'", original, target);
        renamed += 1;
    }

    steps.push(format!("Normalized column names ({} renamed)", renamed));
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(df: &DataFrame) -> Vec<String> {
        df.get_column_names().iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("Customer Lifetime Value"), "customer_lifetime_value");
        assert_eq!(normalize_column_name("GENDER"), "gender");
        assert_eq!(normalize_column_name("already_clean"), "already_clean");
    }

    #[test]
    fn test_normalize_column_names_renames_state_alias() {
        let df = df![
            "Customer" => ["A1", "B2"],
            "ST" => ["AZ", "WA"],
            "Number of Open Complaints" => ["1/0/00", "1/2/00"],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let df = normalize_column_names(df, &mut steps).unwrap();

        assert_eq!(
            names(&df),
            vec!["customer", "state", "number_of_open_complaints"]
        );
        assert_eq!(df.height(), 2);
        assert!(steps[0].contains("3 renamed"));
    }

    #[test]
    fn test_normalize_column_names_is_idempotent() {
        let df = df![
            "Monthly Premium Auto" => [1, 2],
            "st" => ["Cali", "WA"],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let once = normalize_column_names(df, &mut steps).unwrap();
        let first_names = names(&once);
        let twice = normalize_column_names(once, &mut steps).unwrap();

        assert_eq!(first_names, names(&twice));
        assert!(steps[1].contains("0 renamed"));
    }

    #[test]
    fn test_normalize_column_names_without_alias() {
        let df = df!["Income" => [10, 20]].unwrap();
        let mut steps = Vec::new();

        let df = normalize_column_names(df, &mut steps).unwrap();
        assert_eq!(names(&df), vec!["income"]);
    }

    #[test]
    fn test_normalize_column_names_rejects_collisions() {
        let df = df![
            "ST" => ["AZ"],
            "State" => ["Arizona"],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let err = normalize_column_names(df, &mut steps).unwrap_err();
        assert!(matches!(err, CleaningError::DuplicateColumn(ref c) if c == "state"));
    }

    #[test]
    fn test_series_missing_column() {
        let df = df!["income" => [1, 2]].unwrap();
        let err = series(&df, ColumnId::Gender).unwrap_err();
        assert!(matches!(err, CleaningError::ColumnNotFound(ref c) if c == "gender"));
    }

    #[test]
    fn test_column_id_round_trip_names() {
        for id in ColumnId::ALL {
            assert_eq!(ColumnId::from_name(id.as_str()), Some(id));
        }
        assert_eq!(ColumnId::from_name("st"), None);
    }

    #[test]
    fn test_column_id_is_numeric() {
        let numeric: Vec<ColumnId> = ColumnId::ALL.into_iter().filter(|id| id.is_numeric()).collect();
        assert_eq!(
            numeric,
            vec![
                ColumnId::CustomerLifetimeValue,
                ColumnId::Income,
                ColumnId::MonthlyPremiumAuto,
                ColumnId::NumberOfOpenComplaints,
                ColumnId::TotalClaimAmount,
            ]
        );
    }
}
