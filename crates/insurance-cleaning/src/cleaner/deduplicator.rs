//! Exact-duplicate row removal.

use crate::error::Result;
use polars::prelude::*;
use tracing::debug;

/// Remove rows identical in every column to an earlier row.
///
/// The first occurrence is kept and row order is preserved, so positions in
/// the result form a dense zero-based index. Running it twice yields the same
/// table as running it once.
pub fn remove_duplicates(df: DataFrame, steps: &mut Vec<String>) -> Result<DataFrame> {
    let before = df.height();
    let df = df
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    let removed = before - df.height();

    if removed > 0 {
        let pct = (removed as f64 / before as f64) * 100.0;
        steps.push(format!("Removed {} duplicate rows ({:.1}%)", removed, pct));
        debug!("Removed {} duplicate rows", removed);
    } else {
        steps.push("No duplicate rows found".to_string());
        debug!("No duplicate rows found");
    }
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_duplicates_keeps_first() {
        let df = df![
            "customer" => ["A", "B", "A"],
            "income" => [10i64, 20, 10],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let df = remove_duplicates(df, &mut steps).unwrap();

        assert_eq!(df.height(), 2);
        let customers: Vec<Option<&str>> = df
            .column("customer")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(customers, vec![Some("A"), Some("B")]);
        assert!(steps[0].contains("Removed 1 duplicate rows"));
    }

    #[test]
    fn test_remove_duplicates_partial_match_is_kept() {
        let df = df![
            "customer" => ["A", "A"],
            "income" => [10i64, 11],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let df = remove_duplicates(df, &mut steps).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(steps[0], "No duplicate rows found");
    }

    #[test]
    fn test_remove_duplicates_is_idempotent() {
        let df = df![
            "customer" => [Some("A"), Some("B"), Some("A"), None, None],
            "state" => ["Arizona", "Nevada", "Arizona", "Oregon", "Oregon"],
        ]
        .unwrap();
        let mut steps = Vec::new();

        let once = remove_duplicates(df, &mut steps).unwrap();
        let twice = remove_duplicates(once.clone(), &mut steps).unwrap();

        assert_eq!(once.height(), 3);
        assert!(once.equals_missing(&twice));
    }
}
