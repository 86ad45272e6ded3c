//! Final table cleanup.
//!
//! This module provides the two stages that run after missing values are
//! resolved:
//! - Casting numeric columns to integers
//! - Removing exact-duplicate rows

mod deduplicator;
mod type_coercer;

pub use deduplicator::remove_duplicates;
pub use type_coercer::coerce_numeric_types;
