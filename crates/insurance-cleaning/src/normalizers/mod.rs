//! Field normalizers.
//!
//! Each normalizer rewrites the values of one known column into a canonical
//! vocabulary or a numeric form. Normalizers never change the row count and
//! leave missing values missing.
//!
//! - Categorical remaps (gender, state, education, vehicle class) go through
//!   a [`ValueMap`].
//! - Numeric parsers (customer lifetime value, open complaints) turn raw text
//!   into Float64 and fail with [`CleaningError::Parse`](crate::CleaningError::Parse)
//!   on values that are not numbers.

mod categorical;
mod numeric;

pub use categorical::{
    EDUCATION_MAP, GENDER_MAP, STATE_MAP, VEHICLE_CLASS_MAP, normalize_education,
    normalize_gender, normalize_state, normalize_vehicle_class,
};
pub(crate) use numeric::parse_numeric_text;
pub use numeric::{
    complaint_count_token, fix_open_complaints, normalize_customer_lifetime_value,
    strip_percent,
};

use std::collections::HashMap;

/// A finite map from raw variants to canonical labels.
///
/// Lookups are exact. Keys that are not in the map pass through unchanged.
#[derive(Debug, Clone)]
pub struct ValueMap {
    entries: HashMap<&'static str, &'static str>,
}

impl ValueMap {
    /// Build a map from `(raw, canonical)` pairs.
    pub fn new(pairs: &[(&'static str, &'static str)]) -> Self {
        Self {
            entries: pairs.iter().copied().collect(),
        }
    }

    /// The canonical label for `raw`, if it is a known variant.
    pub fn get(&self, raw: &str) -> Option<&'static str> {
        self.entries.get(raw).copied()
    }

    /// Map `raw` to its canonical label, or return it unchanged.
    pub fn apply<'a>(&self, raw: &'a str) -> &'a str {
        match self.get(raw) {
            Some(label) => label,
            None => raw,
        }
    }
}
