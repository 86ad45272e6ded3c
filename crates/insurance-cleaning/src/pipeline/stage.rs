//! Pipeline stages and their fixed execution order.

use crate::cleaner::{coerce_numeric_types, remove_duplicates};
use crate::error::Result;
use crate::imputers::resolve_missing_values;
use crate::normalizers::{
    fix_open_complaints, normalize_customer_lifetime_value, normalize_education,
    normalize_gender, normalize_state, normalize_vehicle_class,
};
use crate::schema::normalize_column_names;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signature shared by every table-transforming stage.
pub type StageFn = fn(DataFrame, &mut Vec<String>) -> Result<DataFrame>;

/// Stages of the cleaning pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleaningStage {
    /// Reading the raw table from its source
    Loading,
    /// Lowercasing and underscoring column names
    SchemaNormalization,
    GenderNormalization,
    StateNormalization,
    EducationNormalization,
    LifetimeValueNormalization,
    VehicleClassNormalization,
    OpenComplaintsFix,
    /// Filling or dropping missing values per column
    MissingValueResolution,
    /// Casting numeric columns to integers
    TypeCoercion,
    /// Removing exact-duplicate rows
    Deduplication,
    /// Writing the cleaned table
    Saving,
    /// Pipeline completed successfully
    Complete,
    /// Pipeline failed with an error
    Failed,
}

impl CleaningStage {
    /// Table-transforming stages in execution order.
    pub const TRANSFORMS: [CleaningStage; 10] = [
        CleaningStage::SchemaNormalization,
        CleaningStage::GenderNormalization,
        CleaningStage::StateNormalization,
        CleaningStage::EducationNormalization,
        CleaningStage::LifetimeValueNormalization,
        CleaningStage::VehicleClassNormalization,
        CleaningStage::OpenComplaintsFix,
        CleaningStage::MissingValueResolution,
        CleaningStage::TypeCoercion,
        CleaningStage::Deduplication,
    ];

    /// Every non-terminal stage in execution order, I/O included.
    pub const ALL: [CleaningStage; 12] = [
        CleaningStage::Loading,
        CleaningStage::SchemaNormalization,
        CleaningStage::GenderNormalization,
        CleaningStage::StateNormalization,
        CleaningStage::EducationNormalization,
        CleaningStage::LifetimeValueNormalization,
        CleaningStage::VehicleClassNormalization,
        CleaningStage::OpenComplaintsFix,
        CleaningStage::MissingValueResolution,
        CleaningStage::TypeCoercion,
        CleaningStage::Deduplication,
        CleaningStage::Saving,
    ];

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Data",
            Self::SchemaNormalization => "Normalizing Column Names",
            Self::GenderNormalization => "Normalizing Gender",
            Self::StateNormalization => "Normalizing State",
            Self::EducationNormalization => "Normalizing Education",
            Self::LifetimeValueNormalization => "Parsing Customer Lifetime Value",
            Self::VehicleClassNormalization => "Normalizing Vehicle Class",
            Self::OpenComplaintsFix => "Decoding Open Complaints",
            Self::MissingValueResolution => "Resolving Missing Values",
            Self::TypeCoercion => "Converting Numeric Types",
            Self::Deduplication => "Removing Duplicates",
            Self::Saving => "Saving Data",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Returns the typical weight of this stage in the overall pipeline (0.0 - 1.0).
    ///
    /// Weights of the stages in [`CleaningStage::ALL`] sum to 1.0.
    pub fn weight(&self) -> f32 {
        match self {
            Self::Loading => 0.10,
            Self::SchemaNormalization => 0.05,
            Self::GenderNormalization => 0.05,
            Self::StateNormalization => 0.05,
            Self::EducationNormalization => 0.05,
            Self::LifetimeValueNormalization => 0.08,
            Self::VehicleClassNormalization => 0.05,
            Self::OpenComplaintsFix => 0.07,
            Self::MissingValueResolution => 0.25,
            Self::TypeCoercion => 0.07,
            Self::Deduplication => 0.08,
            Self::Saving => 0.10,
            Self::Complete => 0.0,
            Self::Failed => 0.0,
        }
    }

    /// Returns the cumulative progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Complete => 1.0,
            Self::Failed => 0.0,
            stage => Self::ALL
                .iter()
                .take_while(|s| *s != stage)
                .map(|s| s.weight())
                .sum(),
        }
    }

    /// The function that runs this stage, if it transforms the table.
    pub fn transform(&self) -> Option<StageFn> {
        let f: StageFn = match self {
            Self::SchemaNormalization => normalize_column_names,
            Self::GenderNormalization => normalize_gender,
            Self::StateNormalization => normalize_state,
            Self::EducationNormalization => normalize_education,
            Self::LifetimeValueNormalization => normalize_customer_lifetime_value,
            Self::VehicleClassNormalization => normalize_vehicle_class,
            Self::OpenComplaintsFix => fix_open_complaints,
            Self::MissingValueResolution => resolve_missing_values,
            Self::TypeCoercion => coerce_numeric_types,
            Self::Deduplication => remove_duplicates,
            Self::Loading | Self::Saving | Self::Complete | Self::Failed => return None,
        };
        Some(f)
    }
}

impl fmt::Display for CleaningStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
