//! Insurance Customer Data Cleaning Library
//!
//! Turns a raw insurance customer table into a clean, analysis-ready one,
//! built on Polars.
//!
//! # Overview
//!
//! The pipeline runs a fixed sequence of stages:
//!
//! - **Schema**: lowercase column names, underscores for spaces, `st` becomes `state`
//! - **Categorical normalization**: gender, state, education and vehicle class
//!   mapped onto fixed vocabularies
//! - **Numeric parsing**: customer lifetime value percentages and the
//!   `1/N/00` open complaints encoding
//! - **Missing values**: per-column median, mean, mode, constant or row drop
//! - **Type coercion**: numeric columns truncated to integers
//! - **Deduplication**: exact duplicates removed, first occurrence kept
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use insurance_cleaning::{CleaningConfig, Pipeline};
//!
//! let config = CleaningConfig::builder()
//!     .source("data/file1.csv")
//!     .destination("cleaned_data.csv")
//!     .build()?;
//!
//! let result = Pipeline::builder().build().run(&config)?;
//! println!("{} rows after cleaning", result.summary.rows_after);
//! ```
//!
//! A table that is already in memory goes through [`Pipeline::process`]
//! instead, and nothing is written to disk.
//!
//! # Progress Reporting
//!
//! ```rust,ignore
//! use insurance_cleaning::Pipeline;
//!
//! let result = Pipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:?}] {}", update.stage, update.message);
//!     })
//!     .build()
//!     .process(df);
//!
//! match result {
//!     Ok(result) => println!("Removed {} duplicates", result.summary.duplicates_removed),
//!     Err(e) => println!("{:?} failed: {}", e.stage(), e),
//! }
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod io;
pub mod normalizers;
pub mod pipeline;
pub mod schema;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{CleaningConfig, CleaningConfigBuilder, ConfigValidationError};
pub use error::{CleaningError, ResultExt};
pub use imputers::{MissingValuePolicy, StatisticalImputer};
pub use io::{DataSource, LoadOptions};
pub use normalizers::ValueMap;
pub use pipeline::{
    CleaningStage, ClosureProgressReporter, Pipeline, PipelineBuilder, ProgressReporter,
    ProgressUpdate,
};
pub use schema::ColumnId;
pub use types::{CleaningResult, CleaningSummary, StageReport};
pub use utils::{fill_numeric_nulls, fill_string_nulls, is_numeric_dtype, total_null_count};
