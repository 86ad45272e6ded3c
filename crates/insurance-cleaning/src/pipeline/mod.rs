//! Pipeline orchestration module.
//!
//! This module contains the cleaning pipeline, its stages and progress
//! reporting.

mod builder;
pub mod progress;
mod stage;

pub use builder::{Pipeline, PipelineBuilder};
pub use progress::{ClosureProgressReporter, ProgressReporter, ProgressUpdate};
pub use stage::{CleaningStage, StageFn};
