//! Main cleaning pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! running the cleaning stages in their fixed order.

use crate::config::CleaningConfig;
use crate::error::Result;
use crate::io;
use crate::pipeline::progress::{ClosureProgressReporter, ProgressReporter, ProgressUpdate};
use crate::pipeline::CleaningStage;
use crate::types::{CleaningResult, CleaningSummary, StageReport};
use crate::utils::total_null_count;
use polars::prelude::DataFrame;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// The cleaning pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline.
///
/// # Example
///
/// ```rust,ignore
/// use insurance_cleaning::{CleaningConfig, Pipeline};
///
/// // In-memory
/// let result = Pipeline::builder().build().process(dataframe)?;
///
/// // Source to destination, with progress reporting
/// let result = Pipeline::builder()
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .build()
///     .run(&CleaningConfig::default())?;
/// ```
pub struct Pipeline {
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

// Pipeline can be moved to a worker thread.
static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Clean an already-loaded table.
    ///
    /// Runs every transforming stage in [`CleaningStage::TRANSFORMS`] order.
    /// The first failing stage aborts the run; its error names the stage.
    pub fn process(&self, df: DataFrame) -> Result<CleaningResult> {
        let outcome = self.clean(df);
        self.finish(outcome)
    }

    /// Load the configured source, clean it, and save it if requested.
    ///
    /// Nothing is written unless every stage succeeds.
    pub fn run(&self, config: &CleaningConfig) -> Result<CleaningResult> {
        let outcome = self.run_internal(config);
        self.finish(outcome)
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn finish(&self, outcome: Result<CleaningResult>) -> Result<CleaningResult> {
        match outcome {
            Ok(result) => {
                self.report_progress(
                    ProgressUpdate::complete("Cleaning completed successfully")
                        .rows(result.data.height()),
                );
                Ok(result)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Cleaning pipeline error: {}", e);
                Err(e)
            }
        }
    }

    fn run_internal(&self, config: &CleaningConfig) -> Result<CleaningResult> {
        let start_time = Instant::now();
        config.validate()?;

        let source = config.data_source();
        self.report_progress(ProgressUpdate::new(
            CleaningStage::Loading,
            0.0,
            format!("Loading data from {}...", source),
        ));
        let df = io::load(&source, &config.load_options())
            .map_err(|e| e.in_stage(CleaningStage::Loading))?;
        let loading = StageReport {
            stage: CleaningStage::Loading,
            rows_before: 0,
            rows_after: df.height(),
            actions: vec![format!(
                "Loaded {} rows x {} columns from {}",
                df.height(),
                df.width(),
                source
            )],
        };
        self.report_progress(
            ProgressUpdate::new(CleaningStage::Loading, 1.0, "Data loaded").rows(df.height()),
        );

        let mut result = self.clean(df)?;
        result.summary.stages.insert(0, loading);

        if config.save_to_disk {
            let rows = result.data.height();
            self.report_progress(
                ProgressUpdate::new(
                    CleaningStage::Saving,
                    0.0,
                    format!("Saving to {}...", config.destination.display()),
                )
                .rows(rows),
            );
            io::save(&mut result.data, &config.destination)
                .map_err(|e| e.in_stage(CleaningStage::Saving))?;
            result.summary.stages.push(StageReport {
                stage: CleaningStage::Saving,
                rows_before: rows,
                rows_after: rows,
                actions: vec![format!(
                    "Saved cleaned data to {}",
                    config.destination.display()
                )],
            });
            self.report_progress(
                ProgressUpdate::new(CleaningStage::Saving, 1.0, "Data saved").rows(rows),
            );
        } else {
            info!("Skipping save (save_to_disk = false)");
        }

        result.summary.duration_ms = start_time.elapsed().as_millis() as u64;
        result.summary.completed_at = Some(chrono::Local::now().to_rfc3339());
        Ok(result)
    }

    fn clean(&self, df: DataFrame) -> Result<CleaningResult> {
        let start_time = Instant::now();
        info!(
            "Starting cleaning pipeline ({} rows x {} columns)...",
            df.height(),
            df.width()
        );

        let mut summary = CleaningSummary::new();
        summary.rows_before = df.height();
        summary.columns_before = df.width();
        summary.nulls_before = total_null_count(&df);

        let mut df = df;
        for stage in CleaningStage::TRANSFORMS {
            let Some(transform) = stage.transform() else {
                continue;
            };

            let rows_before = df.height();
            self.report_progress(
                ProgressUpdate::new(stage, 0.0, format!("{}...", stage)).rows(rows_before),
            );
            info!("{}...", stage);

            let mut actions = Vec::new();
            df = transform(df, &mut actions).map_err(|e| e.in_stage(stage))?;
            for action in &actions {
                debug!("{}: {}", stage, action);
            }

            self.report_progress(
                ProgressUpdate::new(stage, 1.0, format!("{} complete", stage)).rows(df.height()),
            );
            summary.stages.push(StageReport {
                stage,
                rows_before,
                rows_after: df.height(),
                actions,
            });
        }

        summary.rows_after = df.height();
        summary.columns_after = df.width();
        summary.nulls_after = total_null_count(&df);
        summary.duplicates_removed = summary
            .stage(CleaningStage::Deduplication)
            .map_or(0, StageReport::rows_removed);
        summary.rows_dropped_missing_customer = summary
            .stage(CleaningStage::MissingValueResolution)
            .map_or(0, StageReport::rows_removed);
        summary.duration_ms = start_time.elapsed().as_millis() as u64;
        summary.completed_at = Some(chrono::Local::now().to_rfc3339());

        info!(
            "Cleaning finished: {} -> {} rows, {} duplicates removed, {} rows without customer dropped",
            summary.rows_before,
            summary.rows_after,
            summary.duplicates_removed,
            summary.rows_dropped_missing_customer
        );

        Ok(CleaningResult { data: df, summary })
    }
}

/// Builder for [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl PipelineBuilder {
    /// Set a progress reporter.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a closure to receive progress updates.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    pub fn build(self) -> Pipeline {
        Pipeline {
            progress_reporter: self.progress_reporter,
        }
    }
}
