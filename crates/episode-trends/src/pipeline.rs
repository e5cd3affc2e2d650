//! The end-to-end analysis run: clean, chart, measure, report.

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result, ResultExt};
use crate::moments::{check_target, column_moments};
use crate::plots::{self, PlotSettings};
use crate::preprocessing::{CleanTable, Preprocessor};
use crate::reporting::MomentReport;
use polars::prelude::DataFrame;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

/// Everything produced by one [`AnalysisPipeline::run`].
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub table: CleanTable,
    pub report: MomentReport,
    pub rows_before: usize,
    pub rows_after: usize,
    /// Chart files written, empty when plotting is disabled
    pub plots: Vec<PathBuf>,
    pub duration_ms: u64,
}

impl AnalysisOutcome {
    pub fn rows_removed(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }
}

/// Runs preprocessing, plotting and moment analysis in that order.
///
/// ```rust,ignore
/// let config = AnalysisConfig::builder().generate_plots(false).build()?;
/// let outcome = AnalysisPipeline::new(config).run(&df)?;
/// println!("{}", outcome.report);
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisPipeline {
    config: AnalysisConfig,
    preprocessor: Preprocessor,
}

static_assertions::assert_impl_all!(AnalysisPipeline: Send, Sync);

impl AnalysisPipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            preprocessor: Preprocessor::default(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyse a raw episode table.
    ///
    /// The input is not modified. Any error aborts the run; charts written
    /// before the failure are left on disk.
    pub fn run(&self, raw: &DataFrame) -> Result<AnalysisOutcome> {
        match self.run_internal(raw) {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!("Analysis error: {}", e);
                Err(e)
            }
        }
    }

    fn run_internal(&self, raw: &DataFrame) -> Result<AnalysisOutcome> {
        let start_time = Instant::now();
        self.config.validate()?;

        info!("Step 1: Cleaning dataset...");
        let rows_before = raw.height();
        let table = self
            .preprocessor
            .process(raw)
            .context("Preprocessing episode table")?;
        let rows_after = table.height();

        // Reject a bad target before any chart reaches the disk.
        check_target(&table, &self.config.target_column)?;
        if table.is_empty() {
            return Err(AnalysisError::InsufficientData(
                self.config.target_column.clone(),
            ));
        }

        let plots = if self.config.generate_plots {
            info!("Step 2: Rendering plots...");
            plots::render_all(
                &table,
                &PlotSettings::from_config(&self.config),
                &self.config.output_dir,
            )
            .context("Rendering plots")?
        } else {
            info!("Step 2: Skipping plots (disabled)");
            Vec::new()
        };

        info!("Step 3: Computing moments of '{}'...", self.config.target_column);
        let moments = column_moments(&table, &self.config.target_column, self.config.moment_bias)?;
        let report = MomentReport::new(self.config.target_column.clone(), moments);

        let duration_ms = start_time.elapsed().as_millis() as u64;
        info!("Analysis completed in {} ms", duration_ms);

        Ok(AnalysisOutcome {
            table,
            report,
            rows_before,
            rows_after,
            plots,
            duration_ms,
        })
    }
}
