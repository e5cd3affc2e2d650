//! Episode Trend Analysis Library
//!
//! Cleaning, charting and distribution-shape analysis for per-episode TV
//! series datasets, built on Polars and Plotters.
//!
//! # Overview
//!
//! - **Preprocessing**: select the five analysed columns and drop every
//!   row with a missing value in any of them
//! - **Plotting**: viewers vs. rating scatter, per-season rating boxplot,
//!   rating histogram with density curve
//! - **Moments**: mean, standard deviation, skewness and excess kurtosis
//! - **Reporting**: a fixed-format text report classifying the shape of
//!   the distribution, plus an optional JSON report
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use episode_trends::{AnalysisConfig, AnalysisPipeline, io::load_csv, write_report};
//!
//! let df = load_csv("Game_of_Thrones.csv")?;
//! let config = AnalysisConfig::builder().output_dir("plots").build()?;
//! let outcome = AnalysisPipeline::new(config).run(&df)?;
//! write_report(&outcome.report);
//! ```
//!
//! Individual stages are usable on their own:
//!
//! ```rust,ignore
//! use episode_trends::{MomentBias, Preprocessor, column_moments, schema::IMDB_RATING};
//!
//! let table = Preprocessor::default().process(&df)?;
//! let moments = column_moments(&table, IMDB_RATING, MomentBias::Adjusted)?;
//! println!("{:?}", moments.as_tuple());
//! ```

pub mod config;
pub mod error;
pub mod io;
pub mod moments;
pub mod pipeline;
pub mod plots;
pub mod preprocessing;
pub mod reporting;
pub mod schema;
pub mod utils;

// Re-exports for convenient access
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError, MomentBias};
pub use error::{AnalysisError, Result as AnalysisResult, ResultExt};
pub use moments::{Moments, check_target, column_moments, frame_moments};
pub use pipeline::{AnalysisOutcome, AnalysisPipeline};
pub use plots::{PlotSettings, plot_categorical, plot_relational, plot_statistical, render_all};
pub use preprocessing::{CleanTable, Preprocessor};
pub use reporting::{
    AnalysisReport, KurtosisType, MomentReport, ReportGenerator, SkewType, write_report,
};
pub use schema::{ColumnKind, ColumnSpec, EpisodeSchema};
