//! Report generation module.
//!
//! Turns computed [`Moments`](crate::moments::Moments) into the plain-text
//! interpretation printed at the end of a run, and into a JSON
//! [`AnalysisReport`] for `--json` / `--emit-report`.
//!
//! # Example
//!
//! ```rust,ignore
//! use episode_trends::reporting::{MomentReport, write_report};
//!
//! let report = MomentReport::new("IMDb Rating", moments);
//! write_report(&report);
//! // For the attribute IMDb Rating:
//! //   Mean = 8.80
//! //   ...
//! // The data is left-skewed and leptokurtic.
//! ```

mod generator;
mod interpretation;

pub use generator::{AnalysisReport, MomentReport, ReportGenerator, write_report};
pub use interpretation::{KurtosisType, SkewType};
