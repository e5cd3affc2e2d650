use crate::error::Result;
use crate::moments::Moments;
use crate::pipeline::AnalysisOutcome;
use crate::reporting::{KurtosisType, SkewType};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

// ============================================================================
// Text Report
// ============================================================================

/// The moments of one column together with their shape classification.
///
/// `Display` renders the plain-text report; values keep full precision and
/// are only rounded to two decimals when formatted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MomentReport {
    pub column: String,
    pub moments: Moments,
    pub skew_type: SkewType,
    pub kurtosis_type: KurtosisType,
}

static_assertions::assert_impl_all!(MomentReport: Send, Sync);

impl MomentReport {
    pub fn new(column: impl Into<String>, moments: Moments) -> Self {
        Self {
            column: column.into(),
            skew_type: SkewType::classify(moments.skewness),
            kurtosis_type: KurtosisType::classify(moments.excess_kurtosis),
            moments,
        }
    }
}

impl fmt::Display for MomentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.moments;
        writeln!(f, "For the attribute {}:", self.column)?;
        writeln!(f, "  Mean = {:.2}", m.mean)?;
        writeln!(f, "  Standard Deviation = {:.2}", m.std_dev)?;
        writeln!(f, "  Skewness = {:.2}", m.skewness)?;
        writeln!(f, "  Excess Kurtosis = {:.2}", m.excess_kurtosis)?;
        write!(
            f,
            "The data is {} and {}.",
            self.skew_type, self.kurtosis_type
        )
    }
}

/// Print the report to stdout and hand back the text that was printed.
pub fn write_report(report: &MomentReport) -> String {
    let text = report.to_string();
    println!("{text}");
    text
}

// ============================================================================
// JSON Report
// ============================================================================

/// Machine-readable summary of one analysis run.
///
/// Used for `--json` stdout output and for `--emit-report` files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file, when the table came from disk
    pub input_file: Option<String>,
    pub rows_before: usize,
    pub rows_after: usize,
    pub rows_removed: usize,
    /// Wall-clock duration of the run in milliseconds
    pub duration_ms: u64,
    /// Chart images written during the run
    pub plots: Vec<String>,
    pub statistics: MomentReport,
    /// The text report exactly as printed
    pub summary: String,
}

impl AnalysisReport {
    pub fn from_outcome(input_file: Option<&str>, outcome: &AnalysisOutcome) -> Self {
        Self {
            generated_at: Local::now().to_rfc3339(),
            input_file: input_file.map(str::to_string),
            rows_before: outcome.rows_before,
            rows_after: outcome.rows_after,
            rows_removed: outcome.rows_removed(),
            duration_ms: outcome.duration_ms,
            plots: outcome
                .plots
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            statistics: outcome.report.clone(),
            summary: outcome.report.to_string(),
        }
    }
}

/// Writes JSON reports into an output directory.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write `report` as `<base_name>_report.json` and return its path.
    pub fn write_report_to_file(
        &self,
        report: &AnalysisReport,
        base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self.output_dir.join(format!("{}_report.json", base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}
