//! CLI entry point for the episode trend analysis.

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use episode_trends::{
    AnalysisConfig, AnalysisPipeline, AnalysisReport, MomentBias, ReportGenerator, io::load_csv,
    write_report,
};
use std::path::Path;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Episode dataset cleaning, charting and moment analysis",
    long_about = "Cleans a per-episode TV dataset, draws three charts and reports the \
                  mean, standard deviation, skewness and excess kurtosis of one column.\n\n\
                  EXAMPLES:\n  \
                  # Defaults: Game_of_Thrones.csv in the working directory\n  \
                  episode-trends\n\n  \
                  # Another file, charts into plots/\n  \
                  episode-trends -i episodes.csv -o plots/\n\n  \
                  # Statistics only, as JSON\n  \
                  episode-trends --no-plots --json"
)]
struct Args {
    /// Path to the CSV file to analyse
    #[arg(short, long, default_value = "Game_of_Thrones.csv")]
    input: String,

    /// Output directory for charts and reports
    #[arg(short, long, default_value = ".")]
    output: String,

    /// Numeric column whose moments are reported
    #[arg(short, long, default_value = "IMDb Rating")]
    column: String,

    /// Number of histogram bins
    #[arg(long, default_value = "15")]
    bins: usize,

    /// Use the plain moment ratio for skewness instead of the adjusted one
    #[arg(long, conflicts_with = "unbiased_kurtosis")]
    biased: bool,

    /// Use the bias-corrected excess kurtosis estimator
    #[arg(long)]
    unbiased_kurtosis: bool,

    /// Skip chart rendering
    #[arg(long)]
    no_plots: bool,

    /// Do not overlay a density curve on the histogram
    #[arg(long)]
    no_kde: bool,

    /// JSON file with base configuration; command-line flags take precedence
    #[arg(long)]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long)]
    quiet: bool,

    /// Output JSON to stdout instead of the text report
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long)]
    json: bool,

    /// Write a JSON report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = build_config(&args)?;
    let data = load_csv(&args.input).with_context(|| format!("Loading {}", args.input))?;

    let outcome = match AnalysisPipeline::new(config).run(&data) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Analysis failed: {}", e);
            return Err(anyhow!("Analysis failed: {}", e));
        }
    };

    let report = AnalysisReport::from_outcome(Some(&args.input), &outcome);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if args.emit_report {
        let generator = ReportGenerator::new(&args.output);
        let report_path = generator.write_report_to_file(&report, &extract_file_stem(&args.input))?;
        info!("Report written to: {}", report_path.display());
    }

    write_report(&outcome.report);
    Ok(())
}

/// Merge the optional config file with command-line flags.
///
/// Flags left at their defaults do not override values from the file.
fn build_config(args: &Args) -> Result<AnalysisConfig> {
    let base = match &args.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Reading config file {}", path))?;
            serde_json::from_str::<AnalysisConfig>(&content)
                .with_context(|| format!("Parsing config file {}", path))?
        }
        None => AnalysisConfig::default(),
    };
    let defaults = AnalysisConfig::default();

    let mut builder = base.to_builder();
    if args.column != defaults.target_column {
        builder = builder.target_column(&args.column);
    }
    if Path::new(&args.output) != defaults.output_dir.as_path() {
        builder = builder.output_dir(&args.output);
    }
    if args.bins != defaults.histogram_bins {
        builder = builder.histogram_bins(args.bins);
    }
    if args.biased {
        builder = builder.moment_bias(MomentBias::Biased);
    }
    if args.unbiased_kurtosis {
        builder = builder.moment_bias(MomentBias::FullyAdjusted);
    }
    if args.no_plots {
        builder = builder.generate_plots(false);
    }
    if args.no_kde {
        builder = builder.show_kde(false);
    }

    Ok(builder.build()?)
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}
