//! Configuration types for the analysis pipeline.
//!
//! This module provides configuration options using the builder pattern
//! for flexible and ergonomic pipeline setup.

use crate::schema::IMDB_RATING;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which estimator family to use for skewness and excess kurtosis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MomentBias {
    /// Adjusted Fisher-Pearson skewness (G1) with plain excess kurtosis
    /// `m4 / m2^2 - 3` (g2).
    #[default]
    Adjusted,
    /// Plain population moment ratios (g1, g2).
    Biased,
    /// G1 skewness with the bias-corrected excess kurtosis estimator (G2).
    FullyAdjusted,
}

/// Configuration for the analysis pipeline.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use episode_trends::config::{AnalysisConfig, MomentBias};
///
/// let config = AnalysisConfig::builder()
///     .target_column("U.S. Viewers (Millions)")
///     .histogram_bins(20)
///     .moment_bias(MomentBias::Biased)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Numeric column whose moments are computed and reported.
    /// Default: "IMDb Rating"
    pub target_column: String,

    /// Directory the chart images are written to.
    /// Default: "."
    pub output_dir: PathBuf,

    /// Whether to render the three charts.
    /// Default: true
    pub generate_plots: bool,

    /// Number of bins in the rating histogram.
    /// Default: 15
    pub histogram_bins: usize,

    /// Whether to overlay a kernel density estimate on the histogram.
    /// Default: true
    pub show_kde: bool,

    /// Chart width in pixels.
    /// Default: 800
    pub plot_width: u32,

    /// Chart height in pixels.
    /// Default: 500
    pub plot_height: u32,

    /// Estimator used for skewness and kurtosis.
    /// Default: Adjusted
    pub moment_bias: MomentBias,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            target_column: IMDB_RATING.to_string(),
            output_dir: PathBuf::from("."),
            generate_plots: true,
            histogram_bins: 15,
            show_kde: true,
            plot_width: 800,
            plot_height: 500,
            moment_bias: MomentBias::default(),
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Start a builder pre-filled with the values of this configuration.
    pub fn to_builder(&self) -> AnalysisConfigBuilder {
        AnalysisConfigBuilder {
            target_column: Some(self.target_column.clone()),
            output_dir: Some(self.output_dir.clone()),
            generate_plots: Some(self.generate_plots),
            histogram_bins: Some(self.histogram_bins),
            show_kde: Some(self.show_kde),
            plot_width: Some(self.plot_width),
            plot_height: Some(self.plot_height),
            moment_bias: Some(self.moment_bias),
        }
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.target_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyTargetColumn);
        }

        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::InvalidBins(self.histogram_bins));
        }

        if self.plot_width == 0 || self.plot_height == 0 {
            return Err(ConfigValidationError::InvalidPlotSize {
                width: self.plot_width,
                height: self.plot_height,
            });
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Target column name must not be empty")]
    EmptyTargetColumn,

    #[error("Invalid histogram bin count: {0} (must be at least 1)")]
    InvalidBins(usize),

    #[error("Invalid plot size {width}x{height} (both dimensions must be non-zero)")]
    InvalidPlotSize { width: u32, height: u32 },
}

impl From<ConfigValidationError> for crate::error::AnalysisError {
    fn from(e: ConfigValidationError) -> Self {
        crate::error::AnalysisError::InvalidConfig(e.to_string())
    }
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    target_column: Option<String>,
    output_dir: Option<PathBuf>,
    generate_plots: Option<bool>,
    histogram_bins: Option<usize>,
    show_kde: Option<bool>,
    plot_width: Option<u32>,
    plot_height: Option<u32>,
    moment_bias: Option<MomentBias>,
}

impl AnalysisConfigBuilder {
    /// Set the column whose moments are reported.
    pub fn target_column(mut self, column: impl Into<String>) -> Self {
        self.target_column = Some(column.into());
        self
    }

    /// Set the output directory for chart images.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Enable or disable chart rendering.
    pub fn generate_plots(mut self, generate: bool) -> Self {
        self.generate_plots = Some(generate);
        self
    }

    /// Set the number of histogram bins.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Enable or disable the KDE overlay on the histogram.
    pub fn show_kde(mut self, show: bool) -> Self {
        self.show_kde = Some(show);
        self
    }

    /// Set the chart dimensions in pixels.
    pub fn plot_size(mut self, width: u32, height: u32) -> Self {
        self.plot_width = Some(width);
        self.plot_height = Some(height);
        self
    }

    /// Select the skewness/kurtosis estimator.
    pub fn moment_bias(mut self, bias: MomentBias) -> Self {
        self.moment_bias = Some(bias);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            target_column: self.target_column.unwrap_or(defaults.target_column),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            generate_plots: self.generate_plots.unwrap_or(defaults.generate_plots),
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            show_kde: self.show_kde.unwrap_or(defaults.show_kde),
            plot_width: self.plot_width.unwrap_or(defaults.plot_width),
            plot_height: self.plot_height.unwrap_or(defaults.plot_height),
            moment_bias: self.moment_bias.unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.target_column, "IMDb Rating");
        assert_eq!(config.histogram_bins, 15);
        assert_eq!((config.plot_width, config.plot_height), (800, 500));
        assert_eq!(config.moment_bias, MomentBias::Adjusted);
        assert!(config.generate_plots);
        assert!(config.show_kde);
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AnalysisConfig::builder()
            .target_column("U.S. Viewers (Millions)")
            .histogram_bins(20)
            .plot_size(1200, 800)
            .moment_bias(MomentBias::Biased)
            .generate_plots(false)
            .build()
            .unwrap();

        assert_eq!(config.target_column, "U.S. Viewers (Millions)");
        assert_eq!(config.histogram_bins, 20);
        assert_eq!(config.plot_width, 1200);
        assert_eq!(config.moment_bias, MomentBias::Biased);
        assert!(!config.generate_plots);
    }

    #[test]
    fn test_validation_zero_bins() {
        let result = AnalysisConfig::builder().histogram_bins(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidBins(0)
        ));
    }

    #[test]
    fn test_validation_empty_target() {
        let result = AnalysisConfig::builder().target_column("  ").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyTargetColumn
        ));
    }

    #[test]
    fn test_validation_zero_plot_size() {
        let result = AnalysisConfig::builder().plot_size(0, 500).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidPlotSize { width: 0, .. }
        ));
    }

    #[test]
    fn test_to_builder_round_trips_overrides() {
        let base = AnalysisConfig::builder().histogram_bins(30).build().unwrap();
        let config = base.to_builder().show_kde(false).build().unwrap();
        assert_eq!(config.histogram_bins, 30);
        assert!(!config.show_kde);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "target_column": "Running Time (Minutes)", "moment_bias": "Biased" }"#;
        let config: AnalysisConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.target_column, "Running Time (Minutes)");
        assert_eq!(config.moment_bias, MomentBias::Biased);
        assert_eq!(config.histogram_bins, 15);
        assert!(config.validate().is_ok());
    }
}
