//! Chart rendering for the cleaned episode table.
//!
//! Three independent charts are produced with the [`plotters`] bitmap
//! backend and saved as PNG files:
//!
//! - [`plot_relational`]: viewers vs. rating scatter (`relational_plot.png`)
//! - [`plot_categorical`]: rating boxplot per season (`categorical_plot.png`)
//! - [`plot_statistical`]: rating histogram with KDE (`statistical_plot.png`)
//!
//! None of them touch the table; each returns the path it wrote.

mod categorical;
pub mod density;
mod relational;
mod statistical;

pub use categorical::{SeasonGroup, plot_categorical, season_groups};
pub use relational::plot_relational;
pub use statistical::plot_statistical;

use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::preprocessing::CleanTable;
use plotters::style::RGBColor;
use std::path::{Path, PathBuf};
use tracing::info;

pub const RELATIONAL_FILE: &str = "relational_plot.png";
pub const CATEGORICAL_FILE: &str = "categorical_plot.png";
pub const STATISTICAL_FILE: &str = "statistical_plot.png";

/// Royal blue, used for the histogram and its density curve.
pub(crate) const ROYAL_BLUE: RGBColor = RGBColor(65, 105, 225);

/// Rendering options shared by all three charts.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSettings {
    pub width: u32,
    pub height: u32,
    pub histogram_bins: usize,
    pub show_kde: bool,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl PlotSettings {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            width: config.plot_width,
            height: config.plot_height,
            histogram_bins: config.histogram_bins,
            show_kde: config.show_kde,
        }
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// Render all three charts into `output_dir`, creating it if needed.
pub fn render_all(
    table: &CleanTable,
    settings: &PlotSettings,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    let paths = vec![
        plot_relational(table, settings, output_dir)?,
        plot_categorical(table, settings, output_dir)?,
        plot_statistical(table, settings, output_dir)?,
    ];

    for path in &paths {
        info!("Plot saved: {}", path.display());
    }
    Ok(paths)
}

/// `n` colours sampled evenly from a blue-grey-red diverging ramp.
pub fn coolwarm(n: usize) -> Vec<RGBColor> {
    const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
    const MID: (f64, f64, f64) = (221.0, 221.0, 221.0);
    const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

    let lerp = |a: (f64, f64, f64), b: (f64, f64, f64), t: f64| {
        RGBColor(
            (a.0 + (b.0 - a.0) * t).round() as u8,
            (a.1 + (b.1 - a.1) * t).round() as u8,
            (a.2 + (b.2 - a.2) * t).round() as u8,
        )
    };

    (0..n)
        .map(|i| {
            let t = if n == 1 { 0.5 } else { i as f64 / (n - 1) as f64 };
            if t <= 0.5 {
                lerp(COOL, MID, t * 2.0)
            } else {
                lerp(MID, WARM, (t - 0.5) * 2.0)
            }
        })
        .collect()
}

pub(crate) fn plot_err<E: std::fmt::Display>(e: E) -> AnalysisError {
    AnalysisError::Plot(e.to_string())
}

pub(crate) fn ensure_rows(table: &CleanTable, chart: &str) -> Result<()> {
    if table.is_empty() {
        return Err(AnalysisError::Plot(format!(
            "{chart}: table has no rows to plot"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::Preprocessor;
    use crate::schema::{IMDB_RATING, ROTTEN_TOMATOES, RUNNING_TIME, SEASON, US_VIEWERS};
    use polars::prelude::*;

    #[test]
    fn test_coolwarm_endpoints() {
        let palette = coolwarm(3);
        assert_eq!(palette[0], RGBColor(59, 76, 192));
        assert_eq!(palette[1], RGBColor(221, 221, 221));
        assert_eq!(palette[2], RGBColor(180, 4, 38));
        assert_eq!(coolwarm(1), vec![RGBColor(221, 221, 221)]);
        assert!(coolwarm(0).is_empty());
    }

    #[test]
    fn test_settings_follow_config() {
        let config = AnalysisConfig::builder()
            .plot_size(640, 480)
            .histogram_bins(9)
            .show_kde(false)
            .build()
            .unwrap();
        let settings = PlotSettings::from_config(&config);
        assert_eq!(settings.size(), (640, 480));
        assert_eq!(settings.histogram_bins, 9);
        assert!(!settings.show_kde);
    }

    #[test]
    fn test_empty_table_is_rejected_before_drawing() {
        let df = df!(
            SEASON => &[Some(1i64)],
            RUNNING_TIME => &[Some(60i64)],
            US_VIEWERS => &[None::<f64>],
            IMDB_RATING => &[Some(8.0f64)],
            ROTTEN_TOMATOES => &[Some(90i64)],
        )
        .unwrap();
        let table = Preprocessor::default().process(&df).unwrap();
        assert!(table.is_empty());

        let dir = tempfile::tempdir().unwrap();
        let err = render_all(&table, &PlotSettings::default(), dir.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::Plot(_)));
        assert!(!dir.path().join(RELATIONAL_FILE).exists());
    }
}
