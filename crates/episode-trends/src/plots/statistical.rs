use super::density::{GaussianKde, Histogram};
use super::{PlotSettings, ROYAL_BLUE, STATISTICAL_FILE, ensure_rows, plot_err};
use crate::error::{AnalysisError, Result};
use crate::preprocessing::CleanTable;
use crate::schema::IMDB_RATING;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

const KDE_POINTS: usize = 200;

/// Histogram of IMDb ratings, optionally overlaid with a density curve
/// scaled to bin counts.
pub fn plot_statistical(
    table: &CleanTable,
    settings: &PlotSettings,
    output_dir: &Path,
) -> Result<PathBuf> {
    ensure_rows(table, "statistical plot")?;

    let ratings = table.numeric(IMDB_RATING)?;
    let histogram = Histogram::new(&ratings, settings.histogram_bins)
        .ok_or_else(|| AnalysisError::InsufficientData(IMDB_RATING.to_string()))?;

    let curve = if settings.show_kde {
        // Scale density to counts: n values spread over bins of this width.
        let scale = ratings.len() as f64 * histogram.bin_width();
        GaussianKde::fit(&ratings)
            .map(|kde| kde.curve(histogram.span(), KDE_POINTS, scale))
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    let output_path = output_dir.join(STATISTICAL_FILE);
    debug!(
        "Drawing {}-bin histogram ({} KDE points) to {}",
        histogram.counts.len(),
        curve.len(),
        output_path.display()
    );
    draw_histogram(&histogram, &curve, settings, &output_path)?;

    Ok(output_path)
}

fn draw_histogram(
    histogram: &Histogram,
    curve: &[(f64, f64)],
    settings: &PlotSettings,
    output_path: &Path,
) -> Result<()> {
    let curve_peak = curve.iter().map(|p| p.1).fold(0.0, f64::max);
    let y_max = (histogram.max_count() as f64).max(curve_peak) * 1.1;

    let root = BitMapBackend::new(output_path, settings.size()).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Distribution of IMDb Ratings", ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(histogram.span(), 0.0..y_max.max(1.0))
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(IMDB_RATING)
        .y_desc("Frequency")
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(histogram.bins().map(|(start, end, count)| {
            Rectangle::new([(start, 0.0), (end, count as f64)], ROYAL_BLUE.mix(0.6).filled())
        }))
        .map_err(plot_err)?;

    chart
        .draw_series(histogram.bins().map(|(start, end, count)| {
            Rectangle::new([(start, 0.0), (end, count as f64)], WHITE.stroke_width(1))
        }))
        .map_err(plot_err)?;

    if !curve.is_empty() {
        chart
            .draw_series(LineSeries::new(
                curve.iter().copied(),
                ROYAL_BLUE.stroke_width(2),
            ))
            .map_err(plot_err)?;
    }

    root.present().map_err(plot_err)?;
    Ok(())
}
