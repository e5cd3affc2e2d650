use super::density::padded_range;
use super::{PlotSettings, RELATIONAL_FILE, ensure_rows, plot_err};
use crate::error::{AnalysisError, Result};
use crate::preprocessing::CleanTable;
use crate::schema::{IMDB_RATING, US_VIEWERS};
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;

const POINT_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Scatter of U.S. viewers (x) against IMDb rating (y).
pub fn plot_relational(
    table: &CleanTable,
    settings: &PlotSettings,
    output_dir: &Path,
) -> Result<PathBuf> {
    ensure_rows(table, "relational plot")?;

    let viewers = table.numeric(US_VIEWERS)?;
    let ratings = table.numeric(IMDB_RATING)?;
    let points: Vec<(f64, f64)> = viewers.into_iter().zip(ratings).collect();

    let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
    let (x_range, y_range) = padded_range(&xs, 0.05)
        .zip(padded_range(&ys, 0.05))
        .ok_or_else(|| AnalysisError::InsufficientData(US_VIEWERS.to_string()))?;

    let output_path = output_dir.join(RELATIONAL_FILE);
    debug!("Drawing {} points to {}", points.len(), output_path.display());
    draw_scatter(&points, x_range, y_range, settings, &output_path)?;

    Ok(output_path)
}

fn draw_scatter(
    points: &[(f64, f64)],
    x_range: Range<f64>,
    y_range: Range<f64>,
    settings: &PlotSettings,
    output_path: &Path,
) -> Result<()> {
    let root = BitMapBackend::new(output_path, settings.size()).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Relationship between IMDb Rating and U.S. Viewers",
            ("sans-serif", 24),
        )
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(US_VIEWERS)
        .y_desc(IMDB_RATING)
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, POINT_COLOR.mix(0.7).filled())),
        )
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}
