use super::density::padded_range;
use super::{CATEGORICAL_FILE, PlotSettings, coolwarm, ensure_rows, plot_err};
use crate::error::{AnalysisError, Result};
use crate::preprocessing::CleanTable;
use crate::schema::{IMDB_RATING, SEASON};
use crate::utils::ordered_categories;
use plotters::data::Quartiles;
use plotters::prelude::*;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Ratings of every episode in one season.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonGroup {
    pub label: String,
    pub ratings: Vec<f64>,
}

/// Group IMDb ratings by season.
///
/// Seasons are ordered numerically when every label is a number, and by
/// first appearance otherwise.
pub fn season_groups(table: &CleanTable) -> Result<Vec<SeasonGroup>> {
    let seasons = table.labels(SEASON)?;
    let ratings = table.numeric(IMDB_RATING)?;

    let groups = ordered_categories(&seasons)
        .into_iter()
        .map(|label| {
            let ratings = seasons
                .iter()
                .zip(&ratings)
                .filter(|(season, _)| **season == label)
                .map(|(_, rating)| *rating)
                .collect();
            SeasonGroup { label, ratings }
        })
        .collect();

    Ok(groups)
}

/// Boxplot of IMDb ratings per season.
pub fn plot_categorical(
    table: &CleanTable,
    settings: &PlotSettings,
    output_dir: &Path,
) -> Result<PathBuf> {
    ensure_rows(table, "categorical plot")?;

    let groups = season_groups(table)?;
    let quartiles: Vec<Quartiles> = groups
        .iter()
        .map(|g| Quartiles::new(g.ratings.as_slice()))
        .collect();

    // Keep whiskers inside the frame as well as the data.
    let mut extent: Vec<f64> = groups.iter().flat_map(|g| g.ratings.iter().copied()).collect();
    for q in &quartiles {
        let [lower_fence, _, _, _, upper_fence] = q.values();
        extent.push(f64::from(lower_fence));
        extent.push(f64::from(upper_fence));
    }
    let y_range = padded_range(&extent, 0.05)
        .map(|r| r.start as f32..r.end as f32)
        .ok_or_else(|| AnalysisError::InsufficientData(IMDB_RATING.to_string()))?;

    let output_path = output_dir.join(CATEGORICAL_FILE);
    debug!(
        "Drawing {} season boxes to {}",
        groups.len(),
        output_path.display()
    );
    draw_boxplot(&groups, &quartiles, y_range, settings, &output_path)?;

    Ok(output_path)
}

fn draw_boxplot(
    groups: &[SeasonGroup],
    quartiles: &[Quartiles],
    y_range: Range<f32>,
    settings: &PlotSettings,
    output_path: &Path,
) -> Result<()> {
    let labels: Vec<String> = groups.iter().map(|g| g.label.clone()).collect();
    let palette = coolwarm(groups.len());

    let root = BitMapBackend::new(output_path, settings.size()).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("IMDb Ratings by Season", ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(labels[..].into_segmented(), y_range)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc(SEASON)
        .y_desc(IMDB_RATING)
        .x_labels(labels.len())
        .x_label_formatter(&|v: &SegmentValue<&String>| match v {
            SegmentValue::CenterOf(label) => label.to_string(),
            _ => String::new(),
        })
        .light_line_style(WHITE)
        .label_style(("sans-serif", 14))
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(labels.iter().zip(quartiles).zip(&palette).map(
            |((label, q), color)| {
                Boxplot::new_vertical(SegmentValue::CenterOf(label), q)
                    .width(30)
                    .style(*color)
            },
        ))
        .map_err(plot_err)?;

    // Fliers beyond the 1.5 IQR fences.
    chart
        .draw_series(
            groups
                .iter()
                .zip(&labels)
                .zip(quartiles)
                .flat_map(|((group, label), q)| {
                    let [lower_fence, _, _, _, upper_fence] = q.values();
                    group
                        .ratings
                        .iter()
                        .map(|r| *r as f32)
                        .filter(move |r| *r < lower_fence || *r > upper_fence)
                        .map(move |r| {
                            Circle::new((SegmentValue::CenterOf(label), r), 3, BLACK.mix(0.6))
                        })
                }),
        )
        .map_err(plot_err)?;

    root.present().map_err(plot_err)?;
    Ok(())
}
