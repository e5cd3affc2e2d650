//! Shared column helpers used by the preprocessor, the moment calculator
//! and the plotters.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// Missing Value Utilities
// =============================================================================

/// Per-row missing flags for a series: `true` where the value is null,
/// or NaN in a float column.
pub fn missing_mask(series: &Series) -> PolarsResult<Vec<bool>> {
    if series.dtype().is_float() {
        let floats = series.cast(&DataType::Float64)?;
        Ok(floats
            .f64()?
            .into_iter()
            .map(|v| v.is_none_or(f64::is_nan))
            .collect())
    } else {
        Ok(series
            .is_null()
            .into_iter()
            .map(|v| v.unwrap_or(true))
            .collect())
    }
}

/// All present values of a numeric series as `f64`, skipping nulls and NaN.
///
/// Callers are expected to have checked [`is_numeric_dtype`] first.
pub fn present_f64_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

/// String labels for every row of a categorical series; nulls become `""`.
pub fn category_labels(series: &Series) -> PolarsResult<Vec<String>> {
    let strings = series.cast(&DataType::String)?;
    Ok(strings
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect())
}

/// Orders distinct category labels: numerically when every label parses as
/// a number, otherwise in order of first appearance.
pub fn ordered_categories(labels: &[String]) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::new();
    for label in labels {
        if !distinct.contains(label) {
            distinct.push(label.clone());
        }
    }

    let numeric: Option<Vec<f64>> = distinct.iter().map(|l| l.trim().parse().ok()).collect();
    if let Some(keys) = numeric {
        let mut paired: Vec<(f64, String)> = keys.into_iter().zip(distinct).collect();
        paired.sort_by(|a, b| a.0.total_cmp(&b.0));
        return paired.into_iter().map(|(_, label)| label).collect();
    }

    distinct
}
