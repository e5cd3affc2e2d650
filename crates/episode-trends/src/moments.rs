//! The four descriptive moments of a numeric column.
//!
//! Missing entries (null or NaN) are omitted from every statistic; they are
//! never used to drop rows from the table.
//!
//! # Undefined moments
//!
//! Some moments have no meaningful value for small or degenerate samples.
//! Rather than reporting a misleading number, they come back as `NaN`:
//!
//! | sample                   | std | skewness | excess kurtosis |
//! |--------------------------|-----|----------|-----------------|
//! | one value                | NaN | NaN      | NaN             |
//! | all values equal         | 0   | NaN      | NaN             |
//! | two distinct values      | ok  | 0        | NaN             |
//! | three values             | ok  | ok       | NaN             |
//!
//! Values spread only at floating-point rounding level (`m2 <= (eps * mean)^2`)
//! are treated like equal values for skewness and kurtosis.
//!
//! An empty sample is an error ([`AnalysisError::InsufficientData`]).

use crate::config::MomentBias;
use crate::error::{AnalysisError, Result};
use crate::preprocessing::CleanTable;
use crate::schema::ColumnKind;
use crate::utils::{is_numeric_dtype, present_f64_values};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Kurtosis is reported only from this many values upward.
pub const MIN_KURTOSIS_SAMPLES: usize = 4;

/// Mean, standard deviation, skewness and excess kurtosis of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moments {
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std_dev: f64,
    pub skewness: f64,
    /// Fourth standardized moment minus 3.
    pub excess_kurtosis: f64,
    /// Number of values the moments were computed from.
    pub sample_size: usize,
}

static_assertions::assert_impl_all!(Moments: Send, Sync);

impl Moments {
    /// Compute the moments of `values`, ignoring NaN entries.
    ///
    /// Returns `None` when no usable value remains.
    pub fn from_values(values: &[f64], bias: MomentBias) -> Option<Self> {
        let values: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let n = values.len();
        if n == 0 {
            return None;
        }

        // Summing a repeated value can drift off it, so constancy is checked
        // on the values themselves.
        let first = values[0];
        if values.iter().all(|v| *v == first) {
            return Some(Self {
                mean: first,
                std_dev: if n < 2 { f64::NAN } else { 0.0 },
                skewness: f64::NAN,
                excess_kurtosis: f64::NAN,
                sample_size: n,
            });
        }

        let nf = n as f64;
        let mean = values.iter().sum::<f64>() / nf;

        let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
        for v in &values {
            let d = v - mean;
            let d2 = d * d;
            m2 += d2;
            m3 += d2 * d;
            m4 += d2 * d2;
        }
        let sum_sq = m2;
        m2 /= nf;
        m3 /= nf;
        m4 /= nf;

        let std_dev = if n < 2 {
            f64::NAN
        } else {
            (sum_sq / (nf - 1.0)).sqrt()
        };

        // A spread at rounding level carries no shape information.
        let negligible_spread = m2 <= (f64::EPSILON * mean).powi(2);
        let (skewness, excess_kurtosis) = if n < 2 || negligible_spread {
            (f64::NAN, f64::NAN)
        } else {
            (skewness(n, m2, m3, bias), excess_kurtosis(n, m2, m4, bias))
        };

        Some(Self {
            mean,
            std_dev,
            skewness,
            excess_kurtosis,
            sample_size: n,
        })
    }

    /// The moments as the ordered tuple `(mean, std, skew, excess_kurtosis)`.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.mean, self.std_dev, self.skewness, self.excess_kurtosis)
    }

    /// True when every moment has a defined value.
    pub fn is_complete(&self) -> bool {
        let (a, b, c, d) = self.as_tuple();
        [a, b, c, d].iter().all(|v| !v.is_nan())
    }
}

fn skewness(n: usize, m2: f64, m3: f64, bias: MomentBias) -> f64 {
    // Two points always sit symmetrically about their mean.
    if n == 2 {
        return 0.0;
    }
    let g1 = m3 / m2.powf(1.5);
    match bias {
        MomentBias::Biased => g1,
        MomentBias::Adjusted | MomentBias::FullyAdjusted => {
            let nf = n as f64;
            g1 * (nf * (nf - 1.0)).sqrt() / (nf - 2.0)
        }
    }
}

fn excess_kurtosis(n: usize, m2: f64, m4: f64, bias: MomentBias) -> f64 {
    if n < MIN_KURTOSIS_SAMPLES {
        return f64::NAN;
    }
    let g2 = m4 / (m2 * m2) - 3.0;
    match bias {
        MomentBias::Adjusted | MomentBias::Biased => g2,
        MomentBias::FullyAdjusted => {
            let nf = n as f64;
            ((nf + 1.0) * g2 + 6.0) * (nf - 1.0) / ((nf - 2.0) * (nf - 3.0))
        }
    }
}

/// Moments of a column of an arbitrary table, omitting missing entries.
pub fn frame_moments(df: &DataFrame, column: &str, bias: MomentBias) -> Result<Moments> {
    let col = df
        .column(column)
        .map_err(|_| AnalysisError::MissingColumn(column.to_string()))?;
    if !is_numeric_dtype(col.dtype()) && !matches!(col.dtype(), DataType::Null) {
        return Err(AnalysisError::TypeMismatch {
            column: column.to_string(),
            expected: "numeric".to_string(),
            found: col.dtype().to_string(),
        });
    }
    let values = present_f64_values(col.as_materialized_series())?;
    moments_of(column, &values, bias)
}

/// Moments of a column of a cleaned table.
///
/// Columns the schema declares categorical are rejected even when their
/// labels happen to be stored as numbers.
pub fn column_moments(table: &CleanTable, column: &str, bias: MomentBias) -> Result<Moments> {
    check_target(table, column)?;
    let values = table.numeric(column)?;
    moments_of(column, &values, bias)
}

/// Check that `column` is one of the table's numeric schema columns.
pub fn check_target(table: &CleanTable, column: &str) -> Result<()> {
    match table.schema().kind_of(column) {
        None => Err(AnalysisError::MissingColumn(column.to_string())),
        Some(ColumnKind::Categorical) => Err(AnalysisError::TypeMismatch {
            column: column.to_string(),
            expected: ColumnKind::Numeric.to_string(),
            found: ColumnKind::Categorical.to_string(),
        }),
        Some(ColumnKind::Numeric) => Ok(()),
    }
}

fn moments_of(column: &str, values: &[f64], bias: MomentBias) -> Result<Moments> {
    let moments = Moments::from_values(values, bias)
        .ok_or_else(|| AnalysisError::InsufficientData(column.to_string()))?;

    debug!(
        "Moments of '{}' over {} values: {:?}",
        column, moments.sample_size, moments
    );
    if moments.std_dev == 0.0 {
        warn!(
            "Column '{}' is constant; skewness and kurtosis are undefined",
            column
        );
    } else if !moments.is_complete() {
        warn!(
            "Column '{}' has only {} values; some moments are undefined",
            column, moments.sample_size
        );
    }

    Ok(moments)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_symmetric_sample() {
        let m = Moments::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0], MomentBias::Adjusted).unwrap();
        assert_eq!(m.mean, 3.0);
        assert!(close(m.std_dev, 1.5811388300841898));
        assert!(m.skewness.abs() < EPS);
        assert!(close(m.excess_kurtosis, -1.3));

        let full = Moments::from_values(&[1.0, 2.0, 3.0, 4.0, 5.0], MomentBias::FullyAdjusted)
            .unwrap();
        assert!(close(full.excess_kurtosis, -1.2));
    }

    #[test]
    fn test_right_tailed_sample() {
        let m = Moments::from_values(&[1.0, 1.0, 1.0, 2.0, 10.0], MomentBias::Adjusted).unwrap();
        assert!(m.skewness > 0.0);
        assert!(close(m.skewness, 2.171292493874225));
        // Fourth standardized moment minus 3: 490 / 12.4^2 - 3.
        assert!(close(m.excess_kurtosis, 0.18678459937564984));
    }

    #[test]
    fn test_biased_estimators() {
        let values = [2.0, 8.0, 0.0, 4.0, 1.0, 9.0, 9.0, 0.0];
        let m = Moments::from_values(&values, MomentBias::Biased).unwrap();
        assert!(close(m.skewness, 0.2650554122698573));
        assert!(close(m.excess_kurtosis, -1.6660010752838508));

        let adjusted = Moments::from_values(&values, MomentBias::Adjusted).unwrap();
        assert!(close(adjusted.skewness, 0.33058218040797466));
        assert!(close(adjusted.excess_kurtosis, -1.6660010752838508));
        assert_eq!(m.std_dev, adjusted.std_dev);

        let full = Moments::from_values(&values, MomentBias::FullyAdjusted).unwrap();
        assert_eq!(full.skewness, adjusted.skewness);
        assert!(close(full.excess_kurtosis, -2.098602258096087));
    }

    #[test]
    fn test_constant_sample_has_undefined_shape() {
        let m = Moments::from_values(&[7.0; 6], MomentBias::Adjusted).unwrap();
        assert_eq!(m.mean, 7.0);
        assert_eq!(m.std_dev, 0.0);
        assert!(m.skewness.is_nan());
        assert!(m.excess_kurtosis.is_nan());
        assert!(!m.is_complete());
    }

    #[test]
    fn test_inexact_constants_have_undefined_shape() {
        // None of these is exactly representable, so a summed mean drifts.
        for c in [8.3, 8.7, 0.1, 9.1, 2.2] {
            for bias in [MomentBias::Adjusted, MomentBias::Biased, MomentBias::FullyAdjusted] {
                let m = Moments::from_values(&[c; 7], bias).unwrap();
                assert_eq!(m.mean, c, "mean of constant {c}");
                assert_eq!(m.std_dev, 0.0, "std of constant {c}");
                assert!(m.skewness.is_nan(), "skewness of constant {c}");
                assert!(m.excess_kurtosis.is_nan(), "kurtosis of constant {c}");
            }
        }
    }

    #[test]
    fn test_rounding_level_spread_has_undefined_shape() {
        let m = Moments::from_values(&[1.0, 1.0, 1.0, 1.0 + f64::EPSILON], MomentBias::Adjusted)
            .unwrap();
        assert!(m.skewness.is_nan());
        assert!(m.excess_kurtosis.is_nan());
    }

    #[test]
    fn test_two_values() {
        let m = Moments::from_values(&[8.0, 9.0], MomentBias::Adjusted).unwrap();
        assert_eq!(m.mean, 8.5);
        assert!(close(m.std_dev, std::f64::consts::FRAC_1_SQRT_2));
        assert_eq!(m.skewness, 0.0);
        assert!(m.excess_kurtosis.is_nan());
    }

    #[test]
    fn test_single_value() {
        let m = Moments::from_values(&[4.2], MomentBias::Adjusted).unwrap();
        assert_eq!(m.mean, 4.2);
        assert!(m.std_dev.is_nan());
        assert!(m.skewness.is_nan());
    }

    #[test]
    fn test_empty_and_all_nan() {
        assert!(Moments::from_values(&[], MomentBias::Adjusted).is_none());
        assert!(Moments::from_values(&[f64::NAN, f64::NAN], MomentBias::Biased).is_none());
    }

    #[test]
    fn test_nan_entries_are_omitted() {
        let with_nan =
            Moments::from_values(&[1.0, f64::NAN, 2.0, 3.0, 4.0, 5.0], MomentBias::Adjusted)
                .unwrap();
        assert_eq!(with_nan.sample_size, 5);
        assert_eq!(with_nan.mean, 3.0);
    }

    #[test]
    fn test_tuple_order() {
        let m = Moments::from_values(&[1.0, 1.0, 1.0, 2.0, 10.0], MomentBias::Adjusted).unwrap();
        let (mean, std, skew, kurt) = m.as_tuple();
        assert_eq!(mean, m.mean);
        assert_eq!(std, m.std_dev);
        assert_eq!(skew, m.skewness);
        assert_eq!(kurt, m.excess_kurtosis);
    }

    #[test]
    fn test_frame_moments_omits_nulls() {
        let df = df!("IMDb Rating" => &[Some(8.0f64), None, Some(9.0)]).unwrap();
        let m = frame_moments(&df, "IMDb Rating", MomentBias::Adjusted).unwrap();
        assert_eq!(m.sample_size, 2);
        assert_eq!(df.height(), 3);
    }

    #[test]
    fn test_frame_moments_errors() {
        let df = df!(
            "empty" => &[None::<f64>, None],
            "label" => &["a", "b"],
        )
        .unwrap();

        assert!(matches!(
            frame_moments(&df, "empty", MomentBias::Adjusted),
            Err(AnalysisError::InsufficientData(_))
        ));
        assert!(matches!(
            frame_moments(&df, "label", MomentBias::Adjusted),
            Err(AnalysisError::TypeMismatch { .. })
        ));
        assert!(matches!(
            frame_moments(&df, "absent", MomentBias::Adjusted),
            Err(AnalysisError::MissingColumn(_))
        ));
    }
}
