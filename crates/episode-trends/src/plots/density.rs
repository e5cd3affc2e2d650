//! Histogram binning and kernel density estimation for the distribution chart.

use std::ops::Range;

/// Equal-width histogram over the closed range `[min, max]` of the data.
///
/// Every bin is half-open except the last, which also includes `max`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending bin edges.
    pub edges: Vec<f64>,
    /// Number of values per bin.
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Bin `values` (NaN entries are skipped) into `bins` equal-width bins.
    ///
    /// A sample whose values are all equal is centred in a range of width 1.
    /// Returns `None` for an empty sample or `bins == 0`.
    #[must_use]
    pub fn new(values: &[f64], bins: usize) -> Option<Self> {
        if bins == 0 {
            return None;
        }
        let range = value_range(values)?;
        let (lo, hi) = if range.start == range.end {
            (range.start - 0.5, range.end + 0.5)
        } else {
            (range.start, range.end)
        };

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + width * i as f64 })
            .collect();

        let mut counts = vec![0u64; bins];
        for v in values.iter().filter(|v| !v.is_nan()) {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Self { edges, counts })
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    pub fn max_count(&self) -> u64 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(start, end, count)` for each bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, u64)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(edge, count)| (edge[0], edge[1], *count))
    }

    pub fn span(&self) -> Range<f64> {
        self.edges[0]..self.edges[self.edges.len() - 1]
    }
}

/// Gaussian kernel density estimate with Scott's bandwidth rule.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    samples: Vec<f64>,
    bandwidth: f64,
}

impl GaussianKde {
    /// Fit a KDE to `values`.
    ///
    /// Needs at least two distinct values; returns `None` otherwise.
    #[must_use]
    pub fn fit(values: &[f64]) -> Option<Self> {
        let samples: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        let n = samples.len();
        if n < 2 {
            return None;
        }
        let nf = n as f64;
        let mean = samples.iter().sum::<f64>() / nf;
        let var = samples.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (nf - 1.0);
        if var == 0.0 {
            return None;
        }
        let bandwidth = var.sqrt() * nf.powf(-0.2);
        Some(Self { samples, bandwidth })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Probability density at `x`.
    pub fn density(&self, x: f64) -> f64 {
        let norm = 1.0 / (self.samples.len() as f64 * self.bandwidth * (2.0 * std::f64::consts::PI).sqrt());
        norm * self
            .samples
            .iter()
            .map(|s| {
                let z = (x - s) / self.bandwidth;
                (-0.5 * z * z).exp()
            })
            .sum::<f64>()
    }

    /// Density evaluated at `points` evenly spaced positions over `range`,
    /// multiplied by `scale`.
    pub fn curve(&self, range: Range<f64>, points: usize, scale: f64) -> Vec<(f64, f64)> {
        if points < 2 {
            return Vec::new();
        }
        let step = (range.end - range.start) / (points - 1) as f64;
        (0..points)
            .map(|i| {
                let x = range.start + step * i as f64;
                (x, self.density(x) * scale)
            })
            .collect()
    }
}

/// Minimum and maximum of the non-NaN values.
pub fn value_range(values: &[f64]) -> Option<Range<f64>> {
    let mut finite = values.iter().copied().filter(|v| !v.is_nan());
    let first = finite.next()?;
    let (lo, hi) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Some(lo..hi)
}

/// Data range widened by `fraction` of its span on both sides, so points do
/// not sit on the chart frame. A zero-width range is widened by 0.5.
pub fn padded_range(values: &[f64], fraction: f64) -> Option<Range<f64>> {
    let range = value_range(values)?;
    let span = range.end - range.start;
    let pad = if span == 0.0 { 0.5 } else { span * fraction };
    Some(range.start - pad..range.end + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts_every_value() {
        let values = [1.0, 2.0, 2.5, 3.0, 4.0, 5.0];
        let hist = Histogram::new(&values, 4).unwrap();
        assert_eq!(hist.edges, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(hist.counts, vec![1, 2, 1, 2]);
        assert_eq!(hist.total(), values.len() as u64);
    }

    #[test]
    fn test_histogram_max_lands_in_last_bin() {
        let hist = Histogram::new(&[0.0, 10.0], 15).unwrap();
        assert_eq!(hist.counts[0], 1);
        assert_eq!(hist.counts[14], 1);
        assert_eq!(*hist.edges.last().unwrap(), 10.0);
    }

    #[test]
    fn test_histogram_constant_values() {
        let hist = Histogram::new(&[7.0, 7.0, 7.0], 2).unwrap();
        assert_eq!(hist.span(), 6.5..7.5);
        assert_eq!(hist.counts, vec![0, 3]);
        assert_eq!(hist.max_count(), 3);
    }

    #[test]
    fn test_histogram_rejects_empty_input() {
        assert!(Histogram::new(&[], 10).is_none());
        assert!(Histogram::new(&[1.0], 0).is_none());
    }

    #[test]
    fn test_histogram_bins_iterator() {
        let hist = Histogram::new(&[0.0, 1.0, 2.0], 2).unwrap();
        let bins: Vec<_> = hist.bins().collect();
        assert_eq!(bins, vec![(0.0, 1.0, 1), (1.0, 2.0, 2)]);
        assert_eq!(hist.bin_width(), 1.0);
    }

    #[test]
    fn test_kde_integrates_to_one() {
        let kde = GaussianKde::fit(&[8.1, 8.5, 8.6, 8.9, 9.1, 9.4, 9.6]).unwrap();
        let curve = kde.curve(4.0..14.0, 2001, 1.0);
        let step = 10.0 / 2000.0;
        let area: f64 = curve.iter().map(|(_, y)| y * step).sum();
        assert!((area - 1.0).abs() < 1e-3, "area was {area}");
    }

    #[test]
    fn test_kde_scott_bandwidth() {
        // std (n-1) of [1,2,3,4,5] is sqrt(2.5)
        let kde = GaussianKde::fit(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let expected = 2.5f64.sqrt() * 5f64.powf(-0.2);
        assert!((kde.bandwidth() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_kde_needs_spread() {
        assert!(GaussianKde::fit(&[3.0]).is_none());
        assert!(GaussianKde::fit(&[3.0, 3.0, 3.0]).is_none());
    }

    #[test]
    fn test_padded_range() {
        assert_eq!(padded_range(&[0.0, 10.0], 0.1).unwrap(), -1.0..11.0);
        assert_eq!(padded_range(&[2.0], 0.1).unwrap(), 1.5..2.5);
        assert!(padded_range(&[f64::NAN], 0.1).is_none());
    }
}
