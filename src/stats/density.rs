//! Frequency histogram and Gaussian kernel density estimate.
//!
//! The KDE is scaled to counts (`density * n * bin_width`) so it overlays the
//! histogram bars directly.

use crate::error::AppError;
use crate::math::normal;

/// Equal-width bins over `[min, max]`; the last bin is closed on the right.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(left edge, right edge, count)` per bin.
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &c)| (self.edges[i], self.edges[i + 1], c))
    }
}

/// Build a histogram with `bins` equal-width bins.
///
/// A constant sample gets a unit-wide range centred on the value.
pub fn histogram(values: &[f64], bins: usize) -> Result<Histogram, AppError> {
    if values.is_empty() {
        return Err(AppError::compute("Cannot build a histogram of an empty sample."));
    }
    if bins == 0 {
        return Err(AppError::input("Histogram needs at least one bin."));
    }

    let (mut lo, mut hi) = min_max(values);
    if hi <= lo {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Ok(Histogram { edges, counts })
}

/// Scott's rule: `n^(-1/5) * sample standard deviation` (ddof = 1).
pub fn scott_bandwidth(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    var.sqrt() * n.powf(-0.2)
}

/// Gaussian KDE evaluated at `x`, as a probability density.
pub fn kde_density(values: &[f64], bandwidth: f64, x: f64) -> f64 {
    if values.is_empty() || bandwidth <= 0.0 {
        return 0.0;
    }
    let sum: f64 = values.iter().map(|v| normal::pdf((x - v) / bandwidth)).sum();
    sum / (values.len() as f64 * bandwidth)
}

/// A histogram together with its count-scaled KDE curve, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDistribution {
    pub name: String,
    pub n: usize,
    pub histogram: Histogram,
    /// `(x, count-scaled density)` pairs; empty when the bandwidth is zero.
    pub kde: Vec<(f64, f64)>,
}

impl ColumnDistribution {
    pub fn x_range(&self) -> (f64, f64) {
        let e = &self.histogram.edges;
        (e[0], e[e.len() - 1])
    }

    /// Largest of the tallest bar and the KDE peak.
    pub fn y_max(&self) -> f64 {
        let kde_max = self.kde.iter().map(|&(_, y)| y).fold(0.0, f64::max);
        (self.histogram.max_count() as f64).max(kde_max)
    }
}

/// Histogram plus KDE overlay on `grid` evenly spaced points.
pub fn distribution(name: &str, values: &[f64], bins: usize, grid: usize) -> Result<ColumnDistribution, AppError> {
    let histogram = histogram(values, bins)?;
    let bw = scott_bandwidth(values);
    let scale = values.len() as f64 * histogram.bin_width();

    let kde = if bw > 0.0 && grid >= 2 {
        let (lo, hi) = (histogram.edges[0], histogram.edges[bins]);
        (0..grid)
            .map(|i| {
                let x = lo + (hi - lo) * i as f64 / (grid as f64 - 1.0);
                (x, kde_density(values, bw, x) * scale)
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(ColumnDistribution {
        name: name.to_string(),
        n: values.len(),
        histogram,
        kde,
    })
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_counts_every_value_and_closes_last_bin() {
        let values = [0.0, 0.1, 0.5, 0.99, 1.0];
        let h = histogram(&values, 2).unwrap();
        assert_eq!(h.edges, vec![0.0, 0.5, 1.0]);
        assert_eq!(h.counts, vec![2, 3]);
        assert_eq!(h.total(), values.len());
    }

    #[test]
    fn constant_sample_gets_unit_range() {
        let h = histogram(&[3.0, 3.0, 3.0], 4).unwrap();
        assert_eq!(h.edges[0], 2.5);
        assert_eq!(h.edges[4], 3.5);
        assert_eq!(h.total(), 3);
    }

    #[test]
    fn scott_bandwidth_matches_formula() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        // sample sd = sqrt(2.5)
        let expected = 2.5_f64.sqrt() * 5.0_f64.powf(-0.2);
        assert!((scott_bandwidth(&values) - expected).abs() < 1e-12);
        assert_eq!(scott_bandwidth(&[1.0]), 0.0);
    }

    #[test]
    fn kde_integrates_to_about_one() {
        let values = [-1.0, 0.0, 0.5, 2.0];
        let bw = scott_bandwidth(&values);
        let (lo, hi, steps) = (-10.0, 12.0, 4_000);
        let dx = (hi - lo) / steps as f64;
        let area: f64 = (0..steps).map(|i| kde_density(&values, bw, lo + (i as f64 + 0.5) * dx) * dx).sum();
        assert!((area - 1.0).abs() < 1e-6, "area={area}");
    }

    #[test]
    fn distribution_overlay_is_count_scaled() {
        let values: Vec<f64> = (0..100).map(|i| i as f64 / 10.0).collect();
        let d = distribution("x", &values, 10, 50).unwrap();
        assert_eq!(d.n, 100);
        assert_eq!(d.kde.len(), 50);
        // Uniform data: ten per bin, KDE plateau near the same height.
        assert!(d.histogram.counts.iter().all(|&c| c == 10));
        let mid = d.kde[25].1;
        assert!(mid > 7.0 && mid < 12.0, "mid={mid}");
        let (lo, hi) = d.x_range();
        assert_eq!(lo, 0.0);
        assert!((hi - 9.9).abs() < 1e-12);
    }
}
