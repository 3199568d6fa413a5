//! Statistics Calculator Module
//! Means and histogram binning over numeric columns.

use serde::Serialize;
use statrs::statistics::Statistics;

/// Default number of histogram buckets.
pub const DEFAULT_BINS: usize = 20;

/// A half-open bucket `[start, end)`; the last bucket also holds `end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

pub struct StatsCalculator;

impl StatsCalculator {
    /// Arithmetic mean. Empty input gives NaN.
    pub fn mean(values: &[f64]) -> f64 {
        values.iter().mean()
    }

    /// Equal width buckets spanning `[min, max]`.
    pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return Vec::new();
        }

        let min = Statistics::min(finite.iter());
        let max = Statistics::max(finite.iter());
        // A constant column still gets one bucket of unit width.
        let width = if max > min {
            (max - min) / bins as f64
        } else {
            1.0
        };
        let bins = if max > min { bins } else { 1 };

        let mut counts = vec![0usize; bins];
        for v in &finite {
            let idx = (((v - min) / width).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: min + i as f64 * width,
                end: min + (i + 1) as f64 * width,
                count,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_simple_values() {
        assert!((StatsCalculator::mean(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn empty_input_is_nan_not_panic() {
        assert!(StatsCalculator::mean(&[]).is_nan());
        assert!(StatsCalculator::histogram(&[], DEFAULT_BINS).is_empty());
    }

    #[test]
    fn histogram_counts_every_value() {
        let values: Vec<f64> = (0..1000).map(|i| i as f64 * 0.37).collect();
        let bins = StatsCalculator::histogram(&values, DEFAULT_BINS);
        assert_eq!(bins.len(), DEFAULT_BINS);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[0].start, 0.0);
        assert!((bins[DEFAULT_BINS - 1].end - 999.0 * 0.37).abs() < 1e-9);
    }

    #[test]
    fn constant_values_fall_in_one_bucket() {
        let bins = StatsCalculator::histogram(&[5.0, 5.0, 5.0], 20);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }
}
