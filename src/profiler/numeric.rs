//! Distribution statistics for numeric columns.
//!
//! All statistics are computed over the clean subset (non-null, non-NaN) and
//! follow sample-estimator conventions: n−1 divisor for the standard
//! deviation, linear interpolation for quantiles, bias-adjusted skewness and
//! excess kurtosis.

use polars::prelude::*;

use crate::error::Result;
use crate::sanitize::finite;
use crate::types::{HistogramBin, NumericStats};

/// Compute the numeric profile of a column.
///
/// `n_unique` drives the histogram bin count. An empty clean subset yields
/// the all-undefined profile with an empty histogram.
pub fn numeric_stats(series: &Series, n_unique: usize) -> Result<NumericStats> {
    let clean = clean_values(series)?;
    if clean.is_empty() {
        return Ok(NumericStats::undefined());
    }

    let n = clean.len() as f64;
    let mean = clean.iter().sum::<f64>() / n;

    let mut sorted = clean.clone();
    sorted.sort_by(f64::total_cmp);

    Ok(NumericStats {
        mean: finite(mean),
        median: finite(quantile_sorted(&sorted, 0.5)),
        std: sample_std(&clean, mean).and_then(finite),
        min: finite(sorted[0]),
        max: finite(sorted[sorted.len() - 1]),
        q1: finite(quantile_sorted(&sorted, 0.25)),
        q3: finite(quantile_sorted(&sorted, 0.75)),
        skewness: sample_skewness(&clean, mean).and_then(finite),
        kurtosis: sample_kurtosis(&clean, mean).and_then(finite),
        histogram: build_histogram(&clean, n_unique),
    })
}

/// Extract the clean subset of a numeric column as `f64`.
pub(crate) fn clean_values(series: &Series) -> Result<Vec<f64>> {
    let casted = series.drop_nulls().cast(&DataType::Float64)?;
    let ca = casted.f64()?;
    Ok(ca.into_iter().flatten().filter(|v| !v.is_nan()).collect())
}

/// Quantile with linear interpolation at position `q * (n - 1)`.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Sample standard deviation (n−1 divisor); undefined below 2 observations.
fn sample_std(values: &[f64], mean: f64) -> Option<f64> {
    let n = values.len() as f64;
    if values.len() < 2 {
        return None;
    }
    let m2: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((m2 / (n - 1.0)).sqrt())
}

/// Bias-adjusted sample skewness (G1).
///
/// Undefined below 3 observations; 0 for a zero-variance sample.
fn sample_skewness(values: &[f64], mean: f64) -> Option<f64> {
    let n = values.len() as f64;
    if values.len() < 3 {
        return None;
    }
    let m2: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    let m3: f64 = values.iter().map(|v| (v - mean).powi(3)).sum();
    if m2 == 0.0 {
        return Some(0.0);
    }
    Some((n * (n - 1.0).sqrt() / (n - 2.0)) * (m3 / m2.powf(1.5)))
}

/// Bias-adjusted excess kurtosis (G2).
///
/// Undefined below 4 observations; 0 for a zero-variance sample.
fn sample_kurtosis(values: &[f64], mean: f64) -> Option<f64> {
    let n = values.len() as f64;
    if values.len() < 4 {
        return None;
    }
    let m2: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    let m4: f64 = values.iter().map(|v| (v - mean).powi(4)).sum();
    let denominator = (n - 2.0) * (n - 3.0) * m2 * m2;
    if denominator == 0.0 {
        return Some(0.0);
    }
    let adjustment = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
    Some((n * (n + 1.0) * (n - 1.0) * m4) / denominator - adjustment)
}

/// Equal-width histogram over the observed range.
///
/// Bin count is `n_unique` clamped to `[5, 20]`. A single-point range widens
/// to `[v - 0.5, v + 0.5]`. Bins are half-open `[lo, hi)` except the last,
/// which also includes the upper edge.
fn build_histogram(values: &[f64], n_unique: usize) -> Vec<HistogramBin> {
    let finite_values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite_values.is_empty() {
        return Vec::new();
    }

    let bins = n_unique.clamp(5, 20);
    let mut lo = finite_values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite_values
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let mut counts = vec![0usize; bins];
    for &v in &finite_values {
        let idx = (((v - lo) / (hi - lo)) * bins as f64) as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    let edge = |i: usize| lo + (hi - lo) * i as f64 / bins as f64;
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let upper = if i == bins - 1 { hi } else { edge(i + 1) };
            HistogramBin {
                label: format!("{:.2}-{:.2}", edge(i), upper),
                count,
            }
        })
        .collect()
}
