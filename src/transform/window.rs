//! Moving-window smoothers used by the trend and seasonal estimators.
//!
//! Every window is centred on the target index and clipped at the series
//! boundaries: near the edges the window shrinks instead of wrapping or
//! padding. All functions return a new vector of the input's length.

use crate::utils::stats::median;

/// Bounds `[start, end)` of a centred window of `width` around `i`, clipped to `n`.
#[inline]
fn centered_bounds(i: usize, width: usize, n: usize) -> (usize, usize) {
    let half = width / 2;
    let start = i.saturating_sub(half);
    let end = (i + width - half).min(n);
    (start, end)
}

/// Apply `f` over a centred, boundary-clipped window at every index.
fn centered_apply<F>(series: &[f64], width: usize, f: F) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = series.len();
    if width == 0 {
        return series.to_vec();
    }
    (0..n)
        .map(|i| {
            let (start, end) = centered_bounds(i, width, n);
            if end > start {
                f(&series[start..end])
            } else {
                series[i]
            }
        })
        .collect()
}

/// Centred moving average of `width`, clipped at the boundaries.
///
/// A zero width returns the series unchanged.
///
/// # Example
/// ```
/// use anofox_decompose::transform::moving_average;
///
/// let smoothed = moving_average(&[1.0, 2.0, 3.0, 4.0, 5.0], 3);
/// assert_eq!(smoothed, vec![1.5, 2.0, 3.0, 4.0, 4.5]);
/// ```
pub fn moving_average(series: &[f64], width: usize) -> Vec<f64> {
    centered_apply(series, width, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Centred moving average over a forced-odd window: `period` if odd, else `period + 1`.
pub fn centered_moving_average(series: &[f64], period: usize) -> Vec<f64> {
    let width = if period % 2 == 1 { period } else { period + 1 };
    moving_average(series, width)
}

/// Running median over a centred window of `width`, clipped at the boundaries.
pub fn rolling_median(series: &[f64], width: usize) -> Vec<f64> {
    centered_apply(series, width, median)
}

/// Low-pass filter: the moving average primitive applied with `width`.
pub fn low_pass_filter(series: &[f64], width: usize) -> Vec<f64> {
    moving_average(series, width)
}

/// Henderson-style bell weights `(1 - x²)²`, `x` spread evenly over [-1, 1].
///
/// The two end weights are zero by construction. A single-point window
/// yields `[1.0]`.
pub fn henderson_weights(size: usize) -> Vec<f64> {
    match size {
        0 => Vec::new(),
        1 => vec![1.0],
        _ => {
            let span = (size - 1) as f64;
            (0..size)
                .map(|j| {
                    let x = 2.0 * j as f64 / span - 1.0;
                    (1.0 - x * x).powi(2)
                })
                .collect()
        }
    }
}

/// Weighted moving average with the given symmetric kernel.
///
/// Window positions outside the series are skipped and the remaining
/// weights renormalized. If no in-range weight is positive the raw value
/// is kept.
pub fn weighted_moving_average(series: &[f64], weights: &[f64]) -> Vec<f64> {
    let n = series.len() as isize;
    let offset = (weights.len() / 2) as isize;

    (0..n)
        .map(|i| {
            let mut weight_sum = 0.0;
            let mut value_sum = 0.0;
            for (j, &w) in weights.iter().enumerate() {
                let idx = i + j as isize - offset;
                if idx < 0 || idx >= n {
                    continue;
                }
                weight_sum += w;
                value_sum += w * series[idx as usize];
            }
            if weight_sum > 0.0 {
                value_sum / weight_sum
            } else {
                series[i as usize]
            }
        })
        .collect()
}

/// Henderson-weighted moving average with window `size`.
pub fn henderson_smooth(series: &[f64], size: usize) -> Vec<f64> {
    weighted_moving_average(series, &henderson_weights(size))
}

/// Centred moving average where each observation carries its own weight.
///
/// Used by robust STL so outlying points pull the cycle-subseries less.
/// When every weight in the window is zero the plain window mean is used,
/// so a rejected point is never copied through unsmoothed.
pub fn observation_weighted_average(series: &[f64], obs_weights: &[f64], width: usize) -> Vec<f64> {
    let n = series.len();
    if width == 0 {
        return series.to_vec();
    }
    (0..n)
        .map(|i| {
            let (start, end) = centered_bounds(i, width, n);
            let mut weight_sum = 0.0;
            let mut value_sum = 0.0;
            for j in start..end {
                let w = obs_weights.get(j).copied().unwrap_or(1.0);
                weight_sum += w;
                value_sum += w * series[j];
            }
            if weight_sum > 0.0 {
                value_sum / weight_sum
            } else {
                series[start..end].iter().sum::<f64>() / (end - start) as f64
            }
        })
        .collect()
}
