//! Seasonal estimation from a detrended series.
//!
//! Values are grouped by position within the period (`index % period`);
//! each group is then either smoothed (STL) or averaged (X11, classical).

use crate::transform::window::{low_pass_filter, moving_average, observation_weighted_average};
use crate::utils::stats::mean;

/// Indices of each cycle-subseries, in time order.
fn cycle_indices(n: usize, period: usize) -> Vec<Vec<usize>> {
    (0..period)
        .map(|pos| (pos..n).step_by(period).collect())
        .collect()
}

/// Smooth every cycle-subseries with a moving average of `window`.
///
/// Each subseries keeps its original relative order; smoothed values are
/// scattered back to their full-length positions. With `weights`, each
/// observation's contribution is scaled by its robustness weight.
pub fn smooth_cycle_subseries(
    detrended: &[f64],
    period: usize,
    window: usize,
    weights: Option<&[f64]>,
) -> Vec<f64> {
    let n = detrended.len();
    let mut result = vec![0.0; n];
    if period == 0 {
        return result;
    }

    for indices in cycle_indices(n, period) {
        let values: Vec<f64> = indices.iter().map(|&i| detrended[i]).collect();
        let smoothed = match weights {
            Some(w) => {
                let sub_weights: Vec<f64> = indices
                    .iter()
                    .map(|&i| w.get(i).copied().unwrap_or(1.0))
                    .collect();
                observation_weighted_average(&values, &sub_weights, window)
            }
            None => moving_average(&values, window),
        };
        for (&idx, value) in indices.iter().zip(smoothed) {
            result[idx] = value;
        }
    }

    result
}

/// STL seasonal: smoothed cycle-subseries minus their own low-pass filter.
///
/// Removing the low-pass component stops the seasonal absorbing trend.
pub fn stl_seasonal(
    detrended: &[f64],
    period: usize,
    seasonal_window: usize,
    low_pass_window: usize,
    weights: Option<&[f64]>,
) -> Vec<f64> {
    let raw = smooth_cycle_subseries(detrended, period, seasonal_window, weights);
    let low_pass = low_pass_filter(&raw, low_pass_window);
    raw.iter().zip(&low_pass).map(|(s, l)| s - l).collect()
}

/// Mean of each position-in-period group, `period` values long.
///
/// An empty group averages to 0.
pub fn group_means(detrended: &[f64], period: usize) -> Vec<f64> {
    cycle_indices(detrended.len(), period)
        .into_iter()
        .map(|indices| {
            if indices.is_empty() {
                0.0
            } else {
                indices.iter().map(|&i| detrended[i]).sum::<f64>() / indices.len() as f64
            }
        })
        .collect()
}

/// Repeat a one-cycle pattern to length `n`.
pub fn expand_pattern(pattern: &[f64], n: usize) -> Vec<f64> {
    if pattern.is_empty() {
        return vec![0.0; n];
    }
    (0..n).map(|i| pattern[i % pattern.len()]).collect()
}

/// Single-pass group-mean seasonal, no correction (X11).
pub fn group_mean_seasonal(detrended: &[f64], period: usize) -> Vec<f64> {
    expand_pattern(&group_means(detrended, period), detrended.len())
}

/// Group-mean seasonal re-centred by its global mean (classical).
///
/// The result sums to ~0 over the series.
pub fn centered_group_mean_seasonal(detrended: &[f64], period: usize) -> Vec<f64> {
    let seasonal = group_mean_seasonal(detrended, period);
    let global = mean(&seasonal);
    if !global.is_finite() {
        return seasonal;
    }
    seasonal.iter().map(|s| s - global).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cycle_indices_partition_by_position() {
        let groups = cycle_indices(7, 3);
        assert_eq!(groups, vec![vec![0, 3, 6], vec![1, 4], vec![2, 5]]);
    }

    #[test]
    fn smoothing_stays_within_each_subseries() {
        // Two interleaved constant subseries must stay separate.
        let detrended: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let smoothed = smooth_cycle_subseries(&detrended, 2, 7, None);
        assert_eq!(smoothed, detrended);
    }

    #[test]
    fn weighted_smoothing_downweights_outlier() {
        let mut detrended = vec![0.0; 12];
        detrended[6] = 30.0;
        let mut weights = vec![1.0; 12];
        weights[6] = 0.0;
        let plain = smooth_cycle_subseries(&detrended, 3, 3, None);
        let robust = smooth_cycle_subseries(&detrended, 3, 3, Some(&weights));
        assert!(plain[3] > 1.0);
        assert_relative_eq!(robust[3], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn stl_seasonal_removes_low_pass_level() {
        // A constant offset in every subseries is trend-like, not seasonal.
        let detrended = vec![5.0; 24];
        let seasonal = stl_seasonal(&detrended, 4, 7, 2, None);
        for s in seasonal {
            assert_relative_eq!(s, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn group_means_average_each_position() {
        let detrended = [1.0, 10.0, 3.0, 20.0, 5.0];
        assert_eq!(group_means(&detrended, 2), vec![3.0, 15.0]);
        assert_eq!(group_means(&[1.0], 3), vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn expand_pattern_repeats() {
        assert_eq!(expand_pattern(&[1.0, 2.0], 5), vec![1.0, 2.0, 1.0, 2.0, 1.0]);
        assert_eq!(expand_pattern(&[], 2), vec![0.0, 0.0]);
    }

    #[test]
    fn centered_seasonal_sums_to_zero() {
        let detrended: Vec<f64> = (0..12).map(|i| [3.0, 1.0, 8.0][i % 3]).collect();
        let seasonal = centered_group_mean_seasonal(&detrended, 3);
        assert_relative_eq!(seasonal.iter().sum::<f64>(), 0.0, epsilon = 1e-10);
        assert_relative_eq!(seasonal[0], -1.0, epsilon = 1e-12);
        assert_relative_eq!(seasonal[1], -3.0, epsilon = 1e-12);
        assert_relative_eq!(seasonal[2], 4.0, epsilon = 1e-12);
    }

    #[test]
    fn x11_seasonal_is_not_recentred() {
        let detrended: Vec<f64> = (0..8).map(|i| [2.0, 4.0][i % 2]).collect();
        let seasonal = group_mean_seasonal(&detrended, 2);
        assert_eq!(seasonal[0], 2.0);
        assert_eq!(seasonal[1], 4.0);
    }
}
