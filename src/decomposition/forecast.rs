//! Forecasts extrapolated from a decomposition.
//!
//! The trend continues along the OLS slope of its most recent values and the
//! fitted seasonal cycle is reused positionally.

use super::components::Components;
use crate::core::{ConfidenceInterval, ForecastPoint, ResidualInterval};
use crate::utils::ols::linear_slope;
use crate::utils::stats::{std_dev, z_score};

/// Number of trailing trend values the extrapolation slope is fitted on.
pub const TREND_SLOPE_WINDOW: usize = 10;

/// OLS slope over the last `min(n, 10)` trend values.
pub fn trend_slope(trend: &[f64]) -> f64 {
    let k = trend.len().min(TREND_SLOPE_WINDOW);
    linear_slope(&trend[trend.len() - k..])
}

/// Project `periods` additive points past the end of `components`.
///
/// Point `i` sits at index `n + i`. Its trend is `last_trend + slope * (i + 1)`
/// and its seasonal is `seasonal[(n + i) % period]`, or 0 when that position
/// is not covered by the fitted seasonal.
pub fn project(components: &Components, period: usize, periods: usize) -> Vec<ForecastPoint> {
    let n = components.len();
    let Some(&last_trend) = components.trend.last() else {
        return Vec::new();
    };
    let slope = trend_slope(&components.trend);

    (0..periods)
        .map(|i| {
            let index = n + i;
            let seasonal = if period == 0 {
                0.0
            } else {
                components
                    .seasonal
                    .get(index % period)
                    .copied()
                    .unwrap_or(0.0)
            };
            let trend = last_trend + slope * (i + 1) as f64;
            ForecastPoint {
                value: trend + seasonal,
                trend,
                seasonal,
                index,
                timestamp: None,
            }
        })
        .collect()
}

/// Residual spread at `level`: `z_score(level) * std(residual)`.
pub fn residual_interval(residual: &[f64], level: f64) -> ResidualInterval {
    let z = z_score(level);
    let residual_std_dev = std_dev(residual);
    ResidualInterval {
        level,
        z_score: z,
        residual_std_dev,
        half_width: z * residual_std_dev,
    }
}

/// Symmetric band of `half_width` around every point.
pub fn confidence_bands(points: &[ForecastPoint], half_width: f64) -> Vec<ConfidenceInterval> {
    points
        .iter()
        .map(|p| ConfidenceInterval::symmetric(p.value, half_width))
        .collect()
}
