//! Quality scores for a decomposition, each in [0, 1].

use super::components::Components;
use crate::utils::stats::{is_negligible, kurtosis, mean_square, population_variance, skewness};
use serde::{Deserialize, Serialize};

/// Variance-based quality scores and their unweighted mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityMetrics {
    /// `1 - var(residual) / var(original)`.
    pub variance_explained: f64,
    /// `var(seasonal) / (var(seasonal) + var(residual))`.
    pub seasonal_strength: f64,
    /// `var(trend) / (var(trend) + var(residual))`.
    pub trend_strength: f64,
    /// Closeness of residual skewness and kurtosis to Gaussian values (0, 3).
    pub residual_normality: f64,
    /// Mean of the four scores above.
    pub overall: f64,
}

impl QualityMetrics {
    /// Score `components` against the series they were derived from.
    ///
    /// A variance counts as zero only when it is rounding noise relative to
    /// the mean square of `original`, so the scores do not depend on units.
    pub fn compute(original: &[f64], components: &Components) -> Self {
        let scale = mean_square(original);
        let var_original = population_variance(original);
        let var_residual = population_variance(&components.residual);
        let var_seasonal = population_variance(&components.seasonal);
        let var_trend = population_variance(&components.trend);

        let variance_explained = if is_negligible(var_original, scale) {
            if is_negligible(var_residual, scale) {
                1.0
            } else {
                0.0
            }
        } else {
            clamp_unit(1.0 - var_residual / var_original)
        };

        let seasonal_strength = strength(var_seasonal, var_residual, scale);
        let trend_strength = strength(var_trend, var_residual, scale);
        let residual_normality = residual_normality(&components.residual);

        let overall =
            (variance_explained + seasonal_strength + trend_strength + residual_normality) / 4.0;

        Self {
            variance_explained,
            seasonal_strength,
            trend_strength,
            residual_normality,
            overall,
        }
    }
}

/// `component / (component + residual)`, 0 when both vanish.
fn strength(var_component: f64, var_residual: f64, scale: f64) -> f64 {
    let total = var_component + var_residual;
    if is_negligible(total, scale) {
        return 0.0;
    }
    clamp_unit(var_component / total)
}

/// Average of `max(0, 1 - |skew|/2)` and `max(0, 1 - |kurt - 3|/3)`.
pub fn residual_normality(residual: &[f64]) -> f64 {
    let skew_score = (1.0 - skewness(residual).abs() / 2.0).max(0.0);
    let kurt_score = (1.0 - (kurtosis(residual) - 3.0).abs() / 3.0).max(0.0);
    (skew_score + kurt_score) / 2.0
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
