//! Additive/multiplicative model resolution.
//!
//! Multiplicative decompositions run the additive algorithms on the log of
//! the series and exponentiate the components afterwards, so
//! `trend * seasonal * residual` reproduces the input.

use super::components::Components;
use super::params::DecompositionModel;
use crate::utils::stats::{mean, pearson, std_dev};
use tracing::warn;

/// Correlation between per-cycle level and spread above which `auto`
/// picks the multiplicative model.
pub const AUTO_MULTIPLICATIVE_CORRELATION: f64 = 0.5;

/// Complete cycles required before `auto` considers the multiplicative model.
pub const AUTO_MIN_CYCLES: usize = 3;

/// Whether every value is strictly positive.
pub fn all_positive(values: &[f64]) -> bool {
    values.iter().all(|&v| v > 0.0)
}

/// Resolve `auto` against the data; explicit models are returned unchanged.
pub fn resolve_model(
    values: &[f64],
    period: usize,
    requested: DecompositionModel,
) -> DecompositionModel {
    if requested != DecompositionModel::Auto {
        return requested;
    }
    let resolved = match level_spread_correlation(values, period) {
        Some(r) if r > AUTO_MULTIPLICATIVE_CORRELATION && all_positive(values) => {
            DecompositionModel::Multiplicative
        }
        _ => DecompositionModel::Additive,
    };
    warn!(resolved = %resolved, "auto model resolved from data");
    resolved
}

/// Pearson correlation between the mean and the standard deviation of each
/// complete cycle, or `None` with fewer than [`AUTO_MIN_CYCLES`] cycles.
pub fn level_spread_correlation(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() / period < AUTO_MIN_CYCLES {
        return None;
    }
    let (levels, spreads): (Vec<f64>, Vec<f64>) = values
        .chunks_exact(period)
        .map(|cycle| (mean(cycle), std_dev(cycle)))
        .unzip();
    Some(pearson(&levels, &spreads))
}

/// Natural log of every value. Callers ensure positivity.
pub fn to_log_domain(values: &[f64]) -> Vec<f64> {
    values.iter().map(|v| v.ln()).collect()
}

/// Exponentiate log-domain components into multiplicative factors.
pub fn from_log_domain(log_components: &Components) -> Components {
    let exp = |v: &[f64]| v.iter().map(|x| x.exp()).collect::<Vec<f64>>();
    Components {
        trend: exp(&log_components.trend),
        seasonal: exp(&log_components.seasonal),
        residual: exp(&log_components.residual),
    }
}

/// In-sample fit of the components under `model`.
pub fn fitted_values(components: &Components, model: DecompositionModel) -> Vec<f64> {
    components
        .trend
        .iter()
        .zip(&components.seasonal)
        .map(|(t, s)| match model {
            DecompositionModel::Multiplicative => t * s,
            _ => t + s,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn growing_seasonal(cycles: usize) -> Vec<f64> {
        (0..cycles * 4)
            .map(|i| {
                let level = 10.0 * (1 + i / 4) as f64;
                let factor = [0.8, 1.2, 1.1, 0.9][i % 4];
                level * factor
            })
            .collect()
    }

    #[test]
    fn explicit_models_pass_through() {
        let values = [-1.0, 2.0, 3.0, 4.0];
        assert_eq!(
            resolve_model(&values, 2, DecompositionModel::Additive),
            DecompositionModel::Additive
        );
        assert_eq!(
            resolve_model(&values, 2, DecompositionModel::Multiplicative),
            DecompositionModel::Multiplicative
        );
    }

    #[test]
    fn auto_detects_spread_growing_with_level() {
        let values = growing_seasonal(5);
        assert!(level_spread_correlation(&values, 4).unwrap() > 0.99);
        assert_eq!(
            resolve_model(&values, 4, DecompositionModel::Auto),
            DecompositionModel::Multiplicative
        );
    }

    #[test]
    fn auto_stays_additive_for_constant_amplitude() {
        let values: Vec<f64> = (0..20)
            .map(|i| 50.0 + i as f64 + [2.0, -2.0, 1.0, -1.0][i % 4])
            .collect();
        assert_eq!(
            resolve_model(&values, 4, DecompositionModel::Auto),
            DecompositionModel::Additive
        );
    }

    #[test]
    fn auto_stays_additive_with_non_positive_values() {
        let mut values = growing_seasonal(5);
        values[0] = 0.0;
        assert_eq!(
            resolve_model(&values, 4, DecompositionModel::Auto),
            DecompositionModel::Additive
        );
    }

    #[test]
    fn auto_needs_three_cycles() {
        assert!(level_spread_correlation(&growing_seasonal(2), 4).is_none());
    }

    #[test]
    fn log_round_trip_restores_product() {
        let values = growing_seasonal(3);
        let logs = to_log_domain(&values);
        let log_components = Components::from_trend_and_seasonal(
            &logs,
            logs.iter().map(|l| l * 0.5).collect(),
            vec![0.1; logs.len()],
        );
        let factors = from_log_domain(&log_components);
        for (i, &v) in values.iter().enumerate() {
            let product = factors.trend[i] * factors.seasonal[i] * factors.residual[i];
            assert_relative_eq!(product, v, max_relative = 1e-12);
        }
        let fitted = fitted_values(&factors, DecompositionModel::Multiplicative);
        assert_relative_eq!(
            fitted[0],
            factors.trend[0] * factors.seasonal[0],
            max_relative = 1e-12
        );
    }
}
