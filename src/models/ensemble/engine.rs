//! Short-horizon ensemble forecasting with bands and accuracy metrics.

use super::combine::{combine_finite_mean, Ensemble};
use crate::core::ConfidenceInterval;
use crate::error::{DecompositionError, Result};
use crate::models::{ForecastMethod, Forecaster};
use crate::utils::metrics::{calculate_metrics, AccuracyMetrics};
use crate::utils::stats::{std_dev, z_score};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// Fewest observations the ensemble accepts.
pub const MIN_ENSEMBLE_LENGTH: usize = 3;

/// Most trailing observations used for accuracy metrics.
pub const ACCURACY_WINDOW: usize = 5;

/// Ensemble forecast request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
    /// Steps to forecast.
    pub horizon: usize,
    /// Member names; empty selects every member.
    pub methods: Vec<String>,
    /// Confidence level in (0, 1).
    pub confidence: f64,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            horizon: 12,
            methods: Vec::new(),
            confidence: 0.95,
        }
    }
}

impl EnsembleConfig {
    pub fn new(horizon: usize) -> Self {
        Self {
            horizon,
            ..Self::default()
        }
    }

    /// Restrict the ensemble to the named members.
    pub fn with_methods<S: Into<String>>(mut self, methods: impl IntoIterator<Item = S>) -> Self {
        self.methods = methods.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }
}

/// Per-member forecasts plus their combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodForecasts {
    #[serde(flatten)]
    pub members: BTreeMap<ForecastMethod, Vec<f64>>,
    pub ensemble: Vec<f64>,
}

impl MethodForecasts {
    /// Forecast of one member, if it was requested.
    pub fn get(&self, method: ForecastMethod) -> Option<&[f64]> {
        self.members.get(&method).map(Vec::as_slice)
    }
}

/// Result of [`advanced_forecast`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleForecast {
    pub forecasts: MethodForecasts,
    pub confidence_intervals: Vec<ConfidenceInterval>,
    pub accuracy_metrics: AccuracyMetrics,
    pub config: EnsembleConfig,
}

/// Forecast `values` with the configured members and their average.
///
/// The band half-width is the spread of the ensemble forecast itself times
/// the tabulated z-score. Accuracy compares the first `k` ensemble values
/// with the last `k` observations, `k = min(5, n, horizon)`.
///
/// # Example
/// ```
/// use anofox_decompose::models::{advanced_forecast, EnsembleConfig, ForecastMethod};
///
/// let config = EnsembleConfig::new(2).with_methods(["linear"]);
/// let result = advanced_forecast(&[1.0, 2.0, 3.0, 4.0, 5.0], &config).unwrap();
/// let linear = result.forecasts.get(ForecastMethod::Linear).unwrap();
/// assert!((linear[0] - 6.0).abs() < 1e-9);
/// assert_eq!(result.forecasts.ensemble, linear);
/// ```
pub fn advanced_forecast(values: &[f64], config: &EnsembleConfig) -> Result<EnsembleForecast> {
    let n = values.len();
    debug!(n, horizon = config.horizon, methods = ?config.methods, "ensemble forecast");

    if !(config.confidence > 0.0 && config.confidence < 1.0) {
        return Err(DecompositionError::InvalidParameter(format!(
            "confidence must be within (0, 1), got {}",
            config.confidence
        )));
    }
    let methods = ForecastMethod::parse_list(&config.methods)?;
    if n < MIN_ENSEMBLE_LENGTH {
        return Err(DecompositionError::InsufficientData {
            needed: MIN_ENSEMBLE_LENGTH,
            got: n,
        });
    }
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(DecompositionError::InvalidData(format!(
            "non-finite value at index {}",
            i
        )));
    }

    let mut ensemble = Ensemble::from_methods(&methods);
    ensemble.fit(values)?;
    let member_values: Vec<Vec<f64>> = ensemble
        .member_forecasts(config.horizon)?
        .into_iter()
        .map(|(_, forecast)| forecast)
        .collect();
    let combined = combine_finite_mean(&member_values, config.horizon);

    let half_width = std_dev(&combined) * z_score(config.confidence);
    let confidence_intervals = combined
        .iter()
        .map(|&point| ConfidenceInterval::symmetric(point, half_width))
        .collect();

    let k = ACCURACY_WINDOW.min(n).min(config.horizon);
    let accuracy_metrics = calculate_metrics(&values[n - k..], &combined[..k])?;

    let members = methods.into_iter().zip(member_values).collect();
    Ok(EnsembleForecast {
        forecasts: MethodForecasts {
            members,
            ensemble: combined,
        },
        confidence_intervals,
        accuracy_metrics,
        config: config.clone(),
    })
}
