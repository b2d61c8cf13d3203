//! Accuracy metrics for forecast evaluation.

use crate::error::{DecompositionError, Result};
use serde::{Deserialize, Serialize};

/// Accuracy of predictions against actual observations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    /// Mean Squared Error
    pub mse: f64,
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error, over points whose actual is non-zero
    pub mape: f64,
}

impl AccuracyMetrics {
    /// Metrics with every field zero (nothing to compare).
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Calculate accuracy metrics between actual and predicted values.
///
/// MAPE skips points whose actual value is zero and is 0 if every actual is zero.
/// Empty inputs yield [`AccuracyMetrics::zero`].
pub fn calculate_metrics(actual: &[f64], predicted: &[f64]) -> Result<AccuracyMetrics> {
    if actual.len() != predicted.len() {
        return Err(DecompositionError::InvalidParameter(format!(
            "actual and predicted lengths differ: {} vs {}",
            actual.len(),
            predicted.len()
        )));
    }
    if actual.is_empty() {
        return Ok(AccuracyMetrics::zero());
    }

    let n = actual.len() as f64;

    let mse = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum::<f64>()
        / n;

    let mae = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum::<f64>()
        / n;

    let (ape_sum, ape_count) = actual
        .iter()
        .zip(predicted)
        .filter(|(a, _)| **a != 0.0)
        .fold((0.0, 0usize), |(sum, count), (a, p)| {
            (sum + ((a - p) / a).abs(), count + 1)
        });
    let mape = if ape_count == 0 {
        0.0
    } else {
        100.0 * ape_sum / ape_count as f64
    };

    Ok(AccuracyMetrics {
        mse,
        mae,
        rmse: mse.sqrt(),
        mape,
    })
}
