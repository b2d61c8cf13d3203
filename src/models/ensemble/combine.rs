//! Ensemble forecaster combining member models point by point.

use crate::error::{DecompositionError, Result};
use crate::models::{BoxedForecaster, ForecastMethod, Forecaster};
use tracing::{trace, warn};

/// Mean of the finite member values at each step, 0 when none is finite.
///
/// Members shorter than `horizon` contribute nothing past their end.
pub fn combine_finite_mean(forecasts: &[Vec<f64>], horizon: usize) -> Vec<f64> {
    (0..horizon)
        .map(|h| {
            let (sum, count) = forecasts
                .iter()
                .filter_map(|f| f.get(h).copied())
                .filter(|v| v.is_finite())
                .fold((0.0, 0usize), |(s, c), v| (s + v, c + 1));
            if count == 0 {
                0.0
            } else {
                sum / count as f64
            }
        })
        .collect()
}

/// Ensemble forecaster that averages its members.
pub struct Ensemble {
    /// The member models.
    models: Vec<BoxedForecaster>,
    /// Whether every member has been fitted.
    is_fitted: bool,
}

impl Ensemble {
    /// Create a new ensemble with the given models.
    pub fn new(models: Vec<BoxedForecaster>) -> Self {
        Self {
            models,
            is_fitted: false,
        }
    }

    /// Ensemble of freshly created members.
    pub fn from_methods(methods: &[ForecastMethod]) -> Self {
        Self::new(methods.iter().map(ForecastMethod::create).collect())
    }

    /// Get the number of models in the ensemble.
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Each member's forecast, keyed by member name, in member order.
    pub fn member_forecasts(&self, horizon: usize) -> Result<Vec<(String, Vec<f64>)>> {
        if !self.is_fitted {
            return Err(DecompositionError::FitRequired);
        }
        self.models
            .iter()
            .map(|model| {
                let values = model.predict(horizon)?;
                trace!(method = model.name(), ?values, "member forecast");
                if horizon > 0 && !values.iter().any(|v| v.is_finite()) {
                    warn!(method = model.name(), "member produced no finite forecast");
                }
                Ok((model.name().to_string(), values))
            })
            .collect()
    }
}

impl Forecaster for Ensemble {
    fn fit(&mut self, values: &[f64]) -> Result<()> {
        if self.models.is_empty() {
            return Err(DecompositionError::InvalidParameter(
                "ensemble has no models".to_string(),
            ));
        }
        for model in &mut self.models {
            model.fit(values)?;
        }
        self.is_fitted = true;
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Vec<f64>> {
        let members: Vec<Vec<f64>> = self
            .member_forecasts(horizon)?
            .into_iter()
            .map(|(_, values)| values)
            .collect();
        Ok(combine_finite_mean(&members, horizon))
    }

    fn name(&self) -> &str {
        "ensemble"
    }

    fn is_fitted(&self) -> bool {
        self.is_fitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_skips_non_finite_members() {
        let forecasts = vec![vec![1.0, f64::NAN], vec![3.0, 4.0], vec![f64::INFINITY, 6.0]];
        let combined = combine_finite_mean(&forecasts, 2);
        assert_relative_eq!(combined[0], 2.0, epsilon = 1e-12);
        assert_relative_eq!(combined[1], 5.0, epsilon = 1e-12);
    }

    #[test]
    fn no_finite_values_gives_zero() {
        let forecasts = vec![vec![f64::NAN, f64::NAN]];
        assert_eq!(combine_finite_mean(&forecasts, 2), vec![0.0, 0.0]);
        assert_eq!(combine_finite_mean(&[], 3), vec![0.0; 3]);
    }

    #[test]
    fn ensemble_averages_members() {
        let mut ensemble = Ensemble::from_methods(&ForecastMethod::all());
        assert_eq!(ensemble.model_count(), 3);
        ensemble.fit(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let forecast = ensemble.predict(2).unwrap();
        // linear and polynomial give 6, 7; exponential stays at 5
        assert_relative_eq!(forecast[0], 17.0 / 3.0, epsilon = 1e-9);
        assert_relative_eq!(forecast[1], 19.0 / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn ensemble_requires_members_and_fit() {
        let mut empty = Ensemble::new(Vec::new());
        assert!(empty.fit(&[1.0, 2.0]).is_err());

        let unfitted = Ensemble::from_methods(&[ForecastMethod::Linear]);
        assert_eq!(unfitted.predict(1).unwrap_err(), DecompositionError::FitRequired);
    }
}
