//! Linear trend forecaster.
//!
//! Fits `value = slope * index + intercept` by OLS over indices `0..n` and
//! extrapolates to `n + i`.

use crate::error::{DecompositionError, Result};
use crate::models::Forecaster;
use crate::utils::ols::{linear_fit, LinearFit};

/// OLS straight line against the observation index.
#[derive(Debug, Clone, Default)]
pub struct LinearTrend {
    fit: Option<LinearFit>,
    n: usize,
}

impl LinearTrend {
    pub fn new() -> Self {
        Self::default()
    }

    /// The fitted line, if any.
    pub fn line(&self) -> Option<LinearFit> {
        self.fit
    }
}

impl Forecaster for LinearTrend {
    fn fit(&mut self, values: &[f64]) -> Result<()> {
        if values.is_empty() {
            return Err(DecompositionError::InsufficientData { needed: 1, got: 0 });
        }
        self.fit = Some(linear_fit(values));
        self.n = values.len();
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Vec<f64>> {
        let line = self.fit.ok_or(DecompositionError::FitRequired)?;
        Ok((0..horizon)
            .map(|i| line.predict((self.n + i) as f64))
            .collect())
    }

    fn name(&self) -> &str {
        "linear"
    }

    fn is_fitted(&self) -> bool {
        self.fit.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn extrapolates_exact_line() {
        let mut model = LinearTrend::new();
        model.fit(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let forecast = model.predict(2).unwrap();
        assert_relative_eq!(forecast[0], 6.0, epsilon = 1e-10);
        assert_relative_eq!(forecast[1], 7.0, epsilon = 1e-10);
    }

    #[test]
    fn flat_series_forecasts_mean() {
        let mut model = LinearTrend::new();
        model.fit(&[4.0, 4.0, 4.0]).unwrap();
        assert_eq!(model.predict(3).unwrap(), vec![4.0, 4.0, 4.0]);
        assert_eq!(model.line().unwrap().slope, 0.0);
    }

    #[test]
    fn empty_fit_fails() {
        let mut model = LinearTrend::new();
        assert!(model.fit(&[]).is_err());
        assert!(!model.is_fitted());
    }
}
