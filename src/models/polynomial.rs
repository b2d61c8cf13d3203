//! Degree-2 polynomial trend forecaster.

use crate::error::{DecompositionError, Result};
use crate::models::Forecaster;
use crate::utils::ols::{polynomial_fit, PolynomialFit};

/// Polynomial degree used by the ensemble.
pub const POLYNOMIAL_DEGREE: usize = 2;

/// Least-squares quadratic against the observation index.
///
/// A singular fit (fewer than three points) is not an error: the model
/// predicts NaN and the ensemble ignores it.
#[derive(Debug, Clone, Default)]
pub struct QuadraticTrend {
    fit: Option<PolynomialFit>,
    n: usize,
    fitted: bool,
}

impl QuadraticTrend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coefficients on the mean-centred index, lowest order first.
    pub fn coefficients(&self) -> Option<&[f64]> {
        self.fit.as_ref().map(|f| f.coefficients.as_slice())
    }
}

impl Forecaster for QuadraticTrend {
    fn fit(&mut self, values: &[f64]) -> Result<()> {
        if values.is_empty() {
            return Err(DecompositionError::InsufficientData { needed: 1, got: 0 });
        }
        self.fit = polynomial_fit(values, POLYNOMIAL_DEGREE);
        self.n = values.len();
        self.fitted = true;
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Vec<f64>> {
        if !self.fitted {
            return Err(DecompositionError::FitRequired);
        }
        Ok((0..horizon)
            .map(|i| match &self.fit {
                Some(fit) => fit.predict((self.n + i) as f64),
                None => f64::NAN,
            })
            .collect())
    }

    fn name(&self) -> &str {
        "polynomial"
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn extrapolates_exact_quadratic() {
        let values: Vec<f64> = (0..6).map(|i| (i * i) as f64 + 1.0).collect();
        let mut model = QuadraticTrend::new();
        model.fit(&values).unwrap();
        let forecast = model.predict(2).unwrap();
        assert_relative_eq!(forecast[0], 37.0, epsilon = 1e-8);
        assert_relative_eq!(forecast[1], 50.0, epsilon = 1e-8);

        // (t + 2.5)^2 + 1 on the index centred at 2.5
        let coefficients = model.coefficients().unwrap();
        assert_eq!(coefficients.len(), POLYNOMIAL_DEGREE + 1);
        assert_relative_eq!(coefficients[0], 7.25, epsilon = 1e-9);
        assert_relative_eq!(coefficients[1], 5.0, epsilon = 1e-9);
        assert_relative_eq!(coefficients[2], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn linear_data_has_no_curvature() {
        let mut model = QuadraticTrend::new();
        model.fit(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let forecast = model.predict(2).unwrap();
        assert_relative_eq!(forecast[0], 6.0, epsilon = 1e-9);
        assert_relative_eq!(forecast[1], 7.0, epsilon = 1e-9);
        assert_relative_eq!(model.coefficients().unwrap()[2], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn too_few_points_predict_nan() {
        let mut model = QuadraticTrend::new();
        model.fit(&[1.0, 2.0]).unwrap();
        assert!(model.is_fitted());
        assert!(model.coefficients().is_none());
        assert!(model.predict(2).unwrap().iter().all(|v| v.is_nan()));
    }
}
