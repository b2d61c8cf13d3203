//! Forecaster trait and the registry of ensemble members.

use super::linear::LinearTrend;
use super::polynomial::QuadraticTrend;
use super::smoothing::AnchoredSmoothing;
use crate::error::{DecompositionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Common interface for the ensemble's member models.
///
/// This trait is object-safe and can be used with `Box<dyn Forecaster>`.
pub trait Forecaster {
    /// Fit the model to finite observations.
    fn fit(&mut self, values: &[f64]) -> Result<()>;

    /// Point forecasts for the next `horizon` steps.
    ///
    /// Values may be non-finite when the fit was degenerate; callers
    /// combining forecasts skip those.
    fn predict(&self, horizon: usize) -> Result<Vec<f64>>;

    /// Get the model name.
    fn name(&self) -> &str;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool;
}

/// Type alias for boxed forecaster trait objects.
///
/// # Example
///
/// ```
/// use anofox_decompose::models::{BoxedForecaster, ForecastMethod};
///
/// let model: BoxedForecaster = ForecastMethod::Linear.create();
/// assert_eq!(model.name(), "linear");
/// assert!(!model.is_fitted());
/// ```
pub type BoxedForecaster = Box<dyn Forecaster>;

/// Member models available to the ensemble.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ForecastMethod {
    /// OLS line against the index.
    Linear,
    /// Least-squares quadratic against the index.
    Polynomial,
    /// Exponential smoothing anchored to the last observation.
    Exponential,
}

impl ForecastMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Polynomial => "polynomial",
            Self::Exponential => "exponential",
        }
    }

    /// Every method, in output order.
    pub fn all() -> [Self; 3] {
        [Self::Linear, Self::Polynomial, Self::Exponential]
    }

    /// A fresh, unfitted model.
    pub fn create(&self) -> BoxedForecaster {
        match self {
            Self::Linear => Box::new(LinearTrend::new()),
            Self::Polynomial => Box::new(QuadraticTrend::new()),
            Self::Exponential => Box::new(AnchoredSmoothing::new()),
        }
    }

    /// Parse requested names; empty means all, duplicates are dropped.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> Result<Vec<Self>> {
        if names.is_empty() {
            return Ok(Self::all().to_vec());
        }
        let mut methods = Vec::with_capacity(names.len());
        for name in names {
            let method: Self = name.as_ref().parse()?;
            if !methods.contains(&method) {
                methods.push(method);
            }
        }
        Ok(methods)
    }
}

impl FromStr for ForecastMethod {
    type Err = DecompositionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "polynomial" => Ok(Self::Polynomial),
            "exponential" => Ok(Self::Exponential),
            other => Err(DecompositionError::UnsupportedMethod(other.to_string())),
        }
    }
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("Linear".parse::<ForecastMethod>().unwrap(), ForecastMethod::Linear);
        assert_eq!(
            " POLYNOMIAL".parse::<ForecastMethod>().unwrap(),
            ForecastMethod::Polynomial
        );
        assert_eq!(
            "neural".parse::<ForecastMethod>().unwrap_err(),
            DecompositionError::UnsupportedMethod("neural".to_string())
        );
    }

    #[test]
    fn empty_list_means_all() {
        let methods = ForecastMethod::parse_list::<&str>(&[]).unwrap();
        assert_eq!(methods, ForecastMethod::all().to_vec());
    }

    #[test]
    fn duplicates_are_dropped_in_order() {
        let methods = ForecastMethod::parse_list(&["exponential", "linear", "EXPONENTIAL"]).unwrap();
        assert_eq!(methods, vec![ForecastMethod::Exponential, ForecastMethod::Linear]);
    }

    #[test]
    fn created_models_report_their_names() {
        for method in ForecastMethod::all() {
            let model = method.create();
            assert_eq!(model.name(), method.as_str());
            assert!(!model.is_fitted());
        }
    }

    #[test]
    fn unfitted_models_refuse_to_predict() {
        for method in ForecastMethod::all() {
            let err = method.create().predict(3).unwrap_err();
            assert_eq!(err, DecompositionError::FitRequired);
        }
    }
}
