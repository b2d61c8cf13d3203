//! Ensemble forecasting.
//!
//! Combines linear, quadratic and anchored-smoothing forecasts by averaging
//! their finite values.

mod combine;
mod engine;

pub use combine::{combine_finite_mean, Ensemble};
pub use engine::{
    advanced_forecast, EnsembleConfig, EnsembleForecast, MethodForecasts, ACCURACY_WINDOW,
    MIN_ENSEMBLE_LENGTH,
};
