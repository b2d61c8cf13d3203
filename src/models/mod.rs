//! Forecasting models used by the ensemble engine.

mod traits;

pub mod ensemble;
pub mod linear;
pub mod polynomial;
pub mod smoothing;

pub use ensemble::{advanced_forecast, Ensemble, EnsembleConfig, EnsembleForecast, MethodForecasts};
pub use linear::LinearTrend;
pub use polynomial::QuadraticTrend;
pub use smoothing::AnchoredSmoothing;
pub use traits::{BoxedForecaster, ForecastMethod, Forecaster};
