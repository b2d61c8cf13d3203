//! # anofox-decompose
//!
//! Seasonal-trend decomposition and short-horizon ensemble forecasting.
//!
//! Provides STL, X11 and classical decomposition (with SEATS served by the
//! STL path), quality scoring, decomposition-based forecasts with residual
//! confidence bands, method recommendation, input validation, and an
//! ensemble of linear, quadratic and exponential-smoothing forecasters.
//!
//! Every entry point is a pure function of its inputs.

#![allow(clippy::needless_range_loop)]

pub mod core;
pub mod decomposition;
pub mod detection;
pub mod error;
pub mod models;
pub mod service;
pub mod transform;
pub mod utils;
pub mod validation;

pub use error::{DecompositionError, ErrorKind, Result};

pub mod prelude {
    pub use crate::core::{SeriesInput, TimeSeries};
    pub use crate::decomposition::{
        decompose, decompose_values, recommend, DecompositionMethod, DecompositionModel,
        DecompositionParams, DecompositionResult,
    };
    pub use crate::error::{DecompositionError, ErrorKind, Result};
    pub use crate::models::{advanced_forecast, EnsembleConfig, Forecaster};
    pub use crate::utils::{calculate_metrics, z_score, AccuracyMetrics};
    pub use crate::validation::validate;
}
