//! Utility functions shared by the decomposition and forecasting paths.

pub mod metrics;
pub mod ols;
pub mod stats;

pub use metrics::{calculate_metrics, AccuracyMetrics};
pub use ols::{linear_fit, linear_slope, polynomial_fit, LinearFit, PolynomialFit};
pub use stats::{z_score, DEFAULT_Z_SCORE};
