//! Seasonal-trend decomposition.
//!
//! Four methods are available: STL (median-smoothed trend with low-pass
//! corrected cycle-subseries), X11 (Henderson trend), classical (centred
//! moving average) and SEATS, which is served by the STL path.
//!
//! # Example
//!
//! ```
//! use anofox_decompose::decomposition::{decompose_values, DecompositionParams};
//!
//! let values: Vec<f64> = (0..48)
//!     .map(|i| 10.0 + (i % 12) as f64)
//!     .collect();
//! let result = decompose_values(&values, &DecompositionParams::new(12)).unwrap();
//! assert_eq!(result.trend.len(), 48);
//! assert!(result.quality.overall >= 0.0 && result.quality.overall <= 1.0);
//! ```

mod classical;
mod components;
mod decompose;
pub mod forecast;
pub mod model;
mod params;
mod quality;
mod recommend;
mod seasonal;
mod stl;
mod trend;
mod x11;

pub use classical::Classical;
pub use components::{Components, Decomposer};
pub use decompose::{decompose, decompose_values, decomposer_for, DecompositionResult};
pub use params::{
    DecompositionMethod, DecompositionModel, DecompositionParams, DEFAULT_SEASONAL_WINDOW,
    MAX_CONFIDENCE_LEVEL, MIN_CONFIDENCE_LEVEL,
};
pub use quality::{residual_normality, QualityMetrics};
pub use recommend::{
    recommend, recommend_methods, MethodRecommendation, Recommendation, SeriesCharacteristics,
};
pub use seasonal::{
    centered_group_mean_seasonal, group_mean_seasonal, group_means, smooth_cycle_subseries,
    stl_seasonal,
};
pub use stl::{robustness_weights, Stl};
pub use trend::{estimate_trend, TrendSmoother, MIN_HENDERSON_WINDOW};
pub use x11::X11;
