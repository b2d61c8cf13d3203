//! Window transformations for time series.
//!
//! # Example
//!
//! ```
//! use anofox_decompose::transform::{henderson_smooth, moving_average, rolling_median};
//!
//! let series = vec![1.0, 2.0, 30.0, 4.0, 5.0];
//!
//! let mean = moving_average(&series, 3);
//! let median = rolling_median(&series, 3);
//! let henderson = henderson_smooth(&series, 5);
//! assert_eq!(median[2], 4.0);
//! assert_eq!(mean.len(), henderson.len());
//! ```

pub mod window;

pub use window::{
    centered_moving_average, henderson_smooth, henderson_weights, low_pass_filter, moving_average,
    observation_weighted_average, rolling_median, weighted_moving_average,
};
