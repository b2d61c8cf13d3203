//! Detection utilities for input diagnostics.

mod outlier;

pub use outlier::{detect_outliers, detect_outliers_iqr, OutlierResult, DEFAULT_IQR_MULTIPLIER};
