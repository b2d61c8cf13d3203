//! IQR outlier detection for input diagnostics.

use serde::Serialize;
use std::cmp::Ordering;

/// Standard Tukey fence multiplier.
pub const DEFAULT_IQR_MULTIPLIER: f64 = 1.5;

/// Result of outlier detection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlierResult {
    /// Indices of detected outliers.
    pub outlier_indices: Vec<usize>,
    /// Lower fence `q1 - k * iqr`.
    pub lower_bound: f64,
    /// Upper fence `q3 + k * iqr`.
    pub upper_bound: f64,
    /// Number of points inspected.
    pub total: usize,
}

impl OutlierResult {
    /// Get the number of outliers detected.
    pub fn outlier_count(&self) -> usize {
        self.outlier_indices.len()
    }

    /// Check if a specific index is an outlier.
    pub fn is_outlier(&self, index: usize) -> bool {
        self.outlier_indices.contains(&index)
    }

    /// Get outlier percentage.
    pub fn outlier_percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.outlier_indices.len() as f64 / self.total as f64
        }
    }
}

/// Flag points outside `[q1 - k·iqr, q3 + k·iqr]`.
///
/// Non-finite values are ignored when locating the quartiles and never
/// flagged. Fewer than four finite points yield no outliers.
pub fn detect_outliers_iqr(series: &[f64], multiplier: f64) -> OutlierResult {
    let mut sorted: Vec<f64> = series.iter().filter(|x| x.is_finite()).copied().collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let n = sorted.len();
    if n < 4 {
        return OutlierResult {
            outlier_indices: Vec::new(),
            lower_bound: f64::NEG_INFINITY,
            upper_bound: f64::INFINITY,
            total: series.len(),
        };
    }

    let q1 = sorted[n / 4];
    let q3 = sorted[3 * n / 4];
    let iqr = q3 - q1;

    let lower_bound = q1 - multiplier * iqr;
    let upper_bound = q3 + multiplier * iqr;

    let outlier_indices = series
        .iter()
        .enumerate()
        .filter(|(_, &x)| x.is_finite() && (x < lower_bound || x > upper_bound))
        .map(|(i, _)| i)
        .collect();

    OutlierResult {
        outlier_indices,
        lower_bound,
        upper_bound,
        total: series.len(),
    }
}

/// IQR detection with the standard 1.5 multiplier.
pub fn detect_outliers(series: &[f64]) -> OutlierResult {
    detect_outliers_iqr(series, DEFAULT_IQR_MULTIPLIER)
}
