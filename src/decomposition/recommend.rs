//! Method recommendation from sample size relative to the period.

use super::params::DecompositionMethod;
use crate::detection::detect_outliers;
use crate::error::{DecompositionError, Result};
use crate::utils::stats::{autocorrelation, coefficient_of_variation, mean, std_dev};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A decomposition method judged suitable for the data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodRecommendation {
    pub method: DecompositionMethod,
    pub reason: String,
    pub confidence: f64,
}

/// Methods supported by `n` observations at `period`, best first.
///
/// STL needs six cycles (confidence 0.9), X11 eight (0.8) and classical
/// three (0.7). An empty list means callers should fall back to classical.
///
/// # Example
/// ```
/// use anofox_decompose::decomposition::{recommend_methods, DecompositionMethod};
///
/// let recs = recommend_methods(72, 12);
/// assert_eq!(recs.len(), 2);
/// assert_eq!(recs[0].method, DecompositionMethod::Stl);
/// ```
pub fn recommend_methods(n: usize, period: usize) -> Vec<MethodRecommendation> {
    let cycles = if period == 0 {
        0.0
    } else {
        n as f64 / period as f64
    };

    let mut recommendations: Vec<MethodRecommendation> = [
        (
            DecompositionMethod::Stl,
            0.9,
            "robust to outliers and adapts to slowly changing seasonality",
        ),
        (
            DecompositionMethod::X11,
            0.8,
            "Henderson trend suits long regular series",
        ),
        (
            DecompositionMethod::Classical,
            0.7,
            "simple and stable for short series with fixed seasonality",
        ),
    ]
    .into_iter()
    .filter(|(method, _, _)| n >= period.saturating_mul(method.recommended_cycles()))
    .map(|(method, confidence, why)| MethodRecommendation {
        method,
        reason: format!(
            "{}; {} observations cover {:.1} cycles (needs {})",
            why,
            n,
            cycles,
            method.recommended_cycles()
        ),
        confidence,
    })
    .collect();

    recommendations.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    debug!(n, period, count = recommendations.len(), "recommended methods");
    recommendations
}

/// Descriptive statistics reported alongside recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesCharacteristics {
    pub data_points: usize,
    pub complete_cycles: usize,
    pub mean: f64,
    pub standard_deviation: f64,
    /// Absent when the mean is zero.
    pub coefficient_of_variation: Option<f64>,
    pub minimum: f64,
    pub maximum: f64,
    /// Autocorrelation at lag `period`; absent when the series is that short.
    pub seasonal_autocorrelation: Option<f64>,
    #[serde(rename = "sufficientForSTL")]
    pub sufficient_for_stl: bool,
    #[serde(rename = "sufficientForX11")]
    pub sufficient_for_x11: bool,
    pub sufficient_for_classical: bool,
    pub outlier_count: usize,
}

impl SeriesCharacteristics {
    /// Describe a finite, non-empty series at `period`.
    pub fn describe(values: &[f64], period: usize) -> Self {
        let n = values.len();
        let sufficient = |method: DecompositionMethod| {
            n >= period.saturating_mul(method.recommended_cycles())
        };
        Self {
            data_points: n,
            complete_cycles: n.checked_div(period).unwrap_or(0),
            mean: mean(values),
            standard_deviation: std_dev(values),
            coefficient_of_variation: Some(coefficient_of_variation(values))
                .filter(|cv| cv.is_finite()),
            minimum: values.iter().copied().fold(f64::INFINITY, f64::min),
            maximum: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            seasonal_autocorrelation: Some(autocorrelation(values, period))
                .filter(|r| r.is_finite()),
            sufficient_for_stl: sufficient(DecompositionMethod::Stl),
            sufficient_for_x11: sufficient(DecompositionMethod::X11),
            sufficient_for_classical: sufficient(DecompositionMethod::Classical),
            outlier_count: detect_outliers(values).outlier_count(),
        }
    }
}

/// Recommendations together with the characteristics they were based on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommendations: Vec<MethodRecommendation>,
    pub characteristics: SeriesCharacteristics,
}

/// Recommend decomposition methods for `values`.
pub fn recommend(values: &[f64], period: usize) -> Result<Recommendation> {
    if period < 2 {
        return Err(DecompositionError::InvalidParameter(format!(
            "period must be at least 2, got {}",
            period
        )));
    }
    if values.is_empty() {
        return Err(DecompositionError::InsufficientData { needed: 1, got: 0 });
    }
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(DecompositionError::InvalidData(format!(
            "non-finite value at index {}",
            i
        )));
    }
    Ok(Recommendation {
        recommendations: recommend_methods(values.len(), period),
        characteristics: SeriesCharacteristics::describe(values, period),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use approx::assert_relative_eq;

    fn methods(recs: &[MethodRecommendation]) -> Vec<DecompositionMethod> {
        recs.iter().map(|r| r.method).collect()
    }

    #[test]
    fn thresholds_follow_cycle_counts() {
        use DecompositionMethod::*;
        assert!(recommend_methods(35, 12).is_empty());
        assert_eq!(methods(&recommend_methods(36, 12)), vec![Classical]);
        assert_eq!(methods(&recommend_methods(72, 12)), vec![Stl, Classical]);
        assert_eq!(methods(&recommend_methods(96, 12)), vec![Stl, X11, Classical]);
    }

    #[test]
    fn recommendations_sorted_by_confidence() {
        let recs = recommend_methods(200, 4);
        let confidences: Vec<f64> = recs.iter().map(|r| r.confidence).collect();
        assert_eq!(confidences, vec![0.9, 0.8, 0.7]);
        assert!(recs[0].reason.contains("50.0 cycles"));
    }

    #[test]
    fn characteristics_describe_series() {
        let values: Vec<f64> = (0..24).map(|i| [1.0, 2.0, 3.0, 2.0][i % 4]).collect();
        let c = SeriesCharacteristics::describe(&values, 4);
        assert_eq!(c.data_points, 24);
        assert_eq!(c.complete_cycles, 6);
        assert_relative_eq!(c.mean, 2.0, epsilon = 1e-12);
        assert_eq!(c.minimum, 1.0);
        assert_eq!(c.maximum, 3.0);
        assert!(c.sufficient_for_stl);
        assert!(!c.sufficient_for_x11);
        assert!(c.sufficient_for_classical);
        assert_eq!(c.outlier_count, 0);
        assert!(c.seasonal_autocorrelation.unwrap() > 0.5);
    }

    #[test]
    fn zero_mean_has_no_coefficient_of_variation() {
        let c = SeriesCharacteristics::describe(&[-1.0, 1.0, -1.0, 1.0], 2);
        assert!(c.coefficient_of_variation.is_none());
    }

    #[test]
    fn characteristics_serialize_with_acronym_names() {
        let c = SeriesCharacteristics::describe(&[1.0, 2.0, 3.0, 4.0], 2);
        let json = serde_json::to_value(&c).unwrap();
        assert!(json.get("sufficientForSTL").is_some());
        assert!(json.get("sufficientForX11").is_some());
        assert!(json.get("coefficientOfVariation").is_some());
    }

    #[test]
    fn recommend_validates_input() {
        assert_eq!(recommend(&[1.0, 2.0], 1).unwrap_err().kind(), ErrorKind::InvalidParameter);
        assert_eq!(recommend(&[], 4).unwrap_err().kind(), ErrorKind::InsufficientData);
        assert_eq!(
            recommend(&[1.0, f64::INFINITY], 2).unwrap_err().kind(),
            ErrorKind::InvalidData
        );
        let rec = recommend(&[1.0; 30], 5).unwrap();
        assert_eq!(rec.recommendations.len(), 2);
    }
}
