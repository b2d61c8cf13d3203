//! Forecast and confidence-interval result structures.

use serde::{Deserialize, Serialize};

/// One future step produced from a decomposition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    /// Forecast value (trend combined with seasonal).
    pub value: f64,
    /// Extrapolated trend component.
    pub trend: f64,
    /// Seasonal component reused from the fitted cycle.
    pub seasonal: f64,
    /// Position in the extended series: `original_length + offset`.
    pub index: usize,
    /// Projected timestamp when the input carried timestamps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// Symmetric band around a point forecast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    pub point: f64,
}

impl ConfidenceInterval {
    /// Band `point ± half_width`.
    pub fn symmetric(point: f64, half_width: f64) -> Self {
        Self {
            lower: point - half_width,
            upper: point + half_width,
            point,
        }
    }

    /// Distance from the point to either bound.
    pub fn half_width(&self) -> f64 {
        self.upper - self.point
    }
}

/// Scalar interval describing the spread of a decomposition's residual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidualInterval {
    /// Requested confidence level.
    pub level: f64,
    /// Z-score taken from the lookup table.
    pub z_score: f64,
    /// Population standard deviation of the residual in original units.
    pub residual_std_dev: f64,
    /// `z_score * residual_std_dev`.
    pub half_width: f64,
}

/// Forecast points with their confidence bands, index-aligned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastResult {
    pub points: Vec<ForecastPoint>,
    pub intervals: Vec<ConfidenceInterval>,
}

impl ForecastResult {
    /// Number of forecast steps.
    pub fn horizon(&self) -> usize {
        self.points.len()
    }

    /// Point values only.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symmetric_interval_bounds() {
        let ci = ConfidenceInterval::symmetric(10.0, 2.5);
        assert_eq!(ci.lower, 7.5);
        assert_eq!(ci.upper, 12.5);
        assert_eq!(ci.half_width(), 2.5);
    }

    #[test]
    fn forecast_point_serializes_without_missing_timestamp() {
        let point = ForecastPoint {
            value: 1.0,
            trend: 0.5,
            seasonal: 0.5,
            index: 12,
            timestamp: None,
        };
        let json = serde_json::to_value(point).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"value": 1.0, "trend": 0.5, "seasonal": 0.5, "index": 12})
        );
    }

    #[test]
    fn forecast_result_values() {
        let result = ForecastResult {
            points: vec![
                ForecastPoint {
                    value: 3.0,
                    trend: 3.0,
                    seasonal: 0.0,
                    index: 4,
                    timestamp: None,
                },
                ForecastPoint {
                    value: 4.0,
                    trend: 4.0,
                    seasonal: 0.0,
                    index: 5,
                    timestamp: None,
                },
            ],
            intervals: Vec::new(),
        };
        assert_eq!(result.horizon(), 2);
        assert_eq!(result.values(), vec![3.0, 4.0]);
    }
}
