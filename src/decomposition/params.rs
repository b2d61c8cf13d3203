//! Decomposition configuration.

use crate::error::{DecompositionError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest accepted confidence level.
pub const MIN_CONFIDENCE_LEVEL: f64 = 0.80;
/// Highest accepted confidence level.
pub const MAX_CONFIDENCE_LEVEL: f64 = 0.99;
/// Cycle-subseries smoothing window when none is given.
pub const DEFAULT_SEASONAL_WINDOW: usize = 7;

/// How the components combine into the observed series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DecompositionModel {
    /// `y = trend + seasonal + residual`
    #[default]
    Additive,
    /// `y = trend * seasonal * residual`; requires strictly positive data.
    Multiplicative,
    /// Pick one of the above from the data.
    Auto,
}

impl DecompositionModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Additive => "additive",
            Self::Multiplicative => "multiplicative",
            Self::Auto => "auto",
        }
    }
}

impl FromStr for DecompositionModel {
    type Err = DecompositionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "additive" => Ok(Self::Additive),
            "multiplicative" => Ok(Self::Multiplicative),
            "auto" => Ok(Self::Auto),
            other => Err(DecompositionError::InvalidParameter(format!(
                "unknown model '{}' (expected additive, multiplicative or auto)",
                other
            ))),
        }
    }
}

impl TryFrom<String> for DecompositionModel {
    type Error = DecompositionError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for DecompositionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named decomposition algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum DecompositionMethod {
    /// Median-smoothed trend with low-pass corrected cycle-subseries.
    #[default]
    Stl,
    /// Henderson-weighted trend with group-mean seasonal.
    X11,
    /// Centred moving average trend with re-centred group means.
    Classical,
    /// Served by the STL path; no ARIMA-based extraction is performed.
    Seats,
}

impl DecompositionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
            Self::X11 => "x11",
            Self::Classical => "classical",
            Self::Seats => "seats",
        }
    }

    /// Every method, in recommendation order.
    pub fn all() -> [Self; 4] {
        [Self::Stl, Self::X11, Self::Classical, Self::Seats]
    }

    /// Minimum series length, in multiples of the period, this method
    /// is comfortable with.
    pub fn recommended_cycles(&self) -> usize {
        match self {
            Self::Stl | Self::Seats => 6,
            Self::X11 => 8,
            Self::Classical => 3,
        }
    }
}

impl FromStr for DecompositionMethod {
    type Err = DecompositionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "stl" => Ok(Self::Stl),
            "x11" => Ok(Self::X11),
            "classical" => Ok(Self::Classical),
            "seats" => Ok(Self::Seats),
            other => Err(DecompositionError::UnsupportedMethod(other.to_string())),
        }
    }
}

impl TryFrom<String> for DecompositionMethod {
    type Error = DecompositionError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for DecompositionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable decomposition configuration.
///
/// Window sizes left unset are derived from the period: trend
/// `ceil(1.5 * period)`, low-pass `ceil(period / 2)`, seasonal 7.
///
/// # Example
/// ```
/// use anofox_decompose::decomposition::{DecompositionMethod, DecompositionParams};
///
/// let params = DecompositionParams::new(12)
///     .with_method(DecompositionMethod::Classical)
///     .with_forecast_periods(6);
/// assert_eq!(params.trend_window(), 18);
/// assert_eq!(params.low_pass_window(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DecompositionParams {
    pub period: usize,
    pub model: DecompositionModel,
    pub method: DecompositionMethod,
    pub robust: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasonal_window: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_window: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_pass_window: Option<usize>,
    pub forecast_periods: usize,
    pub confidence_level: f64,
}

impl Default for DecompositionParams {
    fn default() -> Self {
        Self::new(12)
    }
}

impl DecompositionParams {
    /// Additive STL with derived windows and no forecast.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            model: DecompositionModel::Additive,
            method: DecompositionMethod::Stl,
            robust: false,
            seasonal_window: None,
            trend_window: None,
            low_pass_window: None,
            forecast_periods: 0,
            confidence_level: 0.95,
        }
    }

    pub fn with_model(mut self, model: DecompositionModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_method(mut self, method: DecompositionMethod) -> Self {
        self.method = method;
        self
    }

    /// Select the method by name; unknown names are `UnsupportedMethod`.
    pub fn with_method_name(self, name: &str) -> Result<Self> {
        Ok(self.with_method(name.parse()?))
    }

    pub fn robust(mut self) -> Self {
        self.robust = true;
        self
    }

    pub fn with_seasonal_window(mut self, window: usize) -> Self {
        self.seasonal_window = Some(window);
        self
    }

    pub fn with_trend_window(mut self, window: usize) -> Self {
        self.trend_window = Some(window);
        self
    }

    pub fn with_low_pass_window(mut self, window: usize) -> Self {
        self.low_pass_window = Some(window);
        self
    }

    pub fn with_forecast_periods(mut self, periods: usize) -> Self {
        self.forecast_periods = periods;
        self
    }

    pub fn with_confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level;
        self
    }

    /// Cycle-subseries smoothing window.
    pub fn seasonal_window(&self) -> usize {
        self.seasonal_window.unwrap_or(DEFAULT_SEASONAL_WINDOW)
    }

    /// Trend smoothing window, `ceil(1.5 * period)` by default.
    pub fn trend_window(&self) -> usize {
        self.trend_window
            .unwrap_or_else(|| (self.period * 3).div_ceil(2))
    }

    /// Low-pass filter window, `ceil(period / 2)` by default.
    pub fn low_pass_window(&self) -> usize {
        self.low_pass_window
            .unwrap_or_else(|| self.period.div_ceil(2))
    }

    /// Minimum series length for any decomposition: two full periods.
    pub fn min_length(&self) -> usize {
        self.period.saturating_mul(2)
    }

    /// Check parameter ranges without looking at data.
    pub fn validate(&self) -> Result<()> {
        if self.period < 2 {
            return Err(DecompositionError::InvalidParameter(format!(
                "period must be at least 2, got {}",
                self.period
            )));
        }
        for (name, window) in [
            ("seasonalWindow", self.seasonal_window),
            ("trendWindow", self.trend_window),
            ("lowPassWindow", self.low_pass_window),
        ] {
            if window == Some(0) {
                return Err(DecompositionError::InvalidParameter(format!(
                    "{} must be a positive integer",
                    name
                )));
            }
        }
        if !(MIN_CONFIDENCE_LEVEL..=MAX_CONFIDENCE_LEVEL).contains(&self.confidence_level) {
            return Err(DecompositionError::InvalidParameter(format!(
                "confidenceLevel must be within [{:.2}, {:.2}], got {}",
                MIN_CONFIDENCE_LEVEL, MAX_CONFIDENCE_LEVEL, self.confidence_level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_windows_follow_period() {
        let params = DecompositionParams::new(12);
        assert_eq!(params.trend_window(), 18);
        assert_eq!(params.low_pass_window(), 6);
        assert_eq!(params.seasonal_window(), 7);

        let params = DecompositionParams::new(7);
        assert_eq!(params.trend_window(), 11); // ceil(10.5)
        assert_eq!(params.low_pass_window(), 4); // ceil(3.5)
    }

    #[test]
    fn explicit_windows_override_defaults() {
        let params = DecompositionParams::new(4)
            .with_trend_window(9)
            .with_low_pass_window(3)
            .with_seasonal_window(5);
        assert_eq!(params.trend_window(), 9);
        assert_eq!(params.low_pass_window(), 3);
        assert_eq!(params.seasonal_window(), 5);
    }

    #[test]
    fn method_names_parse_case_insensitively() {
        assert_eq!("STL".parse::<DecompositionMethod>().unwrap(), DecompositionMethod::Stl);
        assert_eq!("x11".parse::<DecompositionMethod>().unwrap(), DecompositionMethod::X11);
        assert_eq!(
            " Classical ".parse::<DecompositionMethod>().unwrap(),
            DecompositionMethod::Classical
        );
        assert_eq!("seats".parse::<DecompositionMethod>().unwrap(), DecompositionMethod::Seats);
        let err = "arima".parse::<DecompositionMethod>().unwrap_err();
        assert_eq!(err, DecompositionError::UnsupportedMethod("arima".to_string()));
    }

    #[test]
    fn with_method_name_reports_unsupported() {
        let err = DecompositionParams::new(4).with_method_name("prophet").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::UnsupportedMethod);
    }

    #[test]
    fn validate_rejects_bad_parameters() {
        assert!(DecompositionParams::new(2).validate().is_ok());
        assert!(matches!(
            DecompositionParams::new(1).validate(),
            Err(DecompositionError::InvalidParameter(_))
        ));
        assert!(DecompositionParams::new(4).with_trend_window(0).validate().is_err());
        assert!(DecompositionParams::new(4)
            .with_confidence_level(0.5)
            .validate()
            .is_err());
        assert!(DecompositionParams::new(4)
            .with_confidence_level(0.99)
            .validate()
            .is_ok());
    }

    #[test]
    fn params_deserialize_from_camel_case_json() {
        let params: DecompositionParams = serde_json::from_value(json!({
            "period": 4,
            "model": "Multiplicative",
            "method": "x11",
            "trendWindow": 5,
            "forecastPeriods": 3,
            "confidenceLevel": 0.9
        }))
        .unwrap();
        assert_eq!(params.period, 4);
        assert_eq!(params.model, DecompositionModel::Multiplicative);
        assert_eq!(params.method, DecompositionMethod::X11);
        assert_eq!(params.trend_window(), 5);
        assert_eq!(params.low_pass_window(), 2);
        assert_eq!(params.forecast_periods, 3);
        assert!(!params.robust);
    }

    #[test]
    fn unknown_method_fails_deserialization() {
        let result: std::result::Result<DecompositionParams, _> =
            serde_json::from_value(json!({"period": 4, "method": "arima"}));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("unsupported method: arima"));
    }

    #[test]
    fn enums_serialize_lowercase() {
        assert_eq!(
            serde_json::to_value(DecompositionMethod::Classical).unwrap(),
            json!("classical")
        );
        assert_eq!(
            serde_json::to_value(DecompositionModel::Multiplicative).unwrap(),
            json!("multiplicative")
        );
    }
}
