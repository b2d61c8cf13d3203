//! Request and response types for the four service operations.
//!
//! Each handler is a pure function of its request. Decompose, Recommend and
//! Validate use camelCase field names; Advanced Forecast uses snake_case.

use crate::core::{ConfidenceInterval, ForecastPoint, ResidualInterval, SeriesInput, TimeSeries};
use crate::decomposition::{
    decompose, recommend, DecompositionMethod, DecompositionModel, DecompositionParams,
    DecompositionResult, QualityMetrics, Recommendation,
};
use crate::error::{DecompositionError, ErrorKind, Result};
use crate::models::{advanced_forecast, EnsembleConfig, EnsembleForecast};
use crate::validation::{validate, ValidationReport};
use serde::{Deserialize, Serialize};

/// Decompose request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecomposeRequest {
    pub data: SeriesInput,
    #[serde(default)]
    pub params: RequestParams,
}

/// Decomposition parameters as they arrive in a request.
///
/// `method` and `model` stay strings until [`RequestParams::resolve`], so an
/// unknown name is reported as a [`DecompositionError`] with its kind
/// instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestParams {
    pub period: usize,
    pub model: String,
    pub method: String,
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

impl Default for RequestParams {
    fn default() -> Self {
        Self::from(&DecompositionParams::default())
    }
}

impl From<&DecompositionParams> for RequestParams {
    fn from(params: &DecompositionParams) -> Self {
        Self {
            period: params.period,
            model: params.model.to_string(),
            method: params.method.to_string(),
            robust: params.robust,
            seasonal_window: params.seasonal_window,
            trend_window: params.trend_window,
            low_pass_window: params.low_pass_window,
            forecast_periods: params.forecast_periods,
            confidence_level: params.confidence_level,
        }
    }
}

impl RequestParams {
    /// Parse the method and model names.
    ///
    /// Unknown methods fail with `UnsupportedMethod`, unknown models with
    /// `InvalidParameter`. Ranges are not checked here.
    pub fn resolve(&self) -> Result<DecompositionParams> {
        let method = self.method.parse()?;
        let model = self.model.parse()?;
        Ok(self.with_names(method, model))
    }

    fn with_names(
        &self,
        method: DecompositionMethod,
        model: DecompositionModel,
    ) -> DecompositionParams {
        DecompositionParams {
            period: self.period,
            model,
            method,
            robust: self.robust,
            seasonal_window: self.seasonal_window,
            trend_window: self.trend_window,
            low_pass_window: self.low_pass_window,
            forecast_periods: self.forecast_periods,
            confidence_level: self.confidence_level,
        }
    }
}

/// Trend, seasonal and residual as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSeries {
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
}

/// Decompose response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecomposeResponse {
    pub method: DecompositionMethod,
    pub model: DecompositionModel,
    pub period: usize,
    pub quality: QualityMetrics,
    pub confidence_intervals: ResidualInterval,
    pub components: ComponentSeries,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Vec<ForecastPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast_intervals: Option<Vec<ConfidenceInterval>>,
}

impl From<DecompositionResult> for DecomposeResponse {
    fn from(result: DecompositionResult) -> Self {
        let (forecast, forecast_intervals) = match result.forecast {
            Some(f) => (Some(f.points), Some(f.intervals)),
            None => (None, None),
        };
        Self {
            method: result.method,
            model: result.model,
            period: result.period,
            quality: result.quality,
            confidence_intervals: result.confidence_interval,
            components: ComponentSeries {
                trend: result.trend,
                seasonal: result.seasonal,
                residual: result.residual,
            },
            forecast,
            forecast_intervals,
        }
    }
}

/// Recommend request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendRequest {
    pub data: SeriesInput,
    pub period: usize,
}

/// Validate request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub data: SeriesInput,
    #[serde(default)]
    pub params: RequestParams,
}

/// Advanced forecast request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedForecastRequest {
    pub data: SeriesInput,
    #[serde(default)]
    pub config: EnsembleConfig,
}

/// Error body carrying the kind for programmatic branching.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&DecompositionError> for ErrorResponse {
    fn from(err: &DecompositionError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// Run a decomposition.
///
/// Parameters are checked before the data is converted, so a bad period is
/// reported even when the data is also malformed.
pub fn handle_decompose(request: &DecomposeRequest) -> Result<DecomposeResponse> {
    let params = request.params.resolve()?;
    params.validate()?;
    let series = TimeSeries::from_input(&request.data)?;
    decompose(&series, &params).map(DecomposeResponse::from)
}

/// Recommend methods for the data.
pub fn handle_recommend(request: &RecommendRequest) -> Result<Recommendation> {
    let series = TimeSeries::from_input(&request.data)?;
    recommend(series.values(), request.period)
}

/// Validate the data against the parameters. Never fails.
///
/// An unknown method or model name becomes the first error. The remaining
/// checks then run with the default for whichever name did not parse.
pub fn handle_validate(request: &ValidateRequest) -> ValidationReport {
    let defaults = DecompositionParams::default();
    let mut name_errors = Vec::new();

    let method = request.params.method.parse().unwrap_or_else(|err: DecompositionError| {
        name_errors.push(err.to_string());
        defaults.method
    });
    let model = request.params.model.parse().unwrap_or_else(|err: DecompositionError| {
        name_errors.push(err.to_string());
        defaults.model
    });

    let mut report = validate(&request.data, &request.params.with_names(method, model));
    if !name_errors.is_empty() {
        name_errors.append(&mut report.errors);
        report.errors = name_errors;
        report.is_valid = false;
    }
    report
}

/// Run the ensemble forecaster.
pub fn handle_advanced_forecast(request: &AdvancedForecastRequest) -> Result<EnsembleForecast> {
    let series = TimeSeries::from_input(&request.data)?;
    advanced_forecast(series.values(), &request.config)
}
