//! Decomposition entry point: validation, dispatch and result assembly.

use super::classical::Classical;
use super::components::{Components, Decomposer};
use super::forecast::{confidence_bands, project, residual_interval};
use super::model::{all_positive, fitted_values, from_log_domain, resolve_model, to_log_domain};
use super::params::{DecompositionMethod, DecompositionModel, DecompositionParams};
use super::quality::QualityMetrics;
use super::stl::Stl;
use super::x11::X11;
use crate::core::{ForecastResult, ResidualInterval, TimeSeries};
use crate::error::{DecompositionError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A completed decomposition with its diagnostics.
///
/// For the additive model `trend + seasonal + residual` reproduces the input.
/// For the multiplicative model `trend` is in original units and `seasonal`
/// and `residual` are factors, so `trend * seasonal * residual` does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecompositionResult {
    pub method: DecompositionMethod,
    /// Model actually used, with `auto` resolved.
    pub model: DecompositionModel,
    pub period: usize,
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
    pub quality: QualityMetrics,
    pub confidence_interval: ResidualInterval,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<ForecastResult>,
    /// Last timestamp and median step of the input, for projecting forecasts.
    #[serde(skip)]
    timeline: Option<(i64, i64)>,
}

impl DecompositionResult {
    /// Number of decomposed observations.
    pub fn len(&self) -> usize {
        self.trend.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trend.is_empty()
    }

    /// Trend combined with seasonal under the result's model.
    pub fn fitted(&self) -> Vec<f64> {
        fitted_values(&self.components(), self.model)
    }

    /// The three components as reported.
    pub fn components(&self) -> Components {
        Components {
            trend: self.trend.clone(),
            seasonal: self.seasonal.clone(),
            residual: self.residual.clone(),
        }
    }

    /// Extrapolate `periods` steps with bands at `confidence_level`.
    ///
    /// The band half-width is taken from the spread of `original - fitted`,
    /// recomputed at the requested level.
    pub fn forecast(&self, periods: usize, confidence_level: f64) -> ForecastResult {
        let half_width =
            residual_interval(&self.absolute_residual(), confidence_level).half_width;

        let mut points = match self.model {
            DecompositionModel::Multiplicative => {
                let log_components = Components {
                    trend: self.trend.iter().map(|v| v.ln()).collect(),
                    seasonal: self.seasonal.iter().map(|v| v.ln()).collect(),
                    residual: Vec::new(),
                };
                let mut points = project(&log_components, self.period, periods);
                for p in &mut points {
                    p.trend = p.trend.exp();
                    p.seasonal = p.seasonal.exp();
                    p.value = p.trend * p.seasonal;
                }
                points
            }
            _ => project(&self.components(), self.period, periods),
        };

        if let Some((last, step)) = self.timeline {
            for (offset, p) in points.iter_mut().enumerate() {
                p.timestamp = Some(last + step * (offset as i64 + 1));
            }
        }

        let intervals = confidence_bands(&points, half_width);
        ForecastResult { points, intervals }
    }

    fn absolute_residual(&self) -> Vec<f64> {
        absolute_residual(&self.components(), self.model)
    }
}

/// `original - fitted` in original units, whatever the model.
fn absolute_residual(components: &Components, model: DecompositionModel) -> Vec<f64> {
    match model {
        DecompositionModel::Multiplicative => components
            .trend
            .iter()
            .zip(&components.seasonal)
            .zip(&components.residual)
            .map(|((t, s), r)| t * s * r - t * s)
            .collect(),
        _ => components.residual.clone(),
    }
}

/// Decompose `series` according to `params`.
///
/// Checks run before any algorithm, in order: parameter ranges, series
/// length of at least two periods, then positivity for the multiplicative
/// model. Finiteness is guaranteed by [`TimeSeries`].
///
/// # Example
/// ```
/// use anofox_decompose::core::TimeSeries;
/// use anofox_decompose::decomposition::{decompose, DecompositionMethod, DecompositionParams};
///
/// let values = vec![10.0, 12.0, 14.0, 10.0, 12.0, 14.0, 10.0, 12.0, 14.0];
/// let series = TimeSeries::new(values).unwrap();
/// let params = DecompositionParams::new(3).with_method(DecompositionMethod::Classical);
/// let result = decompose(&series, &params).unwrap();
/// assert_eq!(result.seasonal.len(), 9);
/// ```
pub fn decompose(series: &TimeSeries, params: &DecompositionParams) -> Result<DecompositionResult> {
    params.validate()?;
    let values = series.values();
    let period = params.period;
    debug!(
        n = values.len(),
        period,
        method = %params.method,
        model = %params.model,
        "decomposing series"
    );

    if values.len() < params.min_length() {
        return Err(DecompositionError::InsufficientData {
            needed: params.min_length(),
            got: values.len(),
        });
    }
    if params.model == DecompositionModel::Multiplicative && !all_positive(values) {
        return Err(DecompositionError::InvalidModel(
            "multiplicative model requires all values to be positive".to_string(),
        ));
    }

    let model = resolve_model(values, period, params.model);
    let decomposer = decomposer_for(params);

    let (components, quality) = match model {
        DecompositionModel::Multiplicative => {
            let logs = to_log_domain(values);
            let log_components = decomposer.decompose(&logs);
            let quality = QualityMetrics::compute(&logs, &log_components);
            (from_log_domain(&log_components), quality)
        }
        _ => {
            let components = decomposer.decompose(values);
            let quality = QualityMetrics::compute(values, &components);
            (components, quality)
        }
    };

    let timeline = series
        .timestamps()
        .and_then(|ts| ts.last().copied())
        .zip(series.timestamp_step());

    let confidence_interval =
        residual_interval(&absolute_residual(&components, model), params.confidence_level);

    let mut result = DecompositionResult {
        method: params.method,
        model,
        period,
        trend: components.trend,
        seasonal: components.seasonal,
        residual: components.residual,
        quality,
        confidence_interval,
        forecast: None,
        timeline,
    };

    if params.forecast_periods > 0 {
        result.forecast = Some(result.forecast(params.forecast_periods, params.confidence_level));
    }

    debug!(
        overall = result.quality.overall,
        half_width = result.confidence_interval.half_width,
        "decomposition complete"
    );
    Ok(result)
}

/// Decompose a plain slice of values.
pub fn decompose_values(values: &[f64], params: &DecompositionParams) -> Result<DecompositionResult> {
    params.validate()?;
    let series = TimeSeries::new(values.to_vec())?;
    decompose(&series, params)
}

/// Algorithm for the requested method, with windows resolved from `params`.
pub fn decomposer_for(params: &DecompositionParams) -> Box<dyn Decomposer> {
    let period = params.period;
    match params.method {
        DecompositionMethod::Stl | DecompositionMethod::Seats => {
            if params.method == DecompositionMethod::Seats {
                warn!("seats is served by the stl path; no ARIMA-based extraction is performed");
            }
            if params.trend_window.is_none() || params.low_pass_window.is_none() {
                debug!(
                    trend_window = params.trend_window(),
                    low_pass_window = params.low_pass_window(),
                    seasonal_window = params.seasonal_window(),
                    "derived default stl windows"
                );
            }
            Box::new(
                Stl::new(period)
                    .with_seasonal_window(params.seasonal_window())
                    .with_trend_window(params.trend_window())
                    .with_low_pass_window(params.low_pass_window())
                    .with_robust(params.robust),
            )
        }
        DecompositionMethod::X11 => Box::new(X11::new(period)),
        DecompositionMethod::Classical => Box::new(Classical::new(period)),
    }
}
