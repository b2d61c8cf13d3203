//! Pre-flight checks of a series against decomposition parameters.
//!
//! Unlike [`crate::decomposition::decompose`], these checks never fail: every
//! problem is collected so callers can show all of them at once.

use crate::core::SeriesInput;
use crate::decomposition::{
    DecompositionMethod, DecompositionModel, DecompositionParams, MAX_CONFIDENCE_LEVEL,
    MIN_CONFIDENCE_LEVEL,
};
use crate::detection::detect_outliers;
use crate::utils::stats::coefficient_of_variation;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Coefficient of variation above which a warning is raised.
pub const HIGH_VARIATION_THRESHOLD: f64 = 1.0;

/// Share of IQR outliers, in percent, above which a warning is raised.
pub const OUTLIER_WARNING_PERCENT: f64 = 5.0;

/// Collected findings. `is_valid` is true exactly when `errors` is empty.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    fn info(&mut self, message: impl Into<String>) {
        self.info.push(message.into());
    }
}

/// Check `input` against `params`.
///
/// # Example
/// ```
/// use anofox_decompose::core::SeriesInput;
/// use anofox_decompose::decomposition::{DecompositionModel, DecompositionParams};
/// use anofox_decompose::validation::validate;
///
/// let input = SeriesInput::from_values(&[-1.0, -2.0, -3.0, -4.0]);
/// let params = DecompositionParams::new(2).with_model(DecompositionModel::Multiplicative);
/// let report = validate(&input, &params);
/// assert!(!report.is_valid);
/// assert!(report.errors.iter().any(|e| e.contains("positive")));
/// ```
pub fn validate(input: &SeriesInput, params: &DecompositionParams) -> ValidationReport {
    let mut report = ValidationReport::default();
    let n = input.len();
    let period = params.period;
    debug!(n, period, method = %params.method, "validating series");

    check_params(params, &mut report);

    if n == 0 {
        report.error("data must contain at least one value");
    }
    let bad = input.non_numeric_indices();
    if let Some(&first) = bad.first() {
        report.error(format!(
            "{} non-numeric value(s) found, first at index {}",
            bad.len(),
            first
        ));
    }
    let values = input.finite_values();

    if period >= 2 {
        if n < params.min_length() {
            report.error(format!(
                "insufficient data: at least {} points (two periods of {}) are required, got {}",
                params.min_length(),
                period,
                n
            ));
        }
        let method = params.method;
        let recommended = period.saturating_mul(method.recommended_cycles());
        if n >= params.min_length() && n < recommended {
            report.warning(format!(
                "{} works best with at least {} points ({} periods), got {}",
                method,
                recommended,
                method.recommended_cycles(),
                n
            ));
        }
        report.info(format!("{} complete cycles of period {}", n / period, period));
    }

    if params.model == DecompositionModel::Multiplicative && values.iter().any(|&v| v <= 0.0) {
        report.error("multiplicative model requires all values to be positive");
    }

    if !values.is_empty() {
        let cv = coefficient_of_variation(&values);
        if cv.is_finite() && cv > HIGH_VARIATION_THRESHOLD {
            report.warning(format!(
                "high coefficient of variation ({:.2}); consider a multiplicative model or a transformation",
                cv
            ));
        }

        let outliers = detect_outliers(&values);
        if outliers.outlier_percentage() > OUTLIER_WARNING_PERCENT {
            report.warning(format!(
                "{:.1}% of values are outliers by the 1.5 x IQR rule",
                outliers.outlier_percentage()
            ));
        }
        report.info(format!("{} outlier(s) detected", outliers.outlier_count()));
    }

    if params.forecast_periods > n / 2 {
        report.warning(format!(
            "forecast horizon {} exceeds half the series length ({})",
            params.forecast_periods, n
        ));
    }
    if params.method == DecompositionMethod::Seats {
        report.warning("seats is served by the stl path; no ARIMA-based extraction is performed");
    }

    report.info(format!("{} data points", n));
    if period >= 2 {
        report.info(format!(
            "windows: seasonal {}, trend {}, low-pass {}",
            params.seasonal_window(),
            params.trend_window(),
            params.low_pass_window()
        ));
    }

    report.is_valid = report.errors.is_empty();
    report
}

/// Validate plain numbers.
pub fn validate_values(values: &[f64], params: &DecompositionParams) -> ValidationReport {
    validate(&SeriesInput::from_values(values), params)
}

fn check_params(params: &DecompositionParams, report: &mut ValidationReport) {
    if params.period < 2 {
        report.error(format!("period must be at least 2, got {}", params.period));
    }
    if !(MIN_CONFIDENCE_LEVEL..=MAX_CONFIDENCE_LEVEL).contains(&params.confidence_level) {
        report.error(format!(
            "confidence level must be within [{:.2}, {:.2}], got {}",
            MIN_CONFIDENCE_LEVEL, MAX_CONFIDENCE_LEVEL, params.confidence_level
        ));
    }
    for (name, window) in [
        ("seasonal window", params.seasonal_window),
        ("trend window", params.trend_window),
        ("low-pass window", params.low_pass_window),
    ] {
        if window == Some(0) {
            report.error(format!("{} must be a positive integer", name));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seasonal(n: usize, period: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 50.0 + (i % period) as f64 + 0.1 * i as f64)
            .collect()
    }

    #[test]
    fn clean_series_is_valid() {
        let report = validate_values(&seasonal(72, 12), &DecompositionParams::new(12));
        assert!(report.is_valid, "{:?}", report.errors);
        assert!(report.warnings.is_empty(), "{:?}", report.warnings);
        assert!(report.info.iter().any(|m| m == "72 data points"));
        assert!(report.info.iter().any(|m| m == "6 complete cycles of period 12"));
        assert!(report.info.iter().any(|m| m == "windows: seasonal 7, trend 18, low-pass 6"));
    }

    #[test]
    fn short_series_is_invalid() {
        let report = validate_values(&seasonal(23, 12), &DecompositionParams::new(12));
        assert!(!report.is_valid);
        assert!(report.errors[0].contains("at least 24 points"));
    }

    #[test]
    fn method_minimum_is_a_warning() {
        let report = validate_values(&seasonal(48, 12), &DecompositionParams::new(12));
        assert!(report.is_valid);
        assert!(report.warnings.iter().any(|w| w.contains("stl works best with at least 72")));

        let params = DecompositionParams::new(12).with_method(DecompositionMethod::Classical);
        let report = validate_values(&seasonal(48, 12), &params);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn non_numeric_entries_are_errors() {
        let input: SeriesInput =
            serde_json::from_value(json!([1.0, "x", 3.0, null, 5.0, 6.0, 7.0, 8.0])).unwrap();
        let report = validate(&input, &DecompositionParams::new(2));
        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|e| e == "2 non-numeric value(s) found, first at index 1"));
    }

    #[test]
    fn multiplicative_needs_positive_values() {
        let values: Vec<f64> = (1..=24).map(|i| -(i as f64)).collect();
        let params = DecompositionParams::new(12).with_model(DecompositionModel::Multiplicative);
        let report = validate_values(&values, &params);
        assert!(!report.is_valid);
        assert!(report
            .errors
            .iter()
            .any(|e| e == "multiplicative model requires all values to be positive"));
    }

    #[test]
    fn empty_data_and_bad_params_all_reported() {
        let params = DecompositionParams::new(1)
            .with_confidence_level(0.5)
            .with_trend_window(0);
        let report = validate_values(&[], &params);
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 4);
    }

    #[test]
    fn high_variation_and_outliers_warn() {
        let mut values = vec![1.0; 40];
        values[5] = 200.0;
        values[15] = 300.0;
        values[25] = 250.0;
        let report = validate_values(&values, &DecompositionParams::new(4));
        assert!(report.is_valid);
        assert!(report.warnings.iter().any(|w| w.contains("coefficient of variation")));
        assert!(report.warnings.iter().any(|w| w.contains("outliers")));
        assert!(report.info.iter().any(|m| m == "3 outlier(s) detected"));
    }

    #[test]
    fn long_horizon_and_seats_warn() {
        let params = DecompositionParams::new(4)
            .with_method(DecompositionMethod::Seats)
            .with_forecast_periods(20);
        let report = validate_values(&seasonal(30, 4), &params);
        assert!(report.is_valid);
        assert!(report.warnings.iter().any(|w| w.contains("forecast horizon 20")));
        assert!(report.warnings.iter().any(|w| w.contains("seats")));
    }

    #[test]
    fn report_serializes_camel_case() {
        let report = validate_values(&seasonal(24, 4), &DecompositionParams::new(4));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["isValid"], true);
        assert!(json["info"].is_array());
    }
}
