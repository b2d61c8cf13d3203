//! STL-style decomposition with median-smoothed trend.
//!
//! 1. Initial trend: running median of the raw series.
//! 2. Cycle-subseries of the detrended series are smoothed by moving average.
//! 3. The smoothed subseries minus their low-pass filter is the seasonal.
//! 4. The final trend is the running median of the deseasonalized series.
//!
//! With robustness enabled a second pass weights every cycle-subseries
//! observation by a bisquare function of the first-pass residual.

use super::components::{Components, Decomposer};
use super::seasonal::stl_seasonal;
use super::trend::TrendSmoother;
use crate::utils::stats::{is_negligible, mean_square, median};

/// Bisquare cut-off in multiples of the median absolute residual.
const ROBUSTNESS_SCALE: f64 = 6.0;

/// STL decomposition configuration and algorithm.
#[derive(Debug, Clone, PartialEq)]
pub struct Stl {
    /// Seasonal period.
    period: usize,
    /// Cycle-subseries moving average width.
    seasonal_window: usize,
    /// Running median width for the trend.
    trend_window: usize,
    /// Low-pass moving average width.
    low_pass_window: usize,
    /// Use robustness weights.
    robust: bool,
}

impl Stl {
    /// STL with default windows for `period`.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            seasonal_window: super::params::DEFAULT_SEASONAL_WINDOW,
            trend_window: (period * 3).div_ceil(2),
            low_pass_window: period.div_ceil(2),
            robust: false,
        }
    }

    pub fn with_seasonal_window(mut self, window: usize) -> Self {
        self.seasonal_window = window;
        self
    }

    pub fn with_trend_window(mut self, window: usize) -> Self {
        self.trend_window = window;
        self
    }

    pub fn with_low_pass_window(mut self, window: usize) -> Self {
        self.low_pass_window = window;
        self
    }

    /// Enable the robustness pass.
    pub fn robust(mut self) -> Self {
        self.robust = true;
        self
    }

    pub fn with_robust(mut self, robust: bool) -> Self {
        self.robust = robust;
        self
    }

    pub fn period(&self) -> usize {
        self.period
    }

    fn single_pass(&self, series: &[f64], weights: Option<&[f64]>) -> Components {
        let smoother = TrendSmoother::Median(self.trend_window);

        let initial_trend = smoother.smooth(series);
        let detrended: Vec<f64> = series
            .iter()
            .zip(&initial_trend)
            .map(|(y, t)| y - t)
            .collect();

        let seasonal = stl_seasonal(
            &detrended,
            self.period,
            self.seasonal_window,
            self.low_pass_window,
            weights,
        );

        let deseasonalized: Vec<f64> = series.iter().zip(&seasonal).map(|(y, s)| y - s).collect();
        let trend = smoother.smooth(&deseasonalized);

        Components::from_trend_and_seasonal(series, trend, seasonal)
    }
}

impl Default for Stl {
    fn default() -> Self {
        Self::new(12) // Monthly seasonality default
    }
}

impl Decomposer for Stl {
    fn decompose(&self, series: &[f64]) -> Components {
        let first = self.single_pass(series, None);
        if !self.robust {
            return first;
        }
        let weights = robustness_weights(&first.residual, mean_square(series));
        self.single_pass(series, Some(&weights))
    }

    fn name(&self) -> &str {
        "stl"
    }
}

/// Bisquare weights from residuals: `(1 - (r / h)²)²` with `h = 6 · median|r|`.
///
/// `scale` is the mean square of the decomposed series. All weights are 1
/// when `h` is rounding noise relative to it (or not finite).
pub fn robustness_weights(residual: &[f64], scale: f64) -> Vec<f64> {
    let abs_residual: Vec<f64> = residual.iter().map(|r| r.abs()).collect();
    let h = ROBUSTNESS_SCALE * median(&abs_residual);
    let flat = !h.is_finite() || is_negligible(h * h, scale);

    residual
        .iter()
        .map(|r| {
            if flat {
                return 1.0;
            }
            let u = r.abs() / h;
            if u < 1.0 {
                (1.0 - u * u).powi(2)
            } else {
                0.0
            }
        })
        .collect()
}
