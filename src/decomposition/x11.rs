//! X11-style decomposition: Henderson-weighted trend, single-pass
//! group-mean seasonal.

use super::components::{Components, Decomposer};
use super::seasonal::group_mean_seasonal;
use super::trend::TrendSmoother;

/// X11 decomposition for a given period.
///
/// The Henderson window is `max(period + 1, 13)`. There is no low-pass
/// correction and the seasonal group means are not re-centred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct X11 {
    period: usize,
}

impl X11 {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }

    /// Smoother used for the trend.
    pub fn trend_smoother(&self) -> TrendSmoother {
        TrendSmoother::henderson_for_period(self.period)
    }
}

impl Decomposer for X11 {
    fn decompose(&self, series: &[f64]) -> Components {
        let trend = self.trend_smoother().smooth(series);
        let detrended: Vec<f64> = series.iter().zip(&trend).map(|(y, t)| y - t).collect();
        let seasonal = group_mean_seasonal(&detrended, self.period);
        Components::from_trend_and_seasonal(series, trend, seasonal)
    }

    fn name(&self) -> &str {
        "x11"
    }
}
