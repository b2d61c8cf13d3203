//! Trend estimation by window smoothing.

use crate::transform::window::{
    centered_moving_average, henderson_smooth, moving_average, rolling_median,
};

/// Smallest Henderson window used by X11.
pub const MIN_HENDERSON_WINDOW: usize = 13;

/// Window smoother used to extract a trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendSmoother {
    /// Plain centred moving average of the given width.
    MovingAverage(usize),
    /// Centred moving average over a forced-odd window derived from a period.
    CenteredMovingAverage(usize),
    /// Running median of the given width.
    Median(usize),
    /// Henderson-weighted average over a window of the given size.
    Henderson(usize),
}

impl TrendSmoother {
    /// Henderson window for X11: `max(period + 1, 13)`.
    pub fn henderson_for_period(period: usize) -> Self {
        Self::Henderson((period + 1).max(MIN_HENDERSON_WINDOW))
    }

    /// Smooth `series` into a trend of the same length.
    pub fn smooth(&self, series: &[f64]) -> Vec<f64> {
        match *self {
            Self::MovingAverage(width) => moving_average(series, width),
            Self::CenteredMovingAverage(period) => centered_moving_average(series, period),
            Self::Median(width) => rolling_median(series, width),
            Self::Henderson(size) => henderson_smooth(series, size),
        }
    }
}

/// Estimate the trend of `series` with `smoother`.
pub fn estimate_trend(series: &[f64], smoother: TrendSmoother) -> Vec<f64> {
    smoother.smooth(series)
}
