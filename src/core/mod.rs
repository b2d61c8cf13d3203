//! Core data structures: input series and forecast results.

mod forecast;
mod time_series;

pub use forecast::{ConfidenceInterval, ForecastPoint, ForecastResult, ResidualInterval};
pub use time_series::{DataPoint, SeriesInput, TimeSeries, Timestamp};
