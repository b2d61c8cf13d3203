//! Additive component triple and the decomposer interface.

use serde::Serialize;

/// Trend, seasonal and residual series of equal length.
///
/// For the additive algorithms `trend[i] + seasonal[i] + residual[i]`
/// reproduces the input at every index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Components {
    pub trend: Vec<f64>,
    pub seasonal: Vec<f64>,
    pub residual: Vec<f64>,
}

impl Components {
    /// Assemble components, deriving the residual as `series - trend - seasonal`.
    pub fn from_trend_and_seasonal(series: &[f64], trend: Vec<f64>, seasonal: Vec<f64>) -> Self {
        let residual = series
            .iter()
            .zip(&trend)
            .zip(&seasonal)
            .map(|((y, t), s)| y - t - s)
            .collect();
        Self {
            trend,
            seasonal,
            residual,
        }
    }

    /// Series length.
    pub fn len(&self) -> usize {
        self.trend.len()
    }

    /// Whether the components are empty.
    pub fn is_empty(&self) -> bool {
        self.trend.is_empty()
    }

    /// `trend + seasonal + residual` at each index.
    pub fn reconstruct(&self) -> Vec<f64> {
        self.trend
            .iter()
            .zip(&self.seasonal)
            .zip(&self.residual)
            .map(|((t, s), r)| t + s + r)
            .collect()
    }
}

/// A named additive decomposition algorithm.
///
/// Implementations are stateless configurations; `decompose` is a pure
/// function of the series. Input validation happens before this is called.
pub trait Decomposer {
    /// Split `series` into additive components.
    fn decompose(&self, series: &[f64]) -> Components;

    /// Short algorithm name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residual_closes_the_sum() {
        let series = [5.0, 7.0, 9.0];
        let components =
            Components::from_trend_and_seasonal(&series, vec![4.0, 6.0, 8.0], vec![0.5, -0.5, 0.0]);
        assert_eq!(components.residual, vec![0.5, 1.5, 1.0]);
        assert_eq!(components.reconstruct(), series.to_vec());
        assert_eq!(components.len(), 3);
    }
}
