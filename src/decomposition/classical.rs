//! Classical moving-average decomposition.

use super::components::{Components, Decomposer};
use super::seasonal::centered_group_mean_seasonal;
use super::trend::TrendSmoother;

/// Classical decomposition: centred moving average trend over a
/// forced-odd window, then re-centred group means as the seasonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classical {
    period: usize,
}

impl Classical {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Decomposer for Classical {
    fn decompose(&self, series: &[f64]) -> Components {
        let trend = TrendSmoother::CenteredMovingAverage(self.period).smooth(series);
        let detrended: Vec<f64> = series.iter().zip(&trend).map(|(y, t)| y - t).collect();
        let seasonal = centered_group_mean_seasonal(&detrended, self.period);
        Components::from_trend_and_seasonal(series, trend, seasonal)
    }

    fn name(&self) -> &str {
        "classical"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn repeating_triplet_scenario() {
        let series = [10.0, 12.0, 14.0, 10.0, 12.0, 14.0, 10.0, 12.0, 14.0, 10.0, 12.0, 14.0];
        let result = Classical::new(3).decompose(&series);

        // Interior trend sits on the overall level
        for i in 1..11 {
            assert_relative_eq!(result.trend[i], 12.0, epsilon = 1e-12);
        }
        // Boundary-clipped windows pull the ends towards their neighbours
        assert_relative_eq!(result.trend[0], 11.0, epsilon = 1e-12);
        assert_relative_eq!(result.trend[11], 13.0, epsilon = 1e-12);

        assert_relative_eq!(result.seasonal[0], -1.75, epsilon = 1e-12);
        assert_relative_eq!(result.seasonal[1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(result.seasonal[2], 1.75, epsilon = 1e-12);
        let mean = result.seasonal.iter().sum::<f64>() / 12.0;
        assert_relative_eq!(mean, 0.0, epsilon = 1e-12);

        for r in &result.residual {
            assert!(r.abs() <= 0.75 + 1e-12);
        }
    }

    #[test]
    fn even_period_uses_odd_window() {
        let series: Vec<f64> = (0..24).map(|i| [0.0, 4.0, 0.0, -4.0][i % 4] + 100.0).collect();
        let result = Classical::new(4).decompose(&series);
        // Window of 5 over the interior: one full cycle plus one repeated phase
        assert_relative_eq!(result.trend[2], 100.0, epsilon = 1e-12);
        for (y, r) in series.iter().zip(result.reconstruct()) {
            assert!((y - r).abs() < 1e-9);
        }
    }
}
