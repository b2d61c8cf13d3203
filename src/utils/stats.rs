//! Statistical primitives shared by the decomposition and forecasting paths.

use std::cmp::Ordering;

/// Confidence levels with a tabulated two-sided z-score.
const Z_TABLE: [(f64, f64); 3] = [(0.90, 1.645), (0.95, 1.96), (0.99, 2.576)];

/// Z-score used when a confidence level is not in the table.
pub const DEFAULT_Z_SCORE: f64 = 1.96;

/// Two-sided z-score for a confidence level.
///
/// This is a lookup table, not an inverse normal CDF: 0.90, 0.95 and 0.99
/// map to 1.645, 1.96 and 2.576, and every other level falls back to 1.96.
/// Output stays compatible with existing consumers of these bands.
///
/// # Example
/// ```
/// use anofox_decompose::utils::z_score;
///
/// assert_eq!(z_score(0.99), 2.576);
/// assert_eq!(z_score(0.85), 1.96);
/// ```
pub fn z_score(confidence_level: f64) -> f64 {
    Z_TABLE
        .iter()
        .find(|(level, _)| (level - confidence_level).abs() < 1e-9)
        .map(|&(_, z)| z)
        .unwrap_or(DEFAULT_Z_SCORE)
}

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance (n denominator). Zero for an empty slice.
pub fn population_variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Mean of the squared values. Zero for an empty slice.
pub fn mean_square(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|x| x * x).sum::<f64>() / values.len() as f64
}

/// Whether `spread` (a variance or sum of squares) is rounding noise
/// relative to `scale`, a quantity of the same units.
///
/// With `scale == 0` only an exact zero counts.
pub fn is_negligible(spread: f64, scale: f64) -> bool {
    spread <= f64::EPSILON * scale
}

/// Population standard deviation. Zero for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    population_variance(values).sqrt()
}

/// Calculate the median of a slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = sorted.len();
    if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Moment skewness `m3 / m2^1.5`. Zero when the values have no spread.
pub fn skewness(values: &[f64]) -> f64 {
    let m2 = population_variance(values);
    if values.is_empty() || is_negligible(m2, mean_square(values)) {
        return 0.0;
    }
    let m = mean(values);
    let m3 = values.iter().map(|x| (x - m).powi(3)).sum::<f64>() / values.len() as f64;
    m3 / m2.powf(1.5)
}

/// Moment kurtosis `m4 / m2^2` (not excess: a Gaussian scores 3).
///
/// Returns 3 when the values have no spread.
pub fn kurtosis(values: &[f64]) -> f64 {
    let m2 = population_variance(values);
    if values.is_empty() || is_negligible(m2, mean_square(values)) {
        return 3.0;
    }
    let m = mean(values);
    let m4 = values.iter().map(|x| (x - m).powi(4)).sum::<f64>() / values.len() as f64;
    m4 / (m2 * m2)
}

/// Linearly interpolated quantile, `q` in [0, 1].
pub fn quantile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let q = q.clamp(0.0, 1.0);
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] * (1.0 - frac) + sorted[upper] * frac
}

/// Coefficient of variation (population std / |mean|). NaN when the mean is
/// zero up to rounding.
pub fn coefficient_of_variation(values: &[f64]) -> f64 {
    let m = mean(values);
    if !m.is_finite() || is_negligible(m * m, mean_square(values)) {
        return f64::NAN;
    }
    std_dev(values) / m.abs()
}

/// Calculate the autocorrelation at a given lag.
pub fn autocorrelation(values: &[f64], lag: usize) -> f64 {
    if values.len() <= lag {
        return f64::NAN;
    }
    let m = mean(values);
    let n = values.len();

    let mut numerator = 0.0;
    let mut denominator = 0.0;

    for i in 0..n {
        denominator += (values[i] - m).powi(2);
        if i >= lag {
            numerator += (values[i] - m) * (values[i - lag] - m);
        }
    }

    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

/// Pearson correlation of two equally long slices. Zero when either is flat.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let (x, y) = (&x[..n], &y[..n]);
    let mx = mean(x);
    let my = mean(y);
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        sxy += (a - mx) * (b - my);
        sxx += (a - mx).powi(2);
        syy += (b - my).powi(2);
    }
    let nf = n as f64;
    if is_negligible(sxx, nf * mean_square(x)) || is_negligible(syy, nf * mean_square(y)) {
        return 0.0;
    }
    sxy / (sxx * syy).sqrt()
}
