//! Ordinary least squares fits of a series against its index.
//!
//! The decomposition forecaster uses [`linear_slope`] to extrapolate trend;
//! the ensemble engine uses [`linear_fit`] and [`polynomial_fit`].

/// Fitted line `value = slope * index + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluate the line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// OLS fit of `values` against indices `0..n`.
///
/// The slope is 0 for fewer than two points or a zero denominator, in which
/// case the intercept is the mean.
pub fn linear_fit(values: &[f64]) -> LinearFit {
    let n = values.len();
    if n == 0 {
        return LinearFit {
            slope: 0.0,
            intercept: 0.0,
        };
    }
    let nf = n as f64;
    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
    for (i, &y) in values.iter().enumerate() {
        let x = i as f64;
        sum_x += x;
        sum_y += y;
        sum_xy += x * y;
        sum_xx += x * x;
    }

    let denominator = nf * sum_xx - sum_x * sum_x;
    if n < 2 || denominator.abs() < 1e-12 {
        return LinearFit {
            slope: 0.0,
            intercept: sum_y / nf,
        };
    }

    let slope = (nf * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / nf;
    LinearFit { slope, intercept }
}

/// OLS slope of `values` against indices `0..n`.
pub fn linear_slope(values: &[f64]) -> f64 {
    linear_fit(values).slope
}

/// Least-squares polynomial of fixed degree fitted against the index.
///
/// Coefficients are stored for the mean-centred index `t = x - center`,
/// lowest order first.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialFit {
    pub coefficients: Vec<f64>,
    pub center: f64,
}

impl PolynomialFit {
    /// Evaluate the polynomial at index `x`.
    pub fn predict(&self, x: f64) -> f64 {
        let t = x - self.center;
        // Horner
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, &c| acc * t + c)
    }
}

/// Least-squares polynomial fit of `values` against indices `0..n`.
///
/// Solves the normal equations on mean-centred indices by Gaussian
/// elimination with partial pivoting. Returns `None` when the system is
/// singular (fewer distinct points than coefficients).
pub fn polynomial_fit(values: &[f64], degree: usize) -> Option<PolynomialFit> {
    let n = values.len();
    let size = degree + 1;
    if n < size {
        return None;
    }

    let center = (n - 1) as f64 / 2.0;

    // Power sums: s[k] = sum t^k for k in 0..=2*degree, b[k] = sum t^k y
    let mut s = vec![0.0; 2 * degree + 1];
    let mut b = vec![0.0; size];
    for (i, &y) in values.iter().enumerate() {
        let t = i as f64 - center;
        let mut p = 1.0;
        for (k, sk) in s.iter_mut().enumerate() {
            *sk += p;
            if k < size {
                b[k] += p * y;
            }
            p *= t;
        }
    }

    let mut matrix: Vec<Vec<f64>> = (0..size)
        .map(|r| (0..size).map(|c| s[r + c]).collect())
        .collect();

    let coefficients = solve_linear_system(&mut matrix, &mut b)?;
    Some(PolynomialFit {
        coefficients,
        center,
    })
}

/// Solve `a · x = b` in place with partial pivoting.
fn solve_linear_system(a: &mut [Vec<f64>], b: &mut [f64]) -> Option<Vec<f64>> {
    let size = b.len();
    let scale = a
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0_f64, |m, v| m.max(v.abs()))
        .max(1.0);

    for col in 0..size {
        let pivot = (col..size).max_by(|&i, &j| {
            a[i][col]
                .abs()
                .partial_cmp(&a[j][col].abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;
        if a[pivot][col].abs() < 1e-12 * scale {
            return None;
        }
        a.swap(col, pivot);
        b.swap(col, pivot);

        for row in (col + 1)..size {
            let factor = a[row][col] / a[col][col];
            for k in col..size {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = vec![0.0; size];
    for row in (0..size).rev() {
        let tail: f64 = ((row + 1)..size).map(|k| a[row][k] * x[k]).sum();
        x[row] = (b[row] - tail) / a[row][row];
    }
    Some(x)
}
