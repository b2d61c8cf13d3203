//! Exponential smoothing anchored to the last observation.
//!
//! Every step re-smooths toward the same last observed value,
//! `next = alpha * last + (1 - alpha) * previous`, starting from that value.
//! The recurrence is kept as-is for output compatibility even though a
//! textbook smoother would feed back its own level.

use crate::error::{DecompositionError, Result};
use crate::models::Forecaster;

/// Smoothing factor.
pub const DEFAULT_ALPHA: f64 = 0.3;

/// Anchored exponential smoother.
#[derive(Debug, Clone)]
pub struct AnchoredSmoothing {
    alpha: f64,
    last: Option<f64>,
}

impl Default for AnchoredSmoothing {
    fn default() -> Self {
        Self::new()
    }
}

impl AnchoredSmoothing {
    pub fn new() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            last: None,
        }
    }

    /// Override the smoothing factor.
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl Forecaster for AnchoredSmoothing {
    fn fit(&mut self, values: &[f64]) -> Result<()> {
        let &last = values
            .last()
            .ok_or(DecompositionError::InsufficientData { needed: 1, got: 0 })?;
        self.last = Some(last);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Vec<f64>> {
        let anchor = self.last.ok_or(DecompositionError::FitRequired)?;
        let mut previous = anchor;
        Ok((0..horizon)
            .map(|_| {
                previous = self.alpha * anchor + (1.0 - self.alpha) * previous;
                previous
            })
            .collect())
    }

    fn name(&self) -> &str {
        "exponential"
    }

    fn is_fitted(&self) -> bool {
        self.last.is_some()
    }
}
