//! TimeSeries data structure and the loosely typed input it is built from.

use crate::error::{DecompositionError, Result};
use crate::utils::stats::median;
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A timestamp as supplied by callers: an integer (index or epoch
/// milliseconds) or an RFC 3339 string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Epoch(i64),
    Text(String),
}

impl Timestamp {
    /// Resolve to an integer; RFC 3339 strings become epoch milliseconds.
    pub fn to_millis(&self) -> Result<i64> {
        match self {
            Self::Epoch(v) => Ok(*v),
            Self::Text(s) => DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.timestamp_millis())
                .map_err(|e| {
                    DecompositionError::InvalidData(format!("unparseable timestamp '{}': {}", s, e))
                }),
        }
    }
}

/// One observation as received from the service layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Timestamp>,
    #[serde(default)]
    pub value: Value,
}

/// Series input: either bare values or `{timestamp?, value}` points.
///
/// Values are kept as raw JSON so that non-numeric entries can be reported
/// rather than rejected by deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesInput {
    Points(Vec<DataPoint>),
    Values(Vec<Value>),
}

impl SeriesInput {
    /// Wrap plain numbers.
    pub fn from_values(values: &[f64]) -> Self {
        Self::Values(values.iter().map(|&v| Value::from(v)).collect())
    }

    /// Number of entries, numeric or not.
    pub fn len(&self) -> usize {
        match self {
            Self::Points(p) => p.len(),
            Self::Values(v) => v.len(),
        }
    }

    /// Whether the input has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Each entry as a finite number, or `None` when it is not one.
    pub fn numeric_values(&self) -> Vec<Option<f64>> {
        let as_number = |v: &Value| v.as_f64().filter(|x| x.is_finite());
        match self {
            Self::Points(points) => points.iter().map(|p| as_number(&p.value)).collect(),
            Self::Values(values) => values.iter().map(as_number).collect(),
        }
    }

    /// Indices of entries that are not finite numbers.
    pub fn non_numeric_indices(&self) -> Vec<usize> {
        self.numeric_values()
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    /// The finite numeric entries, skipping anything else.
    pub fn finite_values(&self) -> Vec<f64> {
        self.numeric_values().into_iter().flatten().collect()
    }
}

/// An ordered, finite-valued series with optional timestamps.
///
/// Insertion order is time order. Timestamps, when present, have the same
/// length as the values and are strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    values: Vec<f64>,
    timestamps: Option<Vec<i64>>,
}

impl TimeSeries {
    /// Build from numeric values, rejecting non-finite entries.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        check_finite(&values)?;
        Ok(Self {
            values,
            timestamps: None,
        })
    }

    /// Build from values paired with integer timestamps.
    pub fn with_timestamps(values: Vec<f64>, timestamps: Vec<i64>) -> Result<Self> {
        check_finite(&values)?;
        if timestamps.len() != values.len() {
            return Err(DecompositionError::InvalidData(format!(
                "timestamp count {} does not match value count {}",
                timestamps.len(),
                values.len()
            )));
        }
        if let Some(i) = timestamps.windows(2).position(|w| w[1] <= w[0]) {
            return Err(DecompositionError::InvalidData(format!(
                "timestamps must be strictly increasing (index {})",
                i + 1
            )));
        }
        Ok(Self {
            values,
            timestamps: Some(timestamps),
        })
    }

    /// Convert service-layer input, reporting non-numeric entries and
    /// malformed timestamps as [`DecompositionError::InvalidData`].
    pub fn from_input(input: &SeriesInput) -> Result<Self> {
        let numeric = input.numeric_values();
        let bad = input.non_numeric_indices();
        if let Some(&first) = bad.first() {
            return Err(DecompositionError::InvalidData(format!(
                "{} non-numeric or non-finite value(s), first at index {}",
                bad.len(),
                first
            )));
        }
        let values: Vec<f64> = numeric.into_iter().flatten().collect();

        let SeriesInput::Points(points) = input else {
            return Self::new(values);
        };

        let present = points.iter().filter(|p| p.timestamp.is_some()).count();
        if present == 0 {
            return Self::new(values);
        }
        if present != points.len() {
            return Err(DecompositionError::InvalidData(
                "timestamps must be given for every point or for none".to_string(),
            ));
        }
        let timestamps = points
            .iter()
            .filter_map(|p| p.timestamp.as_ref())
            .map(Timestamp::to_millis)
            .collect::<Result<Vec<_>>>()?;
        Self::with_timestamps(values, timestamps)
    }

    /// The observed values.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The timestamps, if supplied.
    pub fn timestamps(&self) -> Option<&[i64]> {
        self.timestamps.as_deref()
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series has no observations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Median spacing between consecutive timestamps.
    pub fn timestamp_step(&self) -> Option<i64> {
        let ts = self.timestamps.as_ref()?;
        if ts.len() < 2 {
            return None;
        }
        let diffs: Vec<f64> = ts.windows(2).map(|w| (w[1] - w[0]) as f64).collect();
        Some(median(&diffs).round() as i64)
    }

    /// Timestamp `offset + 1` steps past the last observation.
    pub fn projected_timestamp(&self, offset: usize) -> Option<i64> {
        let last = *self.timestamps.as_ref()?.last()?;
        let step = self.timestamp_step()?;
        Some(last + step * (offset as i64 + 1))
    }
}

fn check_finite(values: &[f64]) -> Result<()> {
    let bad: Vec<usize> = values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_finite())
        .map(|(i, _)| i)
        .collect();
    match bad.first() {
        Some(&first) => Err(DecompositionError::InvalidData(format!(
            "{} non-numeric or non-finite value(s), first at index {}",
            bad.len(),
            first
        ))),
        None => Ok(()),
    }
}
