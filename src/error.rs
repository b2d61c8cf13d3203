//! Error types for the anofox-decompose library.

use serde::Serialize;
use thiserror::Error;

/// Result type alias for decomposition and forecasting operations.
pub type Result<T> = std::result::Result<T, DecompositionError>;

/// Errors surfaced before any algorithm runs.
///
/// Numeric edge cases inside the algorithms (empty windows, zero variance,
/// zero denominators) never produce an error; they fall back to a safe value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecompositionError {
    /// Series too short for the requested operation.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Non-numeric or non-finite values, or malformed timestamps.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Model incompatible with the data (e.g. multiplicative with non-positive values).
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// Out-of-range configuration value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unrecognized decomposition or forecasting method name.
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),

    /// A forecaster was asked to predict before being fitted.
    #[error("model must be fitted before prediction")]
    FitRequired,
}

/// Discriminant of [`DecompositionError`], for branching without string matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    InsufficientData,
    InvalidData,
    InvalidModel,
    InvalidParameter,
    UnsupportedMethod,
    FitRequired,
}

impl DecompositionError {
    /// The kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InsufficientData { .. } => ErrorKind::InsufficientData,
            Self::InvalidData(_) => ErrorKind::InvalidData,
            Self::InvalidModel(_) => ErrorKind::InvalidModel,
            Self::InvalidParameter(_) => ErrorKind::InvalidParameter,
            Self::UnsupportedMethod(_) => ErrorKind::UnsupportedMethod,
            Self::FitRequired => ErrorKind::FitRequired,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = DecompositionError::InsufficientData { needed: 24, got: 10 };
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 24, got 10"
        );

        let err = DecompositionError::InvalidModel(
            "multiplicative model requires all values to be positive".to_string(),
        );
        assert_eq!(
            err.to_string(),
            "invalid model: multiplicative model requires all values to be positive"
        );

        let err = DecompositionError::UnsupportedMethod("arima".to_string());
        assert_eq!(err.to_string(), "unsupported method: arima");
    }

    #[test]
    fn kind_matches_variant() {
        assert_eq!(
            DecompositionError::InsufficientData { needed: 3, got: 2 }.kind(),
            ErrorKind::InsufficientData
        );
        assert_eq!(
            DecompositionError::InvalidData("nan".into()).kind(),
            ErrorKind::InvalidData
        );
        assert_eq!(
            DecompositionError::InvalidParameter("period".into()).kind(),
            ErrorKind::InvalidParameter
        );
    }

    #[test]
    fn kind_serializes_camel_case() {
        let json = serde_json::to_string(&ErrorKind::UnsupportedMethod).unwrap();
        assert_eq!(json, "\"unsupportedMethod\"");
    }

    #[test]
    fn errors_are_clonable_and_comparable() {
        let err1 = DecompositionError::InvalidData("x".into());
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
