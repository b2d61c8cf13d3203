//! Input validation and diagnostics for decomposition requests.

mod checks;

pub use checks::{
    validate, validate_values, ValidationReport, HIGH_VARIATION_THRESHOLD,
    OUTLIER_WARNING_PERCENT,
};
