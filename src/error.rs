//! Error type for the I/O and configuration edges of the crate
//!
//! The projection core itself never fails: missing inputs, zero denominators and
//! unknown scenarios all resolve to numeric fallbacks. Only loading, exporting and
//! validating configuration can return an error.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProjectionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid multiplier {value} for scenario '{scenario}': must be finite and positive")]
    InvalidMultiplier { scenario: String, value: f64 },

    #[error("Invalid anchor schedule: {0}")]
    InvalidAnchors(String),

    #[error("Invalid month range: {start}..={end}")]
    InvalidMonthRange { start: u32, end: u32 },
}

pub type ProjectionResult<T> = Result<T, ProjectionError>;
