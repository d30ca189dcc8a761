//! Error types for epoch operations
//!
//! Provides a unified error type for all neuro-epochs crates.

use thiserror::Error;

/// Core error type for epoch construction and queries
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input: missing record fields, mismatched array lengths,
    /// inverted intervals, or a defaulted bound on an empty set
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation-specific invariant does not hold for this epoch set
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Contradictory caller parameters
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for mismatched parallel-array lengths
    pub fn length_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::Validation(format!(
            "Length mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Create an error for a record missing a required field
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("Record is missing required field `{field}`"))
    }

    /// Create an error for an interval whose stop precedes its start
    pub fn inverted_interval(start: f64, stop: f64) -> Self {
        Self::Validation(format!(
            "Interval stop {stop} precedes its start {start}"
        ))
    }

    /// Create an error for an operation whose defaults are undefined on an
    /// empty set
    pub fn empty_epoch(operation: &str) -> Self {
        Self::Validation(format!(
            "{operation} has no default bounds on an empty epoch set"
        ))
    }

    /// Create an error for an operation that requires non-overlapping epochs
    pub fn overlapping(operation: &str) -> Self {
        Self::Precondition(format!("{operation} requires non-overlapping epochs"))
    }
}
