//! # Error Types
//!
//! Structured error types for beam_core. Every failure is an input-validation
//! failure reported synchronously at the offending call, so none of these are
//! retryable: the caller fixes the model and tries again.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::errors::{CalcError, CalcResult};
//!
//! fn validate_length(length_mm: f64) -> CalcResult<()> {
//!     if length_mm <= 0.0 {
//!         return Err(CalcError::invalid_input(
//!             "length_mm",
//!             length_mm.to_string(),
//!             "Beam length must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(validate_length(-1.0).unwrap_err().error_code(), "INVALID_INPUT");
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for beam_core operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Structured error type for beam analysis operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum CalcError {
    /// Supports or loads don't match what the requested beam type can solve
    #[error("Invalid configuration for {beam_type} beam: {reason}")]
    InvalidConfiguration { beam_type: String, reason: String },

    /// Neither the unit pair nor its inverse is tabulated
    #[error("Conversion from '{from}' to '{to}' is not supported")]
    UnsupportedConversion { from: String, to: String },

    /// Requested analysis is outside what the engine solves
    #[error("Not implemented: {feature}")]
    NotImplemented { feature: String },

    /// A position lies outside the beam
    #[error("{field} = {value} is outside the range [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// An input value is malformed (non-finite, negative length, unknown name, ...)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Shear/moment queried before reactions were solved
    #[error("Reactions have not been solved - call calculate_reactions() first")]
    NotSolved,

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl CalcError {
    /// Create an InvalidConfiguration error
    pub fn invalid_configuration(beam_type: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidConfiguration {
            beam_type: beam_type.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedConversion error
    pub fn unsupported_conversion(from: impl Into<String>, to: impl Into<String>) -> Self {
        CalcError::UnsupportedConversion {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Create a NotImplemented error
    pub fn not_implemented(feature: impl Into<String>) -> Self {
        CalcError::NotImplemented {
            feature: feature.into(),
        }
    }

    /// Create an OutOfRange error
    pub fn out_of_range(field: impl Into<String>, value: f64, min: f64, max: f64) -> Self {
        CalcError::OutOfRange {
            field: field.into(),
            value,
            min,
            max,
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        CalcError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CalcError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            CalcError::UnsupportedConversion { .. } => "UNSUPPORTED_CONVERSION",
            CalcError::NotImplemented { .. } => "NOT_IMPLEMENTED",
            CalcError::OutOfRange { .. } => "OUT_OF_RANGE",
            CalcError::InvalidInput { .. } => "INVALID_INPUT",
            CalcError::NotSolved => "NOT_SOLVED",
            CalcError::FileError { .. } => "FILE_ERROR",
            CalcError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for CalcError {
    fn from(err: serde_json::Error) -> Self {
        CalcError::SerializationError {
            reason: err.to_string(),
        }
    }
}

/// Reject NaN and infinities before they poison a solve.
pub(crate) fn ensure_finite(field: &str, value: f64) -> CalcResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::invalid_input(field, value.to_string(), "Value must be finite"))
    }
}
