//! Error types for the Premium Leave Engine.
//!
//! The enrichment pipeline itself never fails on malformed records: bad dates,
//! missing anchors and malformed numbers are recovered into defaults and
//! reported as [`EnrichmentWarning`](crate::models::EnrichmentWarning)s.
//! The errors here cover what sits around the data path: loading and
//! validating configuration, and recognising the shape of a whole batch.

use thiserror::Error;

/// The main error type for the Premium Leave Engine.
///
/// # Example
///
/// ```
/// use premium_leave_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/premium_leave.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/premium_leave.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was out of range or inconsistent.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The dotted path of the offending setting.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A batch input did not have the expected top-level shape.
    #[error("Invalid batch input: expected {expected}, found {found}")]
    InvalidBatchShape {
        /// The shape that was expected (e.g. "an array of servant records").
        expected: String,
        /// The shape that was actually received.
        found: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
