//! Error types for the tip engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the allocation and payroll computations can report.

use thiserror::Error;

use crate::models::AllocationPolicy;

/// The main error type for the tip engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use tip_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/payroll.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payroll.yaml");
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

    /// A tip pool was submitted without any staff to share it.
    #[error("Cannot allocate tips: no active staff members")]
    EmptyStaff,

    /// A payroll estimate was requested for an empty roster.
    #[error("Cannot estimate payroll: roster has no employees")]
    EmptyRoster,

    /// The weighting basis of the selected policy sums to zero.
    #[error("Cannot allocate tips {policy}: weighting basis sums to zero")]
    ZeroBasis {
        /// The policy whose basis was zero.
        policy: AllocationPolicy,
    },

    /// A rate or hours constant supplied as configuration is out of range.
    #[error("Invalid configuration '{field}': {message}")]
    InvalidConfiguration {
        /// The configuration field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// A caller-supplied input value is outside its valid domain.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The input field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// The ledger sink failed to record or list transactions.
    #[error("Ledger error: {message}")]
    LedgerError {
        /// A description of the ledger failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
