//! Error types for the Pay Split Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while configuring the engine,
//! validating user input, and talking to the payroll server.

use thiserror::Error;

use crate::models::EmployeeId;

/// The main error type for the Pay Split Engine.
///
/// The calculator itself never fails; these errors come from configuration,
/// boundary validation, and the payroll server contract.
///
/// # Example
///
/// ```
/// use paysplit_engine::error::PayrollError;
///
/// let error = PayrollError::ConfigNotFound {
///     path: "/missing/payroll.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payroll.yaml");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or contained invalid values.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An employee form contained a missing or invalid required field.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// The pay period dates were missing or inconsistent.
    #[error("Invalid pay period: {message}")]
    InvalidPeriod {
        /// A description of what made the period invalid.
        message: String,
    },

    /// No employee earned anything in the period, so there is nothing to submit.
    #[error("Pay period has no line items with a positive total")]
    EmptyPeriod,

    /// An employee id was not part of the current roster.
    #[error("Employee {id} is not in the current roster")]
    UnknownEmployee {
        /// The id that was looked up.
        id: EmployeeId,
    },

    /// The payroll server could not be reached or the connection failed.
    #[error("Request '{operation}' failed: {message}")]
    Transport {
        /// The contract operation being performed (e.g. "list_employees").
        operation: String,
        /// A description of the transport failure.
        message: String,
    },

    /// The payroll server answered with a non-success status.
    #[error("Request '{operation}' was rejected with status {status}")]
    ServerRejected {
        /// The contract operation being performed.
        operation: String,
        /// The HTTP status code returned by the server.
        status: u16,
    },

    /// The payroll server's response body could not be decoded.
    #[error("Could not decode response for '{operation}': {message}")]
    Decode {
        /// The contract operation being performed.
        operation: String,
        /// A description of the decoding error.
        message: String,
    },

    /// A local file operation failed.
    #[error("I/O error at '{path}': {message}")]
    Io {
        /// The path being written or read.
        path: String,
        /// A description of the I/O error.
        message: String,
    },
}

impl PayrollError {
    /// Returns true if this error came from talking to the payroll server.
    ///
    /// These are the failures a front end reports with a generic notice.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            PayrollError::Transport { .. }
                | PayrollError::ServerRejected { .. }
                | PayrollError::Decode { .. }
        )
    }
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
