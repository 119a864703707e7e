//! Error types for the timesheet engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while marking attendance,
//! aggregating payroll, and talking to storage.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::EmployeeId;

/// The main error type for the timesheet engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use timesheet_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound { id: 42 };
/// assert_eq!(error.to_string(), "Employee not found: 42");
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
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was out of range.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The configuration field that was invalid.
        field: String,
        /// A description of what made the value invalid.
        message: String,
    },

    /// No employee exists with the given identity.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The identity that was looked up.
        id: EmployeeId,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Text entered as a bonus or deduction amount did not parse as a
    /// fixed-point number.
    #[error("Invalid extra amount: '{input}'")]
    InvalidExtraAmount {
        /// The rejected input text.
        input: String,
    },

    /// Text entered as an hour count did not parse as a non-negative number.
    #[error("Invalid hour count: '{input}'")]
    InvalidHours {
        /// The rejected input text.
        input: String,
    },

    /// A period's end date preceded its start date.
    #[error("Invalid period: {from} is after {to}")]
    InvalidPeriod {
        /// The requested start date.
        from: NaiveDate,
        /// The requested end date.
        to: NaiveDate,
    },

    /// A payroll calculation could not produce a complete result.
    #[error("Calculation error: {message}")]
    Calculation {
        /// A description of the calculation error.
        message: String,
    },

    /// The storage gateway reported a failure.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the storage failure.
        message: String,
    },
}

impl From<rusqlite::Error> for EngineError {
    fn from(err: rusqlite::Error) -> Self {
        EngineError::Storage {
            message: err.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
