//! Error types for the salary engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while calculating salaries.

use thiserror::Error;

/// The main error type for the salary engine.
///
/// Lookups distinguish a missing record ([`EngineError::RecordNotFound`])
/// from an unreachable store ([`EngineError::StoreUnavailable`]) so callers
/// can report "unknown rank/employee/month" separately from "system
/// unavailable".
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::RecordNotFound {
///     record: "capability".to_string(),
///     key: "XX".to_string(),
/// };
/// assert_eq!(error.to_string(), "capability record not found: XX");
/// assert!(error.is_not_found());
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

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the problem.
        message: String,
    },

    /// The backing store could not be reached or a query failed.
    #[error("Store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the storage failure.
        message: String,
    },

    /// No row matched an exact-key lookup.
    #[error("{record} record not found: {key}")]
    RecordNotFound {
        /// The kind of record that was looked up (e.g. "employee", "role").
        record: String,
        /// The key that had no matching row.
        key: String,
    },

    /// A stored row exists but one of its values could not be decoded.
    #[error("Invalid {record} record '{key}': {message}")]
    InvalidRecord {
        /// The kind of record.
        record: String,
        /// The key of the offending row.
        key: String,
        /// What was wrong with it.
        message: String,
    },

    /// A year-month value was not a valid YYYYMM integer.
    #[error("Invalid year-month: {value}")]
    InvalidYearMonth {
        /// The rejected value.
        value: u32,
    },

    /// A work record carried hour quantities that cannot be paid.
    #[error("Invalid work record for employee {employee_no} in {year_month}: {message}")]
    InvalidWorkRecord {
        /// The employee the record belongs to.
        employee_no: u32,
        /// The YYYYMM month of the record.
        year_month: u32,
        /// A description of what made the record invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Creates a [`EngineError::RecordNotFound`] for the given record kind and key.
    pub fn not_found(record: &str, key: impl ToString) -> Self {
        Self::RecordNotFound {
            record: record.to_string(),
            key: key.to_string(),
        }
    }

    /// Returns true when the error means a lookup key had no matching row.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }
}

impl From<rusqlite::Error> for EngineError {
    fn from(error: rusqlite::Error) -> Self {
        Self::StoreUnavailable {
            message: error.to_string(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
