//! Error types for the time-clock engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for the conditions that can occur at the engine's boundaries.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the time-clock engine.
///
/// The aggregation core is total over any sequence of punches and never
/// returns this type; it is raised by configuration loading, the punch store,
/// ingestion parsing, and the explicit duration parser.
///
/// # Example
///
/// ```
/// use timeclock_engine::error::EngineError;
///
/// let error = EngineError::InvalidDuration {
///     input: "8h".to_string(),
/// };
/// assert_eq!(error.to_string(), "Invalid duration '8h': expected H:MM");
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

    /// A configuration value was out of range.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// No employee exists with the given identifier.
    #[error("Employee not found: {employee_id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        employee_id: u64,
    },

    /// A worked-duration string was not in `H:MM` form.
    #[error("Invalid duration '{input}': expected H:MM")]
    InvalidDuration {
        /// The string that failed to parse.
        input: String,
    },

    /// A client-supplied timestamp could not be parsed.
    #[error("Invalid timestamp '{input}': {message}")]
    InvalidTimestamp {
        /// The raw timestamp.
        input: String,
        /// A description of the parse error.
        message: String,
    },

    /// A date range whose start falls after its end.
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange {
        /// The requested start date.
        start: NaiveDate,
        /// The requested end date.
        end: NaiveDate,
    },

    /// A punch type label that is neither entry nor exit.
    #[error("Invalid punch type: {value}")]
    InvalidPunchType {
        /// The unrecognized label.
        value: String,
    },

    /// The report renderer failed to produce its artifact.
    #[error("Render error: {message}")]
    RenderError {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
