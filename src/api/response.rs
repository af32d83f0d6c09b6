//! Response types for the time-clock API.
//!
//! This module defines the success payloads of the punch endpoints and the
//! error response structures shared by every handler.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::ingest::TimestampSource;
use crate::models::{PunchEvent, PunchType};

/// Body returned by `POST /punches`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchResponse {
    /// Confirmation message.
    pub detail: String,
    /// The inferred type of the recorded punch.
    pub punch_type: PunchType,
    /// Display label of `punch_type`.
    pub punch_type_label: String,
    /// The type the employee's next punch will get.
    pub next_type: PunchType,
    /// Display label of `next_type`.
    pub next_type_label: String,
    /// Local time of the punch, `HH:MM:SS`.
    pub time: String,
    /// Local date of the punch, `DD/MM/YYYY`.
    pub date: String,
    /// Identifier assigned by the store.
    pub punch_id: u64,
    /// Where the timestamp came from.
    pub timestamp_source: TimestampSource,
}

impl PunchResponse {
    /// Builds the confirmation for a stored punch.
    pub fn new(event: &PunchEvent, source: TimestampSource) -> Self {
        let next_type = event.punch_type.opposite();
        Self {
            detail: "Punch recorded successfully.".to_string(),
            punch_type: event.punch_type,
            punch_type_label: event.punch_type.label().to_string(),
            next_type,
            next_type_label: next_type.label().to_string(),
            time: event.timestamp.format("%H:%M:%S").to_string(),
            date: event.timestamp.format("%d/%m/%Y").to_string(),
            punch_id: event.id,
            timestamp_source: source,
        }
    }
}

/// Body returned by `GET /punches/next`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NextPunchResponse {
    /// The type the next punch will get.
    pub next_type: PunchType,
    /// Display label of `next_type`.
    pub next_type_label: String,
    /// Type of the most recent punch, if any.
    pub last_type: Option<PunchType>,
    /// Local time of the most recent punch, `DD/MM/YYYY HH:MM`.
    pub last_timestamp: Option<String>,
    /// `"green"` before an entry, `"red"` before an exit.
    pub button_color: String,
}

impl NextPunchResponse {
    /// Describes the next punch given the employee's most recent one.
    pub fn new(next_type: PunchType, last: Option<&PunchEvent>) -> Self {
        let button_color = match next_type {
            PunchType::Entry => "green",
            PunchType::Exit => "red",
        };
        Self {
            next_type,
            next_type_label: next_type.label().to_string(),
            last_type: last.map(|e| e.punch_type),
            last_timestamp: last.map(|e| e.timestamp.format("%d/%m/%Y %H:%M").to_string()),
            button_color: button_color.to_string(),
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates an employee not found error response.
    pub fn employee_not_found(employee_id: u64) -> Self {
        Self::with_details(
            "EMPLOYEE_NOT_FOUND",
            format!("Employee not found: {}", employee_id),
            format!("No employee is registered with id {}", employee_id),
        )
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates a missing field error response.
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::with_details(
            "MISSING_FIELD",
            format!("missing field: {}", field),
            format!("Required field '{}' was not provided in the request", field),
        )
    }

    /// Creates an error for a parameter that could not be parsed.
    pub fn invalid_parameter(name: &str, value: &str, expected: &str) -> Self {
        Self::with_details(
            "INVALID_PARAMETER",
            format!("Invalid value '{}' for parameter '{}'", value, name),
            format!("Expected {}", expected),
        )
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Wraps an error body with `400 Bad Request`.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { field, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Invalid configuration",
                    format!("Field '{}': {}", field, message),
                ),
            },
            EngineError::EmployeeNotFound { employee_id } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::employee_not_found(employee_id),
            },
            EngineError::InvalidDuration { input } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_DURATION",
                    format!("Invalid duration '{}'", input),
                    "Durations are written as H:MM",
                ),
            ),
            EngineError::InvalidTimestamp { input, message } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_TIMESTAMP",
                    format!("Invalid timestamp '{}'", input),
                    message,
                ),
            ),
            EngineError::InvalidDateRange { start, end } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_DATE_RANGE",
                    format!("Invalid date range: {} is after {}", start, end),
                    "The period start must not be later than its end",
                ),
            ),
            EngineError::InvalidPunchType { value } => ApiErrorResponse::bad_request(
                ApiError::with_details(
                    "INVALID_PUNCH_TYPE",
                    format!("Invalid punch type: {}", value),
                    "Punch types are 'entry' or 'exit'",
                ),
            ),
            EngineError::RenderError { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("RENDER_ERROR", "Report rendering failed", message),
            },
        }
    }
}
