//! Request types for the time-clock API.
//!
//! Query parameters arrive as raw strings and are validated here, so a bad
//! value produces the same JSON error body as every other failure.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;
use crate::models::PunchType;
use crate::store::HistoryQuery;

use super::response::{ApiError, ApiErrorResponse};

/// Request body for `POST /punches`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchRequest {
    /// The employee punching the clock.
    pub employee_id: u64,
    /// Client-side moment of the punch; the server clock is used when absent.
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Query parameters for `GET /punches/next`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NextPunchParams {
    /// The employee to look up.
    pub employee_id: Option<String>,
}

impl NextPunchParams {
    /// Returns the validated employee id.
    pub fn employee_id(&self) -> Result<u64, ApiErrorResponse> {
        match self.employee_id.as_deref() {
            Some(raw) => parse_id("employee_id", raw),
            None => Err(ApiErrorResponse::bad_request(ApiError::missing_field(
                "employee_id",
            ))),
        }
    }
}

/// Query parameters for `GET /punches`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryParams {
    /// Restrict to one employee.
    pub employee_id: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD`.
    pub date_from: Option<String>,
    /// Inclusive upper bound, `YYYY-MM-DD`.
    pub date_to: Option<String>,
    /// `entry` or `exit`; anything else is ignored.
    #[serde(rename = "type")]
    pub punch_type: Option<String>,
}

impl HistoryParams {
    /// Converts the parameters into a store query.
    ///
    /// Empty values count as absent. Malformed ids and dates are rejected,
    /// while an unrecognized punch type simply drops that filter.
    pub fn to_query(&self) -> Result<HistoryQuery, ApiErrorResponse> {
        let employee_id = non_empty(&self.employee_id)
            .map(|raw| parse_id("employee_id", raw))
            .transpose()?;
        let date_from = non_empty(&self.date_from)
            .map(|raw| parse_date("date_from", raw))
            .transpose()?;
        let date_to = non_empty(&self.date_to)
            .map(|raw| parse_date("date_to", raw))
            .transpose()?;

        let punch_type = non_empty(&self.punch_type).and_then(|raw| match raw.parse::<PunchType>() {
            Ok(punch_type) => Some(punch_type),
            Err(err) => {
                debug!(error = %err, "Ignoring unknown punch type filter");
                None
            }
        });

        Ok(HistoryQuery {
            employee_id,
            date_from,
            date_to,
            punch_type,
        })
    }
}

/// Query parameters for the report endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportParams {
    /// First day of the period, `YYYY-MM-DD`.
    pub start: Option<String>,
    /// Last day of the period, `YYYY-MM-DD`.
    pub end: Option<String>,
}

impl ReportParams {
    /// Returns the validated inclusive period.
    pub fn period(&self) -> Result<(NaiveDate, NaiveDate), ApiErrorResponse> {
        let start = required_date("start", &self.start)?;
        let end = required_date("end", &self.end)?;
        if start > end {
            return Err(EngineError::InvalidDateRange { start, end }.into());
        }
        Ok((start, end))
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required_date(name: &str, value: &Option<String>) -> Result<NaiveDate, ApiErrorResponse> {
    match non_empty(value) {
        Some(raw) => parse_date(name, raw),
        None => Err(ApiErrorResponse::bad_request(ApiError::missing_field(name))),
    }
}

fn parse_date(name: &str, raw: &str) -> Result<NaiveDate, ApiErrorResponse> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        ApiErrorResponse::bad_request(ApiError::invalid_parameter(name, raw, "a date as YYYY-MM-DD"))
    })
}

fn parse_id(name: &str, raw: &str) -> Result<u64, ApiErrorResponse> {
    raw.trim().parse::<u64>().map_err(|_| {
        ApiErrorResponse::bad_request(ApiError::invalid_parameter(name, raw, "a positive integer"))
    })
}
