//! HTTP API module for the time-clock engine.
//!
//! This module provides the REST endpoints for recording punches, listing
//! punch history, and producing attendance reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{HistoryParams, NextPunchParams, PunchRequest, ReportParams};
pub use response::{ApiError, ApiErrorResponse, NextPunchResponse, PunchResponse};
pub use state::AppState;
