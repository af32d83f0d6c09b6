//! HTTP request handlers for the time-clock API.
//!
//! This module contains the handler functions for all API endpoints.

use std::collections::HashMap;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::infer_next_type;
use crate::ingest::resolve_punch_timestamp;
use crate::models::{Employee, PeriodReport, PunchHistoryRecord, project_history};

use super::request::{HistoryParams, NextPunchParams, PunchRequest, ReportParams};
use super::response::{ApiError, ApiErrorResponse, NextPunchResponse, PunchResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/punches", post(record_punch_handler).get(history_handler))
        .route("/punches/next", get(next_punch_handler))
        .route("/reports/:employee_id", get(report_handler))
        .route("/reports/:employee_id/pdf", get(report_pdf_handler))
        .with_state(state)
}

/// Handler for POST /punches.
///
/// Infers the punch type from the employee's last punch and stores it.
async fn record_punch_handler(
    State(state): State<AppState>,
    payload: Result<Json<PunchRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing punch request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return Err(json_rejection(correlation_id, rejection)),
    };

    let resolved = resolve_punch_timestamp(
        request.timestamp.as_deref(),
        state.reference_offset(),
        Utc::now(),
    );

    let event = state
        .store()
        .record_punch(request.employee_id, resolved.timestamp)
        .map_err(|err| failure(correlation_id, err))?;

    info!(
        correlation_id = %correlation_id,
        employee_id = event.employee_id,
        punch_id = event.id,
        punch_type = %event.punch_type,
        timestamp = %event.timestamp,
        "Punch recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(PunchResponse::new(&event, resolved.source)),
    )
        .into_response())
}

/// Handler for GET /punches/next.
///
/// Tells a client which punch type the employee's next punch will be.
async fn next_punch_handler(
    State(state): State<AppState>,
    Query(params): Query<NextPunchParams>,
) -> Result<Json<NextPunchResponse>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing next punch lookup");

    let employee_id = params
        .employee_id()
        .map_err(|err| failure(correlation_id, err))?;
    let last = state
        .store()
        .fetch_last_event(employee_id)
        .map_err(|err| failure(correlation_id, err))?;

    let next_type = infer_next_type(last.as_ref());
    info!(
        correlation_id = %correlation_id,
        employee_id,
        next_type = %next_type,
        "Next punch resolved"
    );
    Ok(Json(NextPunchResponse::new(next_type, last.as_ref())))
}

/// Handler for GET /punches.
///
/// Lists punches most recent first, optionally filtered.
async fn history_handler(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<PunchHistoryRecord>>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing history request");

    let query = params.to_query().map_err(|err| failure(correlation_id, err))?;
    let events = state
        .store()
        .query_history(&query)
        .map_err(|err| failure(correlation_id, err))?;

    let mut employees: HashMap<u64, Employee> = HashMap::new();
    let mut records = Vec::with_capacity(events.len());
    for event in &events {
        if !employees.contains_key(&event.employee_id) {
            let employee = state
                .store()
                .employee(event.employee_id)
                .map_err(|err| failure(correlation_id, err))?;
            employees.insert(event.employee_id, employee);
        }
        if let Some(employee) = employees.get(&event.employee_id) {
            records.push(project_history(event, employee));
        }
    }

    info!(
        correlation_id = %correlation_id,
        records = records.len(),
        "History listed"
    );
    Ok(Json(records))
}

/// Handler for GET /reports/:employee_id.
async fn report_handler(
    State(state): State<AppState>,
    employee_id: Result<Path<u64>, PathRejection>,
    Query(params): Query<ReportParams>,
) -> Result<Json<PeriodReport>, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report request");

    let report = build_period_report(&state, correlation_id, employee_id, &params)?;
    Ok(Json(report))
}

/// Handler for GET /reports/:employee_id/pdf.
///
/// Returns the same report as a downloadable document.
async fn report_pdf_handler(
    State(state): State<AppState>,
    employee_id: Result<Path<u64>, PathRejection>,
    Query(params): Query<ReportParams>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing report document request");

    let report = build_period_report(&state, correlation_id, employee_id, &params)?;
    let renderer = state.renderer();
    let bytes = renderer
        .render(&report)
        .map_err(|err| failure(correlation_id, err))?;

    let disposition = format!(
        "inline; filename=\"punch_report_{}_{}_{}.pdf\"",
        report.employee.username,
        report.period_start.format("%Y%m%d"),
        report.period_end.format("%Y%m%d"),
    );

    info!(
        correlation_id = %correlation_id,
        bytes = bytes.len(),
        "Report document rendered"
    );
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, renderer.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// Validates the request, fetches the period's punches and builds the report.
fn build_period_report(
    state: &AppState,
    correlation_id: Uuid,
    employee_id: Result<Path<u64>, PathRejection>,
    params: &ReportParams,
) -> Result<PeriodReport, ApiErrorResponse> {
    let Path(employee_id) = employee_id.map_err(|rejection| {
        failure(
            correlation_id,
            ApiErrorResponse::bad_request(ApiError::invalid_parameter(
                "employee_id",
                &rejection.body_text(),
                "a positive integer",
            )),
        )
    })?;
    let (start, end) = params.period().map_err(|err| failure(correlation_id, err))?;

    let employee = state
        .store()
        .employee(employee_id)
        .map_err(|err| failure(correlation_id, err))?;
    let events = state
        .store()
        .fetch_events(employee_id, start, end)
        .map_err(|err| failure(correlation_id, err))?;

    let started = Instant::now();
    let report = state.engine().build_report(&employee, start, end, &events);
    info!(
        correlation_id = %correlation_id,
        employee_id,
        days = report.rows.len(),
        records = report.total_record_count,
        total_worked_minutes = report.total_worked_minutes,
        duration_us = started.elapsed().as_micros(),
        "Report built"
    );
    Ok(report)
}

/// Logs a failed request and converts the error into a response.
fn failure(correlation_id: Uuid, err: impl Into<ApiErrorResponse>) -> ApiErrorResponse {
    let response = err.into();
    warn!(
        correlation_id = %correlation_id,
        status = response.status.as_u16(),
        code = %response.error.code,
        error = %response.error.message,
        "Request failed"
    );
    response
}

/// Maps a JSON body rejection onto an API error.
fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    failure(correlation_id, ApiErrorResponse::bad_request(error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::PunchType;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        let config = ConfigLoader::from_yaml_str(
            "employees:\n  - id: 1\n    username: msilva\n    full_name: Maria Silva\n",
        )
        .expect("Failed to load config");
        AppState::from_config(&config)
    }

    fn post_punch(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/punches")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_first_punch_is_entry_and_returns_201() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_punch(
                r#"{"employee_id": 1, "timestamp": "2025-03-10T12:00:00Z"}"#,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: PunchResponse = body_json(response).await;
        assert_eq!(body.punch_type, PunchType::Entry);
        assert_eq!(body.next_type, PunchType::Exit);
        assert_eq!(body.time, "08:00:00");
        assert_eq!(body.date, "10/03/2025");
    }

    #[tokio::test]
    async fn test_punch_for_unknown_employee_returns_404() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_punch(r#"{"employee_id": 99}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "EMPLOYEE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let response = router.oneshot(post_punch("{invalid json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_employee_id_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(post_punch(r#"{"timestamp": "2025-03-10T12:00:00Z"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_next_punch_without_history_is_green_entry() {
        let router = create_router(create_test_state());

        let response = router.oneshot(get_request("/punches/next?employee_id=1")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: NextPunchResponse = body_json(response).await;
        assert_eq!(body.next_type, PunchType::Entry);
        assert_eq!(body.button_color, "green");
    }

    #[tokio::test]
    async fn test_report_with_inverted_range_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(get_request("/reports/1?start=2025-03-10&end=2025-03-01"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "INVALID_DATE_RANGE");
    }

    #[tokio::test]
    async fn test_report_with_non_numeric_employee_returns_400() {
        let router = create_router(create_test_state());

        let response = router
            .oneshot(get_request("/reports/abc?start=2025-03-01&end=2025-03-31"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ApiError = body_json(response).await;
        assert_eq!(error.code, "INVALID_PARAMETER");
    }
}
