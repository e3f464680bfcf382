//! HTTP request handlers for the Pay Split Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_period;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{EmployeeRate, PeriodEntry};

use super::request::CalculationRequest;
use super::response::{ApiError, ApiErrorResponse, CalculationResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Previews the bank/cash split for a roster without persisting anything.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::validation_error(body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let policy = request
        .bank_cap_policy
        .unwrap_or_else(|| state.config().bank_cap_policy());
    let rows = match collect_rows(request) {
        Ok(rows) => rows,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Calculation request rejected"
            );
            let api_error: ApiErrorResponse = err.into();
            return json_response(api_error.status, api_error.error);
        }
    };

    let calculation = calculate_period(rows.iter().map(|(rate, entry)| (rate, entry)), policy);
    info!(
        correlation_id = %correlation_id,
        employees = calculation.lines.len(),
        bank_cap_policy = %policy,
        total_cost = %calculation.rounded_total_cost(),
        duration_us = calculation.audit_trace.duration_us,
        "Calculation completed successfully"
    );

    json_response(StatusCode::OK, CalculationResponse::from(calculation))
}

/// Converts request entries to domain rows, rejecting blank names and
/// duplicate employee ids.
fn collect_rows(request: CalculationRequest) -> PayrollResult<Vec<(EmployeeRate, PeriodEntry)>> {
    let mut rows: Vec<(EmployeeRate, PeriodEntry)> = Vec::with_capacity(request.entries.len());

    for entry in request.entries {
        if entry.employee.name.trim().is_empty() {
            return Err(PayrollError::InvalidEmployee {
                field: "name".to_string(),
                message: format!("employee {} has no name", entry.employee.id),
            });
        }
        if rows.iter().any(|(rate, _)| rate.id == entry.employee.id) {
            return Err(PayrollError::InvalidEmployee {
                field: "id".to_string(),
                message: format!("employee {} appears more than once", entry.employee.id),
            });
        }
        rows.push(entry.into());
    }

    Ok(rows)
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}
