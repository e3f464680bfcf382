//! Response types for the Pay Split Engine API.
//!
//! This module defines the calculation response, the error response
//! structures and the mapping from [`PayrollError`] to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::BankCapPolicy;
use crate::error::PayrollError;
use crate::models::{AuditTrace, EmployeeId, EmployeeSplit, PaySplitResult, PeriodCalculation};

/// Successful response of the `/calculate` endpoint.
///
/// Amounts are rounded to cents; the audit trace keeps full precision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse {
    /// Unique id of this calculation.
    pub calculation_id: Uuid,
    /// When the calculation ran.
    pub timestamp: DateTime<Utc>,
    /// Crate version that produced the result.
    pub engine_version: String,
    /// Policy the bank limits were applied with.
    pub bank_cap_policy: BankCapPolicy,
    /// One line per requested employee, in request order.
    pub lines: Vec<LineResponse>,
    /// Sum of the gross totals.
    pub total_cost: Decimal,
    /// Step-by-step record of the calculation.
    pub audit_trace: AuditTrace,
}

/// One employee's line in a calculation response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineResponse {
    /// Identifier of the employee.
    pub employee_id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Days worked as used in the calculation.
    pub days_worked: Decimal,
    /// Overtime hours as used in the calculation.
    pub overtime_hours: Decimal,
    /// Rounded pay split.
    pub split: PaySplitResult,
}

impl From<&EmployeeSplit> for LineResponse {
    fn from(line: &EmployeeSplit) -> Self {
        LineResponse {
            employee_id: line.employee_id,
            name: line.name.clone(),
            days_worked: line.days_worked,
            overtime_hours: line.overtime_hours,
            split: line.split.rounded(),
        }
    }
}

impl From<PeriodCalculation> for CalculationResponse {
    fn from(calculation: PeriodCalculation) -> Self {
        CalculationResponse {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            bank_cap_policy: calculation.bank_cap_policy,
            lines: calculation.lines.iter().map(LineResponse::from).collect(),
            total_cost: calculation.rounded_total_cost(),
            audit_trace: calculation.audit_trace,
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

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let message = error.to_string();
        let (status, error) = match error {
            PayrollError::ConfigNotFound { .. } | PayrollError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            ),
            PayrollError::InvalidEmployee { field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_EMPLOYEE",
                    message,
                    format!("Check the '{}' field of the employee", field),
                ),
            ),
            PayrollError::InvalidPeriod { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_PERIOD", message),
            ),
            PayrollError::EmptyPeriod => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "EMPTY_PERIOD",
                    message,
                    "Enter days or overtime hours for at least one employee",
                ),
            ),
            PayrollError::UnknownEmployee { .. } => (
                StatusCode::NOT_FOUND,
                ApiError::new("UNKNOWN_EMPLOYEE", message),
            ),
            PayrollError::Transport { .. } => (
                StatusCode::BAD_GATEWAY,
                ApiError::with_details(
                    "UPSTREAM_UNAVAILABLE",
                    "Payroll server unreachable",
                    message,
                ),
            ),
            PayrollError::ServerRejected { status, .. } => (
                StatusCode::BAD_GATEWAY,
                ApiError::with_details(
                    "UPSTREAM_REJECTED",
                    format!("Payroll server answered with status {}", status),
                    message,
                ),
            ),
            PayrollError::Decode { .. } => (
                StatusCode::BAD_GATEWAY,
                ApiError::with_details(
                    "UPSTREAM_DECODE_ERROR",
                    "Payroll server response could not be read",
                    message,
                ),
            ),
            PayrollError::Io { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("IO_ERROR", "File operation failed", message),
            ),
        };
        ApiErrorResponse { status, error }
    }
}
