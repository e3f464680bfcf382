//! Wire types for the payroll server contract.
//!
//! The server speaks snake_case JSON with plain JSON numbers, names the
//! overtime rate `overtime_cost`, and returns history rows with a text
//! timestamp. These types mirror that format and convert to and from the
//! domain models.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::calculation::deserialize_non_negative;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    EmployeeDraft, EmployeeId, EmployeeRate, LineItem, PayPeriodRecord, PeriodSubmission,
};

/// Timestamp format used by the server for `date_created`.
pub const SERVER_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An employee row as returned by `GET /employees`.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeRow {
    /// Server-assigned id.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Pay per day.
    #[serde(default, deserialize_with = "deserialize_non_negative")]
    pub daily_wage: Decimal,
    /// Pay per overtime hour.
    #[serde(
        default,
        alias = "overtime_rate",
        deserialize_with = "deserialize_non_negative"
    )]
    pub overtime_cost: Decimal,
    /// Bank limit (0 = none).
    #[serde(default, deserialize_with = "deserialize_non_negative")]
    pub bank_limit: Decimal,
    /// Soft-delete flag; the server stores it as 0/1.
    #[serde(default)]
    pub is_active: Option<Value>,
}

impl EmployeeRow {
    /// Returns false only when the server explicitly marks the row inactive.
    pub fn is_active(&self) -> bool {
        match &self.is_active {
            Some(Value::Bool(active)) => *active,
            Some(Value::Number(flag)) => flag.as_i64() != Some(0),
            _ => true,
        }
    }
}

impl From<EmployeeRow> for EmployeeRate {
    fn from(row: EmployeeRow) -> Self {
        EmployeeRate {
            id: row.id,
            name: row.name,
            daily_wage: row.daily_wage,
            overtime_rate: row.overtime_cost,
            bank_limit: row.bank_limit,
        }
    }
}

/// Body of `POST /employees`.
#[derive(Debug, Clone, Serialize)]
pub struct NewEmployeeBody {
    /// Display name.
    pub name: String,
    /// Pay per day.
    #[serde(with = "rust_decimal::serde::float")]
    pub daily_wage: Decimal,
    /// Pay per overtime hour.
    #[serde(with = "rust_decimal::serde::float")]
    pub overtime_cost: Decimal,
    /// Bank limit (0 = none).
    #[serde(with = "rust_decimal::serde::float")]
    pub bank_limit: Decimal,
}

impl From<&EmployeeDraft> for NewEmployeeBody {
    fn from(draft: &EmployeeDraft) -> Self {
        NewEmployeeBody {
            name: draft.name.clone(),
            daily_wage: draft.daily_wage,
            overtime_cost: draft.overtime_rate,
            bank_limit: draft.bank_limit,
        }
    }
}

/// Response of `POST /employees`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedEmployee {
    /// Id assigned to the new employee.
    pub id: EmployeeId,
    /// Confirmation message.
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /employees/update`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateEmployeeBody {
    /// Employee being updated.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Pay per day.
    #[serde(with = "rust_decimal::serde::float")]
    pub daily_wage: Decimal,
    /// Pay per overtime hour.
    #[serde(with = "rust_decimal::serde::float")]
    pub overtime_cost: Decimal,
    /// Bank limit (0 = none).
    #[serde(with = "rust_decimal::serde::float")]
    pub bank_limit: Decimal,
}

impl From<&EmployeeRate> for UpdateEmployeeBody {
    fn from(rate: &EmployeeRate) -> Self {
        UpdateEmployeeBody {
            id: rate.id,
            name: rate.name.clone(),
            daily_wage: rate.daily_wage,
            overtime_cost: rate.overtime_rate,
            bank_limit: rate.bank_limit,
        }
    }
}

/// Body of `POST /employees/delete`.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteEmployeeBody {
    /// Employee to soft-delete.
    pub id: EmployeeId,
}

/// One employee row in the body of `POST /save_payroll`.
#[derive(Debug, Clone, Serialize)]
pub struct PayrollLineBody {
    /// Employee name.
    pub name: String,
    /// Days worked.
    #[serde(with = "rust_decimal::serde::float")]
    pub days: Decimal,
    /// Overtime hours worked.
    #[serde(with = "rust_decimal::serde::float")]
    pub overtime_hours: Decimal,
    /// Gross total for the period.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_pay: Decimal,
    /// Bank portion.
    #[serde(with = "rust_decimal::serde::float")]
    pub bank_pay: Decimal,
    /// Cash portion.
    #[serde(with = "rust_decimal::serde::float")]
    pub cash_pay: Decimal,
}

/// Body of `POST /save_payroll`.
#[derive(Debug, Clone, Serialize)]
pub struct SavePayrollBody {
    /// First day of the period.
    pub date_start: NaiveDate,
    /// Last day of the period.
    pub date_end: NaiveDate,
    /// Payable employees.
    pub employees: Vec<PayrollLineBody>,
}

impl From<&PeriodSubmission> for SavePayrollBody {
    fn from(submission: &PeriodSubmission) -> Self {
        SavePayrollBody {
            date_start: submission.date_start,
            date_end: submission.date_end,
            employees: submission
                .line_items
                .iter()
                .map(|item| PayrollLineBody {
                    name: item.name.clone(),
                    days: item.days,
                    overtime_hours: item.overtime_hours,
                    total_pay: item.gross_total,
                    bank_pay: item.bank_pay,
                    cash_pay: item.cash_pay,
                })
                .collect(),
        }
    }
}

/// A line item inside a history row, for servers that store them.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryLineRow {
    /// Employee name.
    pub name: String,
    /// Days worked.
    #[serde(default, deserialize_with = "deserialize_non_negative")]
    pub days: Decimal,
    /// Overtime hours worked.
    #[serde(default, deserialize_with = "deserialize_non_negative")]
    pub overtime_hours: Decimal,
    /// Gross total.
    #[serde(
        default,
        alias = "gross_total",
        deserialize_with = "deserialize_non_negative"
    )]
    pub total_pay: Decimal,
    /// Bank portion.
    #[serde(default, deserialize_with = "deserialize_non_negative")]
    pub bank_pay: Decimal,
    /// Cash portion.
    #[serde(default, deserialize_with = "deserialize_non_negative")]
    pub cash_pay: Decimal,
}

impl From<HistoryLineRow> for LineItem {
    fn from(row: HistoryLineRow) -> Self {
        LineItem {
            name: row.name,
            days: row.days,
            overtime_hours: row.overtime_hours,
            gross_total: row.total_pay,
            bank_pay: row.bank_pay,
            cash_pay: row.cash_pay,
        }
    }
}

/// A payroll history row as returned by `GET /history`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryRow {
    /// Server-assigned id.
    #[serde(default)]
    pub id: Option<i64>,
    /// Creation timestamp text.
    pub date_created: String,
    /// First day of the period.
    pub date_start: NaiveDate,
    /// Last day of the period.
    pub date_end: NaiveDate,
    /// Total cost of the period.
    #[serde(default, deserialize_with = "deserialize_non_negative")]
    pub total_cost: Decimal,
    /// Free-text summary written by the server.
    #[serde(default)]
    pub details: Option<String>,
    /// Structured line items, when the server provides them.
    #[serde(default)]
    pub line_items: Vec<HistoryLineRow>,
}

impl HistoryRow {
    /// Converts the row into a domain record.
    ///
    /// Fails if `date_created` is neither in the server's format nor RFC 3339.
    pub fn into_record(self) -> PayrollResult<PayPeriodRecord> {
        let created_at = parse_server_timestamp(&self.date_created)?;
        Ok(PayPeriodRecord::new(
            self.id,
            self.date_start,
            self.date_end,
            self.line_items.into_iter().map(LineItem::from).collect(),
            self.total_cost,
            created_at,
            self.details,
        ))
    }
}

/// Parses a server timestamp such as `2026-03-16 09:30:00`.
pub fn parse_server_timestamp(text: &str) -> PayrollResult<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, SERVER_TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| DateTime::parse_from_rfc3339(text).map(|dt| dt.naive_local()))
        .map_err(|e| PayrollError::Decode {
            operation: "history".to_string(),
            message: format!("invalid date_created '{}': {}", text, e),
        })
}
