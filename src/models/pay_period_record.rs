//! Pay period submissions and the records persisted from them.
//!
//! This module contains the [`LineItem`], [`PeriodSubmission`] and
//! [`PayPeriodRecord`] types. A submission is the snapshot sent to the payroll
//! server on export; a record is what the server keeps in its append-only
//! history.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeSplit, PeriodCalculation, round_currency};

/// One employee's row in a submitted or persisted pay period.
///
/// Amounts are rounded to cents; `bank_pay + cash_pay == gross_total`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Employee name at export time.
    pub name: String,
    /// Days worked.
    pub days: Decimal,
    /// Overtime hours worked.
    pub overtime_hours: Decimal,
    /// Gross pay for the period.
    pub gross_total: Decimal,
    /// Portion paid through the bank.
    pub bank_pay: Decimal,
    /// Portion paid in cash.
    pub cash_pay: Decimal,
}

impl From<&EmployeeSplit> for LineItem {
    fn from(line: &EmployeeSplit) -> Self {
        let split = line.split.rounded();
        LineItem {
            name: line.name.clone(),
            days: line.days_worked,
            overtime_hours: line.overtime_hours,
            gross_total: split.gross_total,
            bank_pay: split.bank_pay,
            cash_pay: split.cash_pay,
        }
    }
}

/// The consistent snapshot of a pay period sent to the payroll server.
///
/// Built from a finished [`PeriodCalculation`], carrying the calculated
/// decimals directly. Only employees whose gross total rounds to at least one
/// cent are included.
///
/// # Example
///
/// ```
/// use paysplit_engine::models::{AuditTrace, PeriodCalculation, PeriodSubmission};
/// use paysplit_engine::calculation::BankCapPolicy;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let calculation = PeriodCalculation {
///     bank_cap_policy: BankCapPolicy::CapByWage,
///     lines: vec![],
///     total_cost: Decimal::ZERO,
///     audit_trace: AuditTrace { steps: vec![], warnings: vec![], duration_us: 0 },
/// };
/// let submission = PeriodSubmission::from_calculation(
///     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 15).unwrap(),
///     &calculation,
/// );
/// assert!(submission.line_items.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSubmission {
    /// First day of the period (inclusive).
    pub date_start: NaiveDate,
    /// Last day of the period (inclusive).
    pub date_end: NaiveDate,
    /// Payable employees in roster order.
    pub line_items: Vec<LineItem>,
}

impl PeriodSubmission {
    /// Builds a submission from a calculation, keeping only payable lines.
    pub fn from_calculation(
        date_start: NaiveDate,
        date_end: NaiveDate,
        calculation: &PeriodCalculation,
    ) -> Self {
        Self {
            date_start,
            date_end,
            line_items: calculation.payable_lines().map(LineItem::from).collect(),
        }
    }

    /// Returns the total cost of the submitted line items.
    pub fn total_cost(&self) -> Decimal {
        self.line_items
            .iter()
            .fold(Decimal::ZERO, |total, item| total.saturating_add(item.gross_total))
    }

    /// Converts the submission into the record the server persists.
    pub fn into_record(self, created_at: NaiveDateTime) -> PayPeriodRecord {
        let total_cost = self.total_cost();
        PayPeriodRecord::new(
            None,
            self.date_start,
            self.date_end,
            self.line_items,
            total_cost,
            created_at,
            None,
        )
    }
}

/// An immutable, persisted summary of one payroll run.
///
/// Records are only ever created, never edited, so the type exposes read
/// accessors and no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayPeriodRecord {
    id: Option<i64>,
    date_start: NaiveDate,
    date_end: NaiveDate,
    line_items: Vec<LineItem>,
    total_cost: Decimal,
    created_at: NaiveDateTime,
    summary: Option<String>,
}

impl PayPeriodRecord {
    /// Creates a record. The total cost is stored rounded to cents.
    pub fn new(
        id: Option<i64>,
        date_start: NaiveDate,
        date_end: NaiveDate,
        line_items: Vec<LineItem>,
        total_cost: Decimal,
        created_at: NaiveDateTime,
        summary: Option<String>,
    ) -> Self {
        Self {
            id,
            date_start,
            date_end,
            line_items,
            total_cost: round_currency(total_cost),
            created_at,
            summary,
        }
    }

    /// Server-assigned id, if the record came from the server.
    pub fn id(&self) -> Option<i64> {
        self.id
    }

    /// First day of the period.
    pub fn date_start(&self) -> NaiveDate {
        self.date_start
    }

    /// Last day of the period.
    pub fn date_end(&self) -> NaiveDate {
        self.date_end
    }

    /// Line items in the order they were submitted.
    pub fn line_items(&self) -> &[LineItem] {
        &self.line_items
    }

    /// Total cost of the period.
    pub fn total_cost(&self) -> Decimal {
        self.total_cost
    }

    /// When the record was created.
    pub fn created_at(&self) -> NaiveDateTime {
        self.created_at
    }

    /// Free-text summary kept by servers that do not store line items.
    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }
}
