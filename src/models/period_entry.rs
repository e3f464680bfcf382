//! Per-period attendance entered for one employee.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::lenient::{deserialize_non_negative, non_negative, parse_lenient};

use super::EmployeeId;

/// Days and overtime hours worked by one employee in the current pay period.
///
/// Entries are transient: they live for one calculation session and are
/// discarded once the period has been exported.
///
/// # Example
///
/// ```
/// use paysplit_engine::models::{EmployeeId, PeriodEntry};
/// use rust_decimal::Decimal;
///
/// let entry = PeriodEntry::from_input(EmployeeId(1), "10", "not a number");
/// assert_eq!(entry.days_worked, Decimal::from(10));
/// assert_eq!(entry.overtime_hours, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodEntry {
    /// The employee this entry belongs to.
    pub employee_id: EmployeeId,
    /// Days worked in the period.
    #[serde(default, deserialize_with = "deserialize_non_negative")]
    pub days_worked: Decimal,
    /// Overtime hours worked in the period.
    #[serde(default, deserialize_with = "deserialize_non_negative")]
    pub overtime_hours: Decimal,
}

impl PeriodEntry {
    /// Creates an entry, clamping negative values to zero.
    pub fn new(employee_id: EmployeeId, days_worked: Decimal, overtime_hours: Decimal) -> Self {
        Self {
            employee_id,
            days_worked: non_negative(days_worked),
            overtime_hours: non_negative(overtime_hours),
        }
    }

    /// Creates an entry with nothing worked yet.
    pub fn empty(employee_id: EmployeeId) -> Self {
        Self::new(employee_id, Decimal::ZERO, Decimal::ZERO)
    }

    /// Creates an entry from the text typed into the days and overtime fields.
    pub fn from_input(employee_id: EmployeeId, days: &str, overtime_hours: &str) -> Self {
        Self {
            employee_id,
            days_worked: parse_lenient(days),
            overtime_hours: parse_lenient(overtime_hours),
        }
    }

    /// Returns true if neither days nor overtime hours have been entered.
    pub fn is_empty(&self) -> bool {
        self.days_worked.is_zero() && self.overtime_hours.is_zero()
    }
}
