//! Employee rate model and related types.
//!
//! This module defines the [`EmployeeRate`] struct used by the pay split
//! calculator, the [`EmployeeDraft`] used to create employees, and the
//! [`EmployeeId`] assigned by the payroll server.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::lenient::deserialize_non_negative;

/// Server-assigned identifier of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub i64);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents an active employee and the rates used to pay them.
///
/// Employees are soft-deleted on the server, so a rate that disappears from
/// the roster may still appear in historical pay period records.
///
/// Numeric fields are deserialized leniently: numbers, numeric strings and
/// `null` are all accepted, and anything negative or unparseable becomes zero.
///
/// # Example
///
/// ```
/// use paysplit_engine::models::{EmployeeId, EmployeeRate};
/// use rust_decimal::Decimal;
///
/// let json = r#"{"id": 3, "name": "Nikos", "daily_wage": 50, "overtime_cost": "10", "bank_limit": null}"#;
/// let rate: EmployeeRate = serde_json::from_str(json).unwrap();
///
/// assert_eq!(rate.id, EmployeeId(3));
/// assert_eq!(rate.overtime_rate, Decimal::from(10));
/// assert!(!rate.has_bank_allocation());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRate {
    /// Server-assigned identifier.
    pub id: EmployeeId,
    /// Display name of the employee.
    pub name: String,
    /// Pay for one day worked.
    #[serde(default, deserialize_with = "deserialize_non_negative")]
    pub daily_wage: Decimal,
    /// Pay for one hour of overtime.
    #[serde(
        default,
        alias = "overtime_cost",
        deserialize_with = "deserialize_non_negative"
    )]
    pub overtime_rate: Decimal,
    /// Maximum amount routed to the bank channel per period (0 = none).
    #[serde(default, deserialize_with = "deserialize_non_negative")]
    pub bank_limit: Decimal,
}

impl EmployeeRate {
    /// Returns true if part of this employee's pay can be routed to the bank.
    pub fn has_bank_allocation(&self) -> bool {
        self.bank_limit > Decimal::ZERO
    }

    /// Returns a copy of this employee with the draft's name and rates.
    pub fn with_draft(&self, draft: &EmployeeDraft) -> Self {
        Self {
            id: self.id,
            name: draft.name.clone(),
            daily_wage: draft.daily_wage,
            overtime_rate: draft.overtime_rate,
            bank_limit: draft.bank_limit,
        }
    }
}

/// A validated employee that has not been persisted yet.
///
/// Drafts are produced by [`EmployeeForm::validate`](crate::session::EmployeeForm::validate)
/// so that a name and a daily wage are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    /// Display name of the employee.
    pub name: String,
    /// Pay for one day worked.
    pub daily_wage: Decimal,
    /// Pay for one hour of overtime.
    pub overtime_rate: Decimal,
    /// Maximum amount routed to the bank channel per period (0 = none).
    pub bank_limit: Decimal,
}

impl EmployeeDraft {
    /// Attaches a server-assigned id, producing a full [`EmployeeRate`].
    pub fn with_id(self, id: EmployeeId) -> EmployeeRate {
        EmployeeRate {
            id,
            name: self.name,
            daily_wage: self.daily_wage,
            overtime_rate: self.overtime_rate,
            bank_limit: self.bank_limit,
        }
    }
}
