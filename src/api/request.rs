//! Request types for the Pay Split Engine API.
//!
//! This module defines the JSON request structures for the `/calculate` endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{BankCapPolicy, deserialize_non_negative};
use crate::models::{EmployeeId, EmployeeRate, PeriodEntry};

/// Request body for the `/calculate` endpoint.
///
/// Contains every employee of the period with the days and overtime hours
/// entered for them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Overrides the configured bank cap policy for this request.
    #[serde(default)]
    pub bank_cap_policy: Option<BankCapPolicy>,
    /// One entry per employee.
    pub entries: Vec<EntryRequest>,
}

/// One employee's entry in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryRequest {
    /// The employee and their rates.
    pub employee: EmployeeRequest,
    /// Days worked in the period.
    #[serde(default, deserialize_with = "deserialize_non_negative")]
    pub days_worked: Decimal,
    /// Overtime hours worked in the period.
    #[serde(default, deserialize_with = "deserialize_non_negative")]
    pub overtime_hours: Decimal,
}

/// Employee information in a calculation request.
///
/// Rates are coerced like form input: numbers or numeric strings, with
/// anything negative or unparseable treated as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Identifier of the employee.
    pub id: EmployeeId,
    /// Display name.
    pub name: String,
    /// Pay per day.
    #[serde(default, deserialize_with = "deserialize_non_negative")]
    pub daily_wage: Decimal,
    /// Pay per overtime hour.
    #[serde(
        default,
        alias = "overtime_cost",
        deserialize_with = "deserialize_non_negative"
    )]
    pub overtime_rate: Decimal,
    /// Bank limit (0 = none).
    #[serde(default, deserialize_with = "deserialize_non_negative")]
    pub bank_limit: Decimal,
}

impl From<EmployeeRequest> for EmployeeRate {
    fn from(req: EmployeeRequest) -> Self {
        EmployeeRate {
            id: req.id,
            name: req.name,
            daily_wage: req.daily_wage,
            overtime_rate: req.overtime_rate,
            bank_limit: req.bank_limit,
        }
    }
}

impl From<EntryRequest> for (EmployeeRate, PeriodEntry) {
    fn from(req: EntryRequest) -> Self {
        let entry = PeriodEntry::new(req.employee.id, req.days_worked, req.overtime_hours);
        (req.employee.into(), entry)
    }
}
