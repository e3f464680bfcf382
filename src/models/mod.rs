//! Core data models for the Pay Split Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod employee;
mod pay_period_record;
mod pay_split;
mod period_entry;

pub use calculation_result::{
    AuditStep, AuditTrace, AuditWarning, EmployeeSplit, PeriodCalculation,
};
pub use employee::{EmployeeDraft, EmployeeId, EmployeeRate};
pub use pay_period_record::{LineItem, PayPeriodRecord, PeriodSubmission};
pub use pay_split::{CURRENCY_DECIMAL_PLACES, PaySplitResult, round_currency};
pub use period_entry::PeriodEntry;
