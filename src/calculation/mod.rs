//! Calculation logic for the Pay Split Engine.
//!
//! This module contains the pure calculation functions: lenient coercion of
//! manually entered numbers, the bank cap policy, the per-employee pay split
//! and the period total across a roster. Nothing here performs I/O or holds
//! state between calls.

mod bank_policy;
pub mod lenient;
mod pay_split;
mod period;

pub use bank_policy::BankCapPolicy;
pub use lenient::{coerce_value, deserialize_non_negative, non_negative, parse_lenient};
pub use pay_split::{PaySplitCalculation, calculate_pay_split};
pub use period::calculate_period;
