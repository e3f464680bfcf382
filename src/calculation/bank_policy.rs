//! Bank cap policy for splitting pay between bank and cash.
//!
//! Two policies have been used for this business rule. Both are kept as
//! variants of [`BankCapPolicy`] so the choice is made in configuration rather
//! than buried in the calculator.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which part of gross pay the bank limit is measured against.
///
/// # Example
///
/// ```
/// use paysplit_engine::calculation::BankCapPolicy;
/// use rust_decimal::Decimal;
///
/// let limit = Decimal::from(600);
/// let wage = Decimal::from(500);
/// let total = Decimal::from(550);
///
/// assert_eq!(BankCapPolicy::CapByWage.bank_pay(limit, wage, total), Decimal::from(500));
/// assert_eq!(BankCapPolicy::CapByGross.bank_pay(limit, wage, total), Decimal::from(550));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BankCapPolicy {
    /// Bank receives at most the base wage; overtime is always paid in cash.
    #[default]
    CapByWage,
    /// Bank receives at most the gross total, overtime included.
    CapByGross,
}

impl BankCapPolicy {
    /// Returns the amount the bank limit is compared against.
    pub fn basis(self, gross_wage: Decimal, gross_total: Decimal) -> Decimal {
        match self {
            BankCapPolicy::CapByWage => gross_wage,
            BankCapPolicy::CapByGross => gross_total,
        }
    }

    /// Returns the bank portion of pay for the given limit and gross amounts.
    ///
    /// A limit of zero or less means the employee has no bank allocation.
    pub fn bank_pay(self, bank_limit: Decimal, gross_wage: Decimal, gross_total: Decimal) -> Decimal {
        if bank_limit <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        bank_limit.min(self.basis(gross_wage, gross_total))
    }

    /// Returns the configuration name of the policy.
    pub fn as_str(self) -> &'static str {
        match self {
            BankCapPolicy::CapByWage => "cap_by_wage",
            BankCapPolicy::CapByGross => "cap_by_gross",
        }
    }
}

impl fmt::Display for BankCapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
