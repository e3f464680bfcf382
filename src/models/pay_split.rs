//! The derived bank/cash split for one employee.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of decimal places used when presenting or exporting amounts.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds an amount for presentation or export.
///
/// Calculations keep full precision; this is applied only at the edges.
///
/// # Example
///
/// ```
/// use paysplit_engine::models::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("10.005").unwrap()), Decimal::from_str("10.01").unwrap());
/// assert_eq!(round_currency(Decimal::from_str("10.004").unwrap()), Decimal::from_str("10.00").unwrap());
/// ```
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(
        CURRENCY_DECIMAL_PLACES,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Gross pay for one employee and how it is split between bank and cash.
///
/// `bank_pay + cash_pay == gross_total` holds exactly for every value produced
/// by the calculator, and for the [`rounded`](PaySplitResult::rounded) form.
///
/// # Example
///
/// ```
/// use paysplit_engine::models::PaySplitResult;
/// use rust_decimal::Decimal;
///
/// let split = PaySplitResult {
///     gross_wage: Decimal::from(500),
///     gross_overtime: Decimal::from(50),
///     gross_total: Decimal::from(550),
///     bank_pay: Decimal::from(500),
///     cash_pay: Decimal::from(50),
/// };
/// assert!(split.is_balanced());
/// assert!(split.is_payable());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaySplitResult {
    /// Days worked multiplied by the daily wage.
    pub gross_wage: Decimal,
    /// Overtime hours multiplied by the overtime rate.
    pub gross_overtime: Decimal,
    /// Gross wage plus gross overtime.
    pub gross_total: Decimal,
    /// Portion routed to the capped bank channel.
    pub bank_pay: Decimal,
    /// Remainder paid in cash.
    pub cash_pay: Decimal,
}

impl PaySplitResult {
    /// A split where nothing was earned.
    pub const ZERO: PaySplitResult = PaySplitResult {
        gross_wage: Decimal::ZERO,
        gross_overtime: Decimal::ZERO,
        gross_total: Decimal::ZERO,
        bank_pay: Decimal::ZERO,
        cash_pay: Decimal::ZERO,
    };

    /// Returns true if bank and cash add up to the gross total.
    pub fn is_balanced(&self) -> bool {
        self.bank_pay + self.cash_pay == self.gross_total
    }

    /// Returns true if the employee earned anything in the period.
    pub fn is_payable(&self) -> bool {
        self.gross_total > Decimal::ZERO
    }

    /// Returns the split rounded for presentation.
    ///
    /// Cash is derived from the rounded total and rounded bank amount so the
    /// rounded split still balances.
    pub fn rounded(&self) -> PaySplitResult {
        let gross_total = round_currency(self.gross_total);
        let bank_pay = round_currency(self.bank_pay);
        PaySplitResult {
            gross_wage: round_currency(self.gross_wage),
            gross_overtime: round_currency(self.gross_overtime),
            gross_total,
            bank_pay,
            cash_pay: gross_total - bank_pay,
        }
    }
}

impl Default for PaySplitResult {
    fn default() -> Self {
        Self::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_round_currency_midpoint_away_from_zero() {
        assert_eq!(round_currency(dec("2.345")), dec("2.35"));
        assert_eq!(round_currency(dec("2.344")), dec("2.34"));
        assert_eq!(round_currency(dec("100")), dec("100"));
    }

    #[test]
    fn test_zero_split_is_balanced_but_not_payable() {
        let split = PaySplitResult::ZERO;
        assert!(split.is_balanced());
        assert!(!split.is_payable());
        assert_eq!(split, PaySplitResult::default());
    }

    #[test]
    fn test_rounded_split_stays_balanced() {
        // 3.333 days at 10.005 would drift if cash were rounded independently
        let split = PaySplitResult {
            gross_wage: dec("33.346665"),
            gross_overtime: dec("0.005"),
            gross_total: dec("33.351665"),
            bank_pay: dec("33.346665"),
            cash_pay: dec("0.005"),
        };

        let rounded = split.rounded();
        assert_eq!(rounded.gross_total, dec("33.35"));
        assert_eq!(rounded.bank_pay, dec("33.35"));
        assert_eq!(rounded.cash_pay, dec("0.00"));
        assert!(rounded.is_balanced());
    }

    #[test]
    fn test_serialize_split_uses_snake_case_fields() {
        let split = PaySplitResult {
            gross_wage: dec("500"),
            gross_overtime: dec("50"),
            gross_total: dec("550"),
            bank_pay: dec("500"),
            cash_pay: dec("50"),
        };
        let json = serde_json::to_string(&split).unwrap();
        assert!(json.contains("\"gross_total\":\"550\""));
        assert!(json.contains("\"cash_pay\":\"50\""));
    }
}
