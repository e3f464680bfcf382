//! Pay split calculation for a single employee.
//!
//! This module computes gross pay from days and overtime hours and splits it
//! between the capped bank channel and cash.

use rust_decimal::Decimal;

use crate::models::{AuditStep, AuditWarning, EmployeeRate, PaySplitResult, PeriodEntry};

use super::bank_policy::BankCapPolicy;
use super::lenient::non_negative;

/// The result of calculating one employee's split, including the audit step.
#[derive(Debug, Clone)]
pub struct PaySplitCalculation {
    /// The computed split at full precision.
    pub split: PaySplitResult,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Warnings for inputs that had to be clamped or were out of range.
    pub warnings: Vec<AuditWarning>,
}

/// Calculates gross pay and the bank/cash split for one employee.
///
/// The calculation is:
/// 1. `gross_wage = days_worked * daily_wage`
/// 2. `gross_overtime = overtime_hours * overtime_rate`
/// 3. `gross_total = gross_wage + gross_overtime`
/// 4. `bank_pay` from the [`BankCapPolicy`] (zero if the bank limit is zero)
/// 5. `cash_pay = gross_total - bank_pay`
///
/// Negative inputs are clamped to zero and reported as warnings. A product or
/// sum that would overflow [`Decimal`] is also treated as zero and reported
/// with a `VALUE_OUT_OF_RANGE` warning; when the wage and overtime only
/// overflow together, the overtime is dropped. No rounding is applied.
///
/// # Arguments
///
/// * `rate` - The employee's wage, overtime rate and bank limit
/// * `entry` - Days and overtime hours worked in the period
/// * `policy` - Which gross amount the bank limit is compared against
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use paysplit_engine::calculation::{calculate_pay_split, BankCapPolicy};
/// use paysplit_engine::models::{EmployeeId, EmployeeRate, PeriodEntry};
/// use rust_decimal::Decimal;
///
/// let rate = EmployeeRate {
///     id: EmployeeId(1),
///     name: "Giorgos".to_string(),
///     daily_wage: Decimal::from(100),
///     overtime_rate: Decimal::from(10),
///     bank_limit: Decimal::from(600),
/// };
/// let entry = PeriodEntry::new(EmployeeId(1), Decimal::from(30), Decimal::from(10));
///
/// let result = calculate_pay_split(&rate, &entry, BankCapPolicy::CapByWage, 1);
///
/// assert_eq!(result.split.gross_total, Decimal::from(3100));
/// assert_eq!(result.split.bank_pay, Decimal::from(600));
/// assert_eq!(result.split.cash_pay, Decimal::from(2500));
/// ```
pub fn calculate_pay_split(
    rate: &EmployeeRate,
    entry: &PeriodEntry,
    policy: BankCapPolicy,
    step_number: u32,
) -> PaySplitCalculation {
    let mut warnings = Vec::new();
    let mut clamp = |field: &str, value: Decimal| -> Decimal {
        if value < Decimal::ZERO {
            warnings.push(AuditWarning {
                code: "NEGATIVE_INPUT_CLAMPED".to_string(),
                message: format!(
                    "Employee {}: negative {} ({}) treated as 0",
                    rate.id, field, value
                ),
                severity: "low".to_string(),
            });
        }
        non_negative(value)
    };

    let daily_wage = clamp("daily_wage", rate.daily_wage);
    let overtime_rate = clamp("overtime_rate", rate.overtime_rate);
    let bank_limit = clamp("bank_limit", rate.bank_limit);
    let days_worked = clamp("days_worked", entry.days_worked);
    let overtime_hours = clamp("overtime_hours", entry.overtime_hours);

    let mut out_of_range = |component: &str| -> Decimal {
        warnings.push(AuditWarning {
            code: "VALUE_OUT_OF_RANGE".to_string(),
            message: format!(
                "Employee {}: {} exceeds the largest representable amount, treated as 0",
                rate.id, component
            ),
            severity: "medium".to_string(),
        });
        Decimal::ZERO
    };

    let gross_wage = days_worked
        .checked_mul(daily_wage)
        .unwrap_or_else(|| out_of_range("gross_wage"));
    let gross_overtime = overtime_hours
        .checked_mul(overtime_rate)
        .unwrap_or_else(|| out_of_range("gross_overtime"));
    let (gross_overtime, gross_total) = match gross_wage.checked_add(gross_overtime) {
        Some(total) => (gross_overtime, total),
        None => (out_of_range("gross_overtime"), gross_wage),
    };

    let bank_pay = policy.bank_pay(bank_limit, gross_wage, gross_total);
    let cash_pay = gross_total - bank_pay;

    let split = PaySplitResult {
        gross_wage,
        gross_overtime,
        gross_total,
        bank_pay,
        cash_pay,
    };

    let reasoning = if bank_limit.is_zero() {
        format!(
            "{} days × ${} + {} h × ${} = ${}; no bank limit, all paid in cash",
            days_worked.normalize(),
            daily_wage.normalize(),
            overtime_hours.normalize(),
            overtime_rate.normalize(),
            gross_total.normalize()
        )
    } else {
        format!(
            "{} days × ${} + {} h × ${} = ${}; bank = min(${}, ${} {}) = ${}, cash = ${}",
            days_worked.normalize(),
            daily_wage.normalize(),
            overtime_hours.normalize(),
            overtime_rate.normalize(),
            gross_total.normalize(),
            bank_limit.normalize(),
            policy.basis(gross_wage, gross_total).normalize(),
            policy,
            bank_pay.normalize(),
            cash_pay.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "pay_split".to_string(),
        rule_name: "Bank/Cash Pay Split".to_string(),
        input: serde_json::json!({
            "employee_id": rate.id,
            "daily_wage": daily_wage.to_string(),
            "overtime_rate": overtime_rate.to_string(),
            "bank_limit": bank_limit.to_string(),
            "days_worked": days_worked.to_string(),
            "overtime_hours": overtime_hours.to_string(),
            "bank_cap_policy": policy.as_str()
        }),
        output: serde_json::json!({
            "gross_wage": gross_wage.to_string(),
            "gross_overtime": gross_overtime.to_string(),
            "gross_total": gross_total.to_string(),
            "bank_pay": bank_pay.to_string(),
            "cash_pay": cash_pay.to_string()
        }),
        reasoning,
    };

    PaySplitCalculation {
        split,
        audit_step,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EmployeeId;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rate(daily_wage: &str, overtime_rate: &str, bank_limit: &str) -> EmployeeRate {
        EmployeeRate {
            id: EmployeeId(1),
            name: "Giorgos".to_string(),
            daily_wage: dec(daily_wage),
            overtime_rate: dec(overtime_rate),
            bank_limit: dec(bank_limit),
        }
    }

    fn entry(days: &str, overtime_hours: &str) -> PeriodEntry {
        PeriodEntry {
            employee_id: EmployeeId(1),
            days_worked: dec(days),
            overtime_hours: dec(overtime_hours),
        }
    }

    #[test]
    fn test_wage_below_limit_all_wage_to_bank() {
        let result = calculate_pay_split(
            &rate("50", "10", "600"),
            &entry("10", "5"),
            BankCapPolicy::CapByWage,
            1,
        );

        assert_eq!(result.split.gross_wage, dec("500"));
        assert_eq!(result.split.gross_overtime, dec("50"));
        assert_eq!(result.split.gross_total, dec("550"));
        assert_eq!(result.split.bank_pay, dec("500"));
        assert_eq!(result.split.cash_pay, dec("50"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_wage_above_limit_bank_capped() {
        let result = calculate_pay_split(
            &rate("100", "10", "600"),
            &entry("30", "10"),
            BankCapPolicy::CapByWage,
            1,
        );

        assert_eq!(result.split.gross_wage, dec("3000"));
        assert_eq!(result.split.gross_overtime, dec("100"));
        assert_eq!(result.split.gross_total, dec("3100"));
        assert_eq!(result.split.bank_pay, dec("600"));
        assert_eq!(result.split.cash_pay, dec("2500"));
    }

    #[test]
    fn test_zero_bank_limit_all_cash() {
        let result = calculate_pay_split(
            &rate("80", "12", "0"),
            &entry("12", "7"),
            BankCapPolicy::CapByWage,
            1,
        );

        assert_eq!(result.split.bank_pay, Decimal::ZERO);
        assert_eq!(result.split.cash_pay, result.split.gross_total);
        assert!(result.audit_step.reasoning.contains("no bank limit"));
    }

    #[test]
    fn test_cap_by_gross_routes_overtime_to_bank() {
        let result = calculate_pay_split(
            &rate("50", "10", "600"),
            &entry("10", "5"),
            BankCapPolicy::CapByGross,
            1,
        );

        assert_eq!(result.split.bank_pay, dec("550"));
        assert_eq!(result.split.cash_pay, Decimal::ZERO);
    }

    #[test]
    fn test_overtime_only_never_reaches_bank_under_cap_by_wage() {
        let result = calculate_pay_split(
            &rate("50", "10", "600"),
            &entry("0", "8"),
            BankCapPolicy::CapByWage,
            1,
        );

        assert_eq!(result.split.gross_total, dec("80"));
        assert_eq!(result.split.bank_pay, Decimal::ZERO);
        assert_eq!(result.split.cash_pay, dec("80"));
    }

    #[test]
    fn test_fractional_days_keep_full_precision() {
        let result = calculate_pay_split(
            &rate("33.333", "0", "0"),
            &entry("1.5", "0"),
            BankCapPolicy::CapByWage,
            1,
        );

        assert_eq!(result.split.gross_total, dec("49.9995"));
    }

    #[test]
    fn test_negative_days_treated_as_zero_with_warning() {
        let result = calculate_pay_split(
            &rate("50", "10", "600"),
            &entry("-4", "0"),
            BankCapPolicy::CapByWage,
            1,
        );

        assert_eq!(result.split, PaySplitResult::ZERO);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "NEGATIVE_INPUT_CLAMPED");
        assert!(result.warnings[0].message.contains("days_worked"));
    }

    #[test]
    fn test_negative_bank_limit_treated_as_no_bank() {
        let result = calculate_pay_split(
            &rate("50", "10", "-600"),
            &entry("10", "0"),
            BankCapPolicy::CapByWage,
            1,
        );

        assert_eq!(result.split.bank_pay, Decimal::ZERO);
        assert_eq!(result.split.cash_pay, dec("500"));
    }

    #[test]
    fn test_audit_step_records_inputs_and_outputs() {
        let result = calculate_pay_split(
            &rate("50", "10", "600"),
            &entry("10", "5"),
            BankCapPolicy::CapByWage,
            7,
        );

        assert_eq!(result.audit_step.step_number, 7);
        assert_eq!(result.audit_step.rule_id, "pay_split");
        assert_eq!(result.audit_step.input["bank_cap_policy"], "cap_by_wage");
        assert_eq!(result.audit_step.input["employee_id"], 1);
        assert_eq!(result.audit_step.output["bank_pay"], "500");
        assert!(result.audit_step.reasoning.contains("bank = min($600, $500 cap_by_wage)"));
    }

    #[test]
    fn test_overflowing_wage_treated_as_zero_with_warning() {
        let result = calculate_pay_split(
            &rate("100", "10", "600"),
            &entry("79228162514264337593543950335", "5"),
            BankCapPolicy::CapByWage,
            1,
        );

        assert_eq!(result.split.gross_wage, Decimal::ZERO);
        assert_eq!(result.split.gross_overtime, dec("50"));
        assert_eq!(result.split.gross_total, dec("50"));
        assert_eq!(result.split.bank_pay, Decimal::ZERO);
        assert_eq!(result.split.cash_pay, dec("50"));
        assert!(result.split.is_balanced());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "VALUE_OUT_OF_RANGE");
        assert!(result.warnings[0].message.contains("gross_wage"));
    }

    #[test]
    fn test_overflowing_overtime_treated_as_zero_with_warning() {
        let result = calculate_pay_split(
            &rate("50", "79228162514264337593543950335", "600"),
            &entry("10", "2"),
            BankCapPolicy::CapByGross,
            1,
        );

        assert_eq!(result.split.gross_wage, dec("500"));
        assert_eq!(result.split.gross_overtime, Decimal::ZERO);
        assert_eq!(result.split.gross_total, dec("500"));
        assert_eq!(result.split.bank_pay, dec("500"));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].message.contains("gross_overtime"));
    }

    #[test]
    fn test_overflowing_total_drops_overtime() {
        let half = Decimal::MAX / Decimal::TWO;
        let result = calculate_pay_split(
            &EmployeeRate {
                daily_wage: half,
                overtime_rate: half,
                ..rate("0", "0", "600")
            },
            &entry("1.5", "1.5"),
            BankCapPolicy::CapByWage,
            1,
        );

        assert_eq!(result.split.gross_overtime, Decimal::ZERO);
        assert_eq!(result.split.gross_total, result.split.gross_wage);
        assert_eq!(result.split.bank_pay, dec("600"));
        assert!(result.split.is_balanced());
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, "VALUE_OUT_OF_RANGE");
        assert_eq!(
            result.audit_step.output["gross_overtime"],
            serde_json::json!("0")
        );
    }

    #[test]
    fn test_split_is_always_balanced() {
        let result = calculate_pay_split(
            &rate("47.13", "9.99", "512.5"),
            &entry("11.5", "3.25"),
            BankCapPolicy::CapByWage,
            1,
        );
        assert!(result.split.is_balanced());
    }
}
