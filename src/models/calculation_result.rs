//! Calculation result models for the Pay Split Engine.
//!
//! This module contains the [`PeriodCalculation`] type and its associated
//! structures that capture all outputs of a period calculation, including the
//! per-employee splits, the period total and an audit trace.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::BankCapPolicy;

use super::{EmployeeId, PaySplitResult, round_currency};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings indicate input that was corrected rather than rejected, such as a
/// negative rate clamped to zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use paysplit_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 12,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// One employee's line in a period calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSplit {
    /// The employee this line belongs to.
    pub employee_id: EmployeeId,
    /// The employee's name at calculation time.
    pub name: String,
    /// Days worked, after clamping.
    pub days_worked: Decimal,
    /// Overtime hours worked, after clamping.
    pub overtime_hours: Decimal,
    /// The computed split at full precision.
    pub split: PaySplitResult,
}

/// The result of one calculation pass over a roster.
///
/// Lines keep the roster order; the total cost is kept at full precision and
/// rounded only through [`PeriodCalculation::rounded_total_cost`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodCalculation {
    /// The bank cap policy the splits were computed with.
    pub bank_cap_policy: BankCapPolicy,
    /// One line per employee, in roster order.
    pub lines: Vec<EmployeeSplit>,
    /// Sum of every line's gross total.
    pub total_cost: Decimal,
    /// Audit trace of the calculation pass.
    pub audit_trace: AuditTrace,
}

impl PeriodCalculation {
    /// Returns the lines of employees who earned at least one cent in the
    /// period.
    ///
    /// Payability is judged on the rounded split, so a fraction of a cent that
    /// would be exported as 0.00 does not count.
    pub fn payable_lines(&self) -> impl Iterator<Item = &EmployeeSplit> {
        self.lines
            .iter()
            .filter(|line| line.split.rounded().is_payable())
    }

    /// Returns the total cost rounded for presentation.
    pub fn rounded_total_cost(&self) -> Decimal {
        round_currency(self.total_cost)
    }

    /// Finds the line for an employee.
    pub fn line_for(&self, employee_id: EmployeeId) -> Option<&EmployeeSplit> {
        self.lines.iter().find(|line| line.employee_id == employee_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_line(id: i64, total: &str) -> EmployeeSplit {
        let total = dec(total);
        EmployeeSplit {
            employee_id: EmployeeId(id),
            name: format!("Employee {}", id),
            days_worked: Decimal::ONE,
            overtime_hours: Decimal::ZERO,
            split: PaySplitResult {
                gross_wage: total,
                gross_overtime: Decimal::ZERO,
                gross_total: total,
                bank_pay: Decimal::ZERO,
                cash_pay: total,
            },
        }
    }

    fn create_calculation() -> PeriodCalculation {
        let lines = vec![
            create_line(1, "120.125"),
            create_line(2, "0"),
            create_line(3, "80"),
        ];
        PeriodCalculation {
            bank_cap_policy: BankCapPolicy::CapByWage,
            total_cost: lines.iter().map(|l| l.split.gross_total).sum(),
            lines,
            audit_trace: AuditTrace {
                steps: vec![],
                warnings: vec![],
                duration_us: 0,
            },
        }
    }

    #[test]
    fn test_payable_lines_skip_zero_totals() {
        let calculation = create_calculation();
        let ids: Vec<EmployeeId> = calculation
            .payable_lines()
            .map(|line| line.employee_id)
            .collect();
        assert_eq!(ids, vec![EmployeeId(1), EmployeeId(3)]);
    }

    #[test]
    fn test_payable_lines_skip_sub_cent_totals() {
        let mut calculation = create_calculation();
        calculation.lines.push(create_line(4, "0.004"));
        calculation.lines.push(create_line(5, "0.005"));

        let ids: Vec<EmployeeId> = calculation
            .payable_lines()
            .map(|line| line.employee_id)
            .collect();
        assert_eq!(ids, vec![EmployeeId(1), EmployeeId(3), EmployeeId(5)]);
    }

    #[test]
    fn test_rounded_total_cost() {
        let calculation = create_calculation();
        assert_eq!(calculation.total_cost, dec("200.125"));
        assert_eq!(calculation.rounded_total_cost(), dec("200.13"));
    }

    #[test]
    fn test_line_for_finds_employee() {
        let calculation = create_calculation();
        assert_eq!(
            calculation.line_for(EmployeeId(3)).map(|l| l.split.gross_total),
            Some(dec("80"))
        );
        assert!(calculation.line_for(EmployeeId(99)).is_none());
    }

    #[test]
    fn test_serialize_calculation_includes_policy() {
        let calculation = create_calculation();
        let json = serde_json::to_string(&calculation).unwrap();
        assert!(json.contains("\"bank_cap_policy\":\"cap_by_wage\""));
        assert!(json.contains("\"total_cost\":\"200.125\""));
    }
}
