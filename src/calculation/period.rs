//! Period calculation across a whole roster.
//!
//! Runs the pay split for every employee and aggregates the period total.
//! Employees are independent, so the order only affects the order of lines.

use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{
    AuditStep, AuditTrace, AuditWarning, EmployeeRate, EmployeeSplit, PaySplitResult,
    PeriodCalculation, PeriodEntry,
};

use super::bank_policy::BankCapPolicy;
use super::lenient::non_negative;
use super::pay_split::calculate_pay_split;

/// Calculates the splits and the total cost for one pay period.
///
/// Each item pairs an employee with their entry for the period. The result
/// holds one line per employee in input order, including employees who earned
/// nothing, and `total_cost` is the sum of every line's gross total at full
/// precision. A line whose gross total would push the sum past the largest
/// representable [`Decimal`] is zeroed and reported with a
/// `VALUE_OUT_OF_RANGE` warning, so the total always equals the sum of the
/// lines. A final audit step records the aggregation.
///
/// # Examples
///
/// ```
/// use paysplit_engine::calculation::{calculate_period, BankCapPolicy};
/// use paysplit_engine::models::{EmployeeId, EmployeeRate, PeriodEntry};
/// use rust_decimal::Decimal;
///
/// let giorgos = EmployeeRate {
///     id: EmployeeId(1),
///     name: "Giorgos".to_string(),
///     daily_wage: Decimal::from(50),
///     overtime_rate: Decimal::from(10),
///     bank_limit: Decimal::from(600),
/// };
/// let entry = PeriodEntry::new(EmployeeId(1), Decimal::from(10), Decimal::from(5));
///
/// let calculation = calculate_period([(&giorgos, &entry)], BankCapPolicy::CapByWage);
///
/// assert_eq!(calculation.lines.len(), 1);
/// assert_eq!(calculation.total_cost, Decimal::from(550));
/// ```
pub fn calculate_period<'a, I>(rows: I, policy: BankCapPolicy) -> PeriodCalculation
where
    I: IntoIterator<Item = (&'a EmployeeRate, &'a PeriodEntry)>,
{
    let start_time = Instant::now();
    let mut lines = Vec::new();
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings = Vec::new();
    let mut step_number: u32 = 1;

    let mut total_cost = Decimal::ZERO;

    for (rate, entry) in rows {
        let result = calculate_pay_split(rate, entry, policy, step_number);
        step_number += 1;
        warnings.extend(result.warnings);

        let split = match total_cost.checked_add(result.split.gross_total) {
            Some(total) => {
                total_cost = total;
                result.split
            }
            None => {
                warn!(employee_id = %rate.id, "Gross total overflows the period total");
                warnings.push(AuditWarning {
                    code: "VALUE_OUT_OF_RANGE".to_string(),
                    message: format!(
                        "Employee {}: gross total {} does not fit in the period total, treated as 0",
                        rate.id, result.split.gross_total
                    ),
                    severity: "medium".to_string(),
                });
                PaySplitResult::ZERO
            }
        };

        lines.push(EmployeeSplit {
            employee_id: rate.id,
            name: rate.name.clone(),
            days_worked: non_negative(entry.days_worked),
            overtime_hours: non_negative(entry.overtime_hours),
            split,
        });
        steps.push(result.audit_step);
    }

    let payable_count = lines
        .iter()
        .filter(|line| line.split.rounded().is_payable())
        .count();

    steps.push(AuditStep {
        step_number,
        rule_id: "period_total".to_string(),
        rule_name: "Period Total Cost".to_string(),
        input: serde_json::json!({
            "employee_count": lines.len(),
            "bank_cap_policy": policy.as_str()
        }),
        output: serde_json::json!({
            "total_cost": total_cost.to_string(),
            "payable_employees": payable_count
        }),
        reasoning: format!(
            "Sum of gross totals for {} employees = ${} ({} with pay to export)",
            lines.len(),
            total_cost.normalize(),
            payable_count
        ),
    });

    let duration_us = start_time.elapsed().as_micros() as u64;
    debug!(
        employees = lines.len(),
        total_cost = %total_cost,
        duration_us,
        "Period calculation completed"
    );

    PeriodCalculation {
        bank_cap_policy: policy,
        lines,
        total_cost,
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    }
}
