//! Working state of one pay period.
//!
//! A [`PayrollSession`] pairs every employee in the roster with the days and
//! overtime hours entered for them, and recalculates on demand.

use chrono::NaiveDate;

use crate::calculation::{BankCapPolicy, calculate_period, parse_lenient};
use crate::error::{PayrollError, PayrollResult};
use crate::models::{EmployeeId, EmployeeRate, PeriodCalculation, PeriodEntry, PeriodSubmission};

/// Date format accepted for period boundaries.
pub const PERIOD_DATE_FORMAT: &str = "%Y-%m-%d";

/// The roster and the entries typed in for the current pay period.
///
/// Every roster employee has exactly one entry, kept in roster order.
///
/// # Example
///
/// ```
/// use paysplit_engine::calculation::BankCapPolicy;
/// use paysplit_engine::models::{EmployeeId, EmployeeRate};
/// use paysplit_engine::session::PayrollSession;
/// use rust_decimal::Decimal;
///
/// let roster = vec![EmployeeRate {
///     id: EmployeeId(1),
///     name: "Giorgos".to_string(),
///     daily_wage: Decimal::from(50),
///     overtime_rate: Decimal::from(10),
///     bank_limit: Decimal::from(600),
/// }];
/// let mut session = PayrollSession::new(roster, BankCapPolicy::CapByWage);
/// session.set_days(EmployeeId(1), "10")?;
/// session.set_overtime_hours(EmployeeId(1), "5")?;
///
/// assert_eq!(session.calculate().total_cost, Decimal::from(550));
/// # Ok::<(), paysplit_engine::error::PayrollError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollSession {
    rows: Vec<(EmployeeRate, PeriodEntry)>,
    policy: BankCapPolicy,
}

impl PayrollSession {
    /// Starts a session with an empty entry for every employee.
    pub fn new(roster: Vec<EmployeeRate>, policy: BankCapPolicy) -> Self {
        let rows = roster
            .into_iter()
            .map(|rate| {
                let entry = PeriodEntry::empty(rate.id);
                (rate, entry)
            })
            .collect();
        Self { rows, policy }
    }

    /// Returns the bank cap policy used for calculations.
    pub fn policy(&self) -> BankCapPolicy {
        self.policy
    }

    /// Returns the roster in the order it was received.
    pub fn roster(&self) -> impl Iterator<Item = &EmployeeRate> {
        self.rows.iter().map(|(rate, _)| rate)
    }

    /// Returns the number of employees in the roster.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up an employee by id.
    pub fn employee(&self, id: EmployeeId) -> Option<&EmployeeRate> {
        self.rows
            .iter()
            .find(|(rate, _)| rate.id == id)
            .map(|(rate, _)| rate)
    }

    /// Returns the entry for an employee.
    pub fn entry(&self, id: EmployeeId) -> Option<&PeriodEntry> {
        self.rows
            .iter()
            .find(|(rate, _)| rate.id == id)
            .map(|(_, entry)| entry)
    }

    /// Replaces the roster after a refresh.
    ///
    /// Entries of employees still present are kept, entries of removed
    /// employees are dropped, and new employees start with an empty entry.
    pub fn replace_roster(&mut self, roster: Vec<EmployeeRate>) {
        let mut previous = std::mem::take(&mut self.rows);
        self.rows = roster
            .into_iter()
            .map(|rate| {
                let entry = previous
                    .iter()
                    .position(|(old, _)| old.id == rate.id)
                    .map(|index| previous.swap_remove(index).1)
                    .unwrap_or_else(|| PeriodEntry::empty(rate.id));
                (rate, entry)
            })
            .collect();
    }

    /// Sets the days worked from the text typed for an employee.
    pub fn set_days(&mut self, id: EmployeeId, text: &str) -> PayrollResult<()> {
        self.entry_mut(id)?.days_worked = parse_lenient(text);
        Ok(())
    }

    /// Sets the overtime hours from the text typed for an employee.
    pub fn set_overtime_hours(&mut self, id: EmployeeId, text: &str) -> PayrollResult<()> {
        self.entry_mut(id)?.overtime_hours = parse_lenient(text);
        Ok(())
    }

    fn entry_mut(&mut self, id: EmployeeId) -> PayrollResult<&mut PeriodEntry> {
        self.rows
            .iter_mut()
            .find(|(rate, _)| rate.id == id)
            .map(|(_, entry)| entry)
            .ok_or(PayrollError::UnknownEmployee { id })
    }

    /// Recalculates every employee's split and the period total.
    pub fn calculate(&self) -> PeriodCalculation {
        calculate_period(self.rows.iter().map(|(rate, entry)| (rate, entry)), self.policy)
    }

    /// Builds the snapshot to submit for the period.
    ///
    /// Both dates are required in `YYYY-MM-DD` form and the end may not come
    /// before the start. The roster is recalculated first and only employees
    /// whose gross total rounds to at least one cent are included; if there
    /// are none the period is rejected with [`PayrollError::EmptyPeriod`].
    pub fn submission(
        &self,
        date_start: Option<&str>,
        date_end: Option<&str>,
    ) -> PayrollResult<PeriodSubmission> {
        let start = parse_period_date("date_start", date_start)?;
        let end = parse_period_date("date_end", date_end)?;
        if end < start {
            return Err(PayrollError::InvalidPeriod {
                message: format!("date_end {} is before date_start {}", end, start),
            });
        }

        let calculation = self.calculate();
        let submission = PeriodSubmission::from_calculation(start, end, &calculation);
        if submission.line_items.is_empty() {
            return Err(PayrollError::EmptyPeriod);
        }
        Ok(submission)
    }
}

fn parse_period_date(field: &str, text: Option<&str>) -> PayrollResult<NaiveDate> {
    let text = text.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(PayrollError::InvalidPeriod {
            message: format!("{} is required", field),
        });
    }
    NaiveDate::parse_from_str(text, PERIOD_DATE_FORMAT).map_err(|e| PayrollError::InvalidPeriod {
        message: format!("{} '{}' is not a valid date: {}", field, text, e),
    })
}
