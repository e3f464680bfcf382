//! The payroll server contract as a trait.

use async_trait::async_trait;

use crate::error::PayrollResult;
use crate::models::{EmployeeDraft, EmployeeId, EmployeeRate, PayPeriodRecord, PeriodSubmission};

/// Operations the payroll server offers.
///
/// Every method is a single request with no automatic retry. Failures come
/// back as [`PayrollError::Transport`](crate::error::PayrollError::Transport),
/// [`PayrollError::ServerRejected`](crate::error::PayrollError::ServerRejected)
/// or [`PayrollError::Decode`](crate::error::PayrollError::Decode).
#[async_trait]
pub trait PayrollGateway: Send + Sync {
    /// Lists active employees in the server's order.
    async fn list_employees(&self) -> PayrollResult<Vec<EmployeeRate>>;

    /// Creates an employee and returns the id the server assigned.
    async fn add_employee(&self, draft: &EmployeeDraft) -> PayrollResult<EmployeeId>;

    /// Replaces every field of an existing employee.
    async fn update_employee(&self, employee: &EmployeeRate) -> PayrollResult<()>;

    /// Soft-deletes an employee; past records are unaffected.
    async fn delete_employee(&self, id: EmployeeId) -> PayrollResult<()>;

    /// Persists a pay period and returns the rendered document bytes.
    async fn save_payroll(&self, submission: &PeriodSubmission) -> PayrollResult<Vec<u8>>;

    /// Lists persisted pay periods, newest first.
    async fn history(&self) -> PayrollResult<Vec<PayPeriodRecord>>;
}
