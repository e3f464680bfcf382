//! Coordinates the session with the payroll server.
//!
//! The controller validates input before any request is made and only
//! touches the session after the server has accepted a change.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::calculation::BankCapPolicy;
use crate::client::PayrollGateway;
use crate::config::ExportConfig;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{EmployeeId, PayPeriodRecord, PeriodCalculation};

use super::form::EmployeeForm;
use super::payroll::PayrollSession;

/// A rendered pay period document returned by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedDocument {
    /// Suggested file name, `{prefix}_{date_start}.pdf`.
    pub file_name: String,
    /// Raw document bytes.
    pub bytes: Vec<u8>,
}

impl ExportedDocument {
    /// Writes the document into `dir`, creating the directory if needed.
    ///
    /// Returns the full path of the written file.
    pub fn write_to<P: AsRef<Path>>(&self, dir: P) -> PayrollResult<PathBuf> {
        let dir = dir.as_ref();
        let io_error = |path: &Path, e: std::io::Error| PayrollError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.bytes).map_err(|e| io_error(&path, e))?;

        info!(path = %path.display(), bytes = self.bytes.len(), "Document written");
        Ok(path)
    }
}

/// Drives a [`PayrollSession`] against a [`PayrollGateway`].
pub struct PayrollController<G: PayrollGateway> {
    gateway: G,
    session: PayrollSession,
    export: ExportConfig,
}

impl<G: PayrollGateway> PayrollController<G> {
    /// Creates a controller with an empty roster.
    ///
    /// Call [`refresh_roster`](Self::refresh_roster) to load employees.
    pub fn new(gateway: G, policy: BankCapPolicy, export: ExportConfig) -> Self {
        Self {
            gateway,
            session: PayrollSession::new(Vec::new(), policy),
            export,
        }
    }

    /// Returns the current session.
    pub fn session(&self) -> &PayrollSession {
        &self.session
    }

    /// Returns the gateway.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Reloads active employees from the server.
    pub async fn refresh_roster(&mut self) -> PayrollResult<()> {
        let roster = self.gateway.list_employees().await?;
        info!(employees = roster.len(), "Roster refreshed");
        self.session.replace_roster(roster);
        Ok(())
    }

    /// Validates the form, creates the employee and refreshes the roster.
    ///
    /// Once the server has created the employee its id is returned even if
    /// the refresh that follows fails. The failure is logged and the session
    /// keeps its previous roster until the next successful refresh.
    pub async fn add_employee(&mut self, form: &EmployeeForm) -> PayrollResult<EmployeeId> {
        let draft = form.validate()?;
        let id = self.gateway.add_employee(&draft).await?;
        self.refresh_after("add_employee").await;
        Ok(id)
    }

    /// Validates the form, updates the employee and refreshes the roster.
    ///
    /// A failed refresh after an accepted update is logged, not returned.
    pub async fn update_employee(
        &mut self,
        id: EmployeeId,
        form: &EmployeeForm,
    ) -> PayrollResult<()> {
        let draft = form.validate()?;
        let updated = self
            .session
            .employee(id)
            .ok_or(PayrollError::UnknownEmployee { id })?
            .with_draft(&draft);

        self.gateway.update_employee(&updated).await?;
        self.refresh_after("update_employee").await;
        Ok(())
    }

    /// Soft-deletes the employee and refreshes the roster.
    ///
    /// A failed refresh after an accepted delete is logged, not returned.
    pub async fn delete_employee(&mut self, id: EmployeeId) -> PayrollResult<()> {
        self.gateway.delete_employee(id).await?;
        self.refresh_after("delete_employee").await;
        Ok(())
    }

    async fn refresh_after(&mut self, operation: &str) {
        if let Err(e) = self.refresh_roster().await {
            warn!(operation, error = %e, "Change saved but roster refresh failed");
        }
    }

    /// Sets the days worked for an employee from typed text.
    pub fn set_days(&mut self, id: EmployeeId, text: &str) -> PayrollResult<()> {
        self.session.set_days(id, text)
    }

    /// Sets the overtime hours for an employee from typed text.
    pub fn set_overtime_hours(&mut self, id: EmployeeId, text: &str) -> PayrollResult<()> {
        self.session.set_overtime_hours(id, text)
    }

    /// Recalculates the current period.
    pub fn calculate(&self) -> PeriodCalculation {
        self.session.calculate()
    }

    /// Submits the period and returns the rendered document.
    ///
    /// The submission is built from a completed recalculation before the
    /// request is sent. Validation failures never reach the server.
    pub async fn export(
        &self,
        date_start: Option<&str>,
        date_end: Option<&str>,
    ) -> PayrollResult<ExportedDocument> {
        let submission = self.session.submission(date_start, date_end).inspect_err(|e| {
            warn!(error = %e, "Pay period not submitted");
        })?;
        let file_name = format!("{}_{}.pdf", self.export.file_prefix, submission.date_start);

        let bytes = self.gateway.save_payroll(&submission).await?;
        info!(
            file_name = %file_name,
            total_cost = %submission.total_cost(),
            "Pay period exported"
        );
        Ok(ExportedDocument { file_name, bytes })
    }

    /// Exports the period and writes the document to the configured directory.
    pub async fn export_to_disk(
        &self,
        date_start: Option<&str>,
        date_end: Option<&str>,
    ) -> PayrollResult<PathBuf> {
        let document = self.export(date_start, date_end).await?;
        document.write_to(&self.export.output_dir)
    }

    /// Fetches past pay periods, newest first.
    pub async fn history(&self) -> PayrollResult<Vec<PayPeriodRecord>> {
        self.gateway.history().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeDraft, EmployeeRate, PeriodSubmission};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Mutex;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    /// In-memory server with an optional forced failure.
    #[derive(Default)]
    struct FakeGateway {
        employees: Mutex<Vec<EmployeeRate>>,
        next_id: Mutex<i64>,
        saved: Mutex<Vec<PeriodSubmission>>,
        fail_with: Mutex<Option<u16>>,
        fail_operation: Mutex<Option<(String, u16)>>,
        calls: Mutex<u32>,
    }

    impl FakeGateway {
        fn with_roster(roster: Vec<EmployeeRate>) -> Self {
            let next = roster.iter().map(|r| r.id.0).max().unwrap_or(0) + 1;
            Self {
                employees: Mutex::new(roster),
                next_id: Mutex::new(next),
                ..Self::default()
            }
        }

        fn fail(&self, status: u16) {
            *self.fail_with.lock().unwrap() = Some(status);
        }

        fn fail_on(&self, operation: &str, status: u16) {
            *self.fail_operation.lock().unwrap() = Some((operation.to_string(), status));
        }

        fn check(&self, operation: &str) -> PayrollResult<()> {
            *self.calls.lock().unwrap() += 1;
            let only = match &*self.fail_operation.lock().unwrap() {
                Some((failing, status)) if failing == operation => Some(*status),
                _ => None,
            };
            match only.or(*self.fail_with.lock().unwrap()) {
                Some(status) => Err(PayrollError::ServerRejected {
                    operation: operation.to_string(),
                    status,
                }),
                None => Ok(()),
            }
        }

        fn call_count(&self) -> u32 {
            *self.calls.lock().unwrap()
        }
    }

    #[async_trait]
    impl PayrollGateway for FakeGateway {
        async fn list_employees(&self) -> PayrollResult<Vec<EmployeeRate>> {
            self.check("list_employees")?;
            Ok(self.employees.lock().unwrap().clone())
        }

        async fn add_employee(&self, draft: &EmployeeDraft) -> PayrollResult<EmployeeId> {
            self.check("add_employee")?;
            let mut next = self.next_id.lock().unwrap();
            let id = EmployeeId(*next);
            *next += 1;
            self.employees.lock().unwrap().push(draft.clone().with_id(id));
            Ok(id)
        }

        async fn update_employee(&self, employee: &EmployeeRate) -> PayrollResult<()> {
            self.check("update_employee")?;
            let mut employees = self.employees.lock().unwrap();
            if let Some(existing) = employees.iter_mut().find(|e| e.id == employee.id) {
                *existing = employee.clone();
            }
            Ok(())
        }

        async fn delete_employee(&self, id: EmployeeId) -> PayrollResult<()> {
            self.check("delete_employee")?;
            self.employees.lock().unwrap().retain(|e| e.id != id);
            Ok(())
        }

        async fn save_payroll(&self, submission: &PeriodSubmission) -> PayrollResult<Vec<u8>> {
            self.check("save_payroll")?;
            self.saved.lock().unwrap().push(submission.clone());
            Ok(b"%PDF-1.4 fake".to_vec())
        }

        async fn history(&self) -> PayrollResult<Vec<PayPeriodRecord>> {
            self.check("history")?;
            let created_at = NaiveDate::from_ymd_opt(2026, 3, 16)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap();
            Ok(self
                .saved
                .lock()
                .unwrap()
                .iter()
                .rev()
                .cloned()
                .map(|s| s.into_record(created_at))
                .collect())
        }
    }

    fn giorgos() -> EmployeeRate {
        EmployeeRate {
            id: EmployeeId(1),
            name: "Giorgos".to_string(),
            daily_wage: dec("50"),
            overtime_rate: dec("10"),
            bank_limit: dec("600"),
        }
    }

    async fn create_controller() -> PayrollController<FakeGateway> {
        let mut controller = PayrollController::new(
            FakeGateway::with_roster(vec![giorgos()]),
            BankCapPolicy::CapByWage,
            ExportConfig::default(),
        );
        controller.refresh_roster().await.unwrap();
        controller
    }

    #[tokio::test]
    async fn test_refresh_loads_roster() {
        let controller = create_controller().await;

        assert_eq!(controller.session().len(), 1);
        assert!(controller.session().employee(EmployeeId(1)).is_some());
    }

    #[tokio::test]
    async fn test_add_employee_refreshes_roster() {
        let mut controller = create_controller().await;

        let id = controller
            .add_employee(&EmployeeForm::new("Eleni", "100", "10", "600"))
            .await
            .unwrap();

        assert_eq!(id, EmployeeId(2));
        assert_eq!(controller.session().len(), 2);
        assert_eq!(controller.session().employee(id).unwrap().name, "Eleni");
    }

    #[tokio::test]
    async fn test_add_employee_returns_id_when_refresh_fails() {
        let mut controller = create_controller().await;
        let before = controller.session().clone();
        controller.gateway().fail_on("list_employees", 503);

        let id = controller
            .add_employee(&EmployeeForm::new("Eleni", "100", "10", "600"))
            .await
            .unwrap();

        assert_eq!(id, EmployeeId(2));
        assert_eq!(controller.session(), &before);
        assert_eq!(controller.gateway().employees.lock().unwrap().len(), 2);

        *controller.gateway().fail_operation.lock().unwrap() = None;
        controller.refresh_roster().await.unwrap();
        assert_eq!(controller.session().employee(id).unwrap().name, "Eleni");
    }

    #[tokio::test]
    async fn test_delete_employee_succeeds_when_refresh_fails() {
        let mut controller = create_controller().await;
        controller.gateway().fail_on("list_employees", 500);

        controller.delete_employee(EmployeeId(1)).await.unwrap();

        assert!(controller.gateway().employees.lock().unwrap().is_empty());
        assert_eq!(controller.session().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_server() {
        let mut controller = create_controller().await;
        let calls_before = controller.gateway().call_count();

        let result = controller
            .add_employee(&EmployeeForm::new("", "100", "", ""))
            .await;

        assert!(matches!(result, Err(PayrollError::InvalidEmployee { .. })));
        assert_eq!(controller.gateway().call_count(), calls_before);
    }

    #[tokio::test]
    async fn test_update_employee_applies_new_rates() {
        let mut controller = create_controller().await;
        controller.set_days(EmployeeId(1), "10").unwrap();

        controller
            .update_employee(EmployeeId(1), &EmployeeForm::new("Giorgos", "60", "10", "600"))
            .await
            .unwrap();

        assert_eq!(controller.calculate().total_cost, dec("600"));
    }

    #[tokio::test]
    async fn test_update_unknown_employee_is_rejected() {
        let mut controller = create_controller().await;

        let result = controller
            .update_employee(EmployeeId(42), &EmployeeForm::new("Ghost", "1", "", ""))
            .await;

        assert!(matches!(
            result,
            Err(PayrollError::UnknownEmployee { id }) if id == EmployeeId(42)
        ));
    }

    #[tokio::test]
    async fn test_delete_employee_removes_from_roster() {
        let mut controller = create_controller().await;

        controller.delete_employee(EmployeeId(1)).await.unwrap();

        assert!(controller.session().is_empty());
    }

    #[tokio::test]
    async fn test_server_failure_leaves_session_unchanged() {
        let mut controller = create_controller().await;
        controller.set_days(EmployeeId(1), "10").unwrap();
        let before = controller.session().clone();
        controller.gateway().fail(500);

        let result = controller.delete_employee(EmployeeId(1)).await;

        assert!(matches!(
            result,
            Err(PayrollError::ServerRejected { status: 500, .. })
        ));
        assert_eq!(controller.session(), &before);
    }

    #[tokio::test]
    async fn test_export_names_document_after_start_date() {
        let mut controller = create_controller().await;
        controller.set_days(EmployeeId(1), "10").unwrap();
        controller.set_overtime_hours(EmployeeId(1), "5").unwrap();

        let document = controller
            .export(Some("2026-03-01"), Some("2026-03-15"))
            .await
            .unwrap();

        assert_eq!(document.file_name, "payroll_2026-03-01.pdf");
        assert!(document.bytes.starts_with(b"%PDF"));

        let saved = controller.gateway().saved.lock().unwrap().clone();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].line_items[0].gross_total, dec("550"));
    }

    #[tokio::test]
    async fn test_empty_period_is_not_submitted() {
        let controller = create_controller().await;
        let calls_before = controller.gateway().call_count();

        let result = controller.export(Some("2026-03-01"), Some("2026-03-15")).await;

        assert!(matches!(result, Err(PayrollError::EmptyPeriod)));
        assert_eq!(controller.gateway().call_count(), calls_before);
    }

    #[tokio::test]
    async fn test_history_is_newest_first() {
        let mut controller = create_controller().await;
        controller.set_days(EmployeeId(1), "10").unwrap();
        controller
            .export(Some("2026-03-01"), Some("2026-03-15"))
            .await
            .unwrap();
        controller
            .export(Some("2026-03-16"), Some("2026-03-31"))
            .await
            .unwrap();

        let history = controller.history().await.unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(
            history[0].date_start(),
            NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()
        );
        assert_eq!(history[0].total_cost(), dec("500"));
    }

    #[tokio::test]
    async fn test_export_to_disk_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut controller = PayrollController::new(
            FakeGateway::with_roster(vec![giorgos()]),
            BankCapPolicy::CapByWage,
            ExportConfig {
                output_dir: dir.path().join("exports"),
                file_prefix: "payroll".to_string(),
            },
        );
        controller.refresh_roster().await.unwrap();
        controller.set_days(EmployeeId(1), "2").unwrap();

        let path = controller
            .export_to_disk(Some("2026-04-01"), Some("2026-04-15"))
            .await
            .unwrap();

        assert!(path.ends_with("payroll_2026-04-01.pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.4 fake".to_vec());
    }
}
