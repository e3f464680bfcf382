//! HTTP implementation of the payroll server contract.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{EmployeeDraft, EmployeeId, EmployeeRate, PayPeriodRecord, PeriodSubmission};

use super::gateway::PayrollGateway;
use super::wire::{
    CreatedEmployee, DeleteEmployeeBody, EmployeeRow, HistoryRow, NewEmployeeBody,
    SavePayrollBody, UpdateEmployeeBody,
};

/// Talks to the payroll server over HTTP with JSON bodies.
///
/// Paths from the contract (`/employees`, `/save_payroll`, ...) are appended
/// to the configured base URL.
///
/// # Example
///
/// ```no_run
/// use paysplit_engine::client::{HttpPayrollGateway, PayrollGateway};
/// use paysplit_engine::config::ServerConfig;
///
/// # async fn run() -> paysplit_engine::error::PayrollResult<()> {
/// let gateway = HttpPayrollGateway::new(&ServerConfig::default())?;
/// let roster = gateway.list_employees().await?;
/// println!("{} active employees", roster.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpPayrollGateway {
    client: Client,
    base_url: String,
}

impl HttpPayrollGateway {
    /// Builds a gateway from the server settings.
    pub fn new(config: &ServerConfig) -> PayrollResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PayrollError::Transport {
                operation: "build_client".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Returns the base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send(&self, operation: &str, request: RequestBuilder) -> PayrollResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(operation, error = %e, "Payroll server unreachable");
            PayrollError::Transport {
                operation: operation.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(operation, status = status.as_u16(), "Payroll server rejected request");
            return Err(PayrollError::ServerRejected {
                operation: operation.to_string(),
                status: status.as_u16(),
            });
        }

        debug!(operation, status = status.as_u16(), "Payroll server responded");
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(operation: &str, response: Response) -> PayrollResult<T> {
        response.json::<T>().await.map_err(|e| PayrollError::Decode {
            operation: operation.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl PayrollGateway for HttpPayrollGateway {
    async fn list_employees(&self) -> PayrollResult<Vec<EmployeeRate>> {
        let operation = "list_employees";
        let response = self
            .send(operation, self.client.get(self.url("/employees")))
            .await?;
        let rows: Vec<EmployeeRow> = Self::decode(operation, response).await?;

        let roster: Vec<EmployeeRate> = rows
            .into_iter()
            .filter(EmployeeRow::is_active)
            .map(EmployeeRate::from)
            .collect();
        debug!(employees = roster.len(), "Roster loaded");
        Ok(roster)
    }

    async fn add_employee(&self, draft: &EmployeeDraft) -> PayrollResult<EmployeeId> {
        let operation = "add_employee";
        let request = self
            .client
            .post(self.url("/employees"))
            .json(&NewEmployeeBody::from(draft));
        let response = self.send(operation, request).await?;
        let created: CreatedEmployee = Self::decode(operation, response).await?;

        info!(employee_id = %created.id, name = %draft.name, "Employee added");
        Ok(created.id)
    }

    async fn update_employee(&self, employee: &EmployeeRate) -> PayrollResult<()> {
        let request = self
            .client
            .post(self.url("/employees/update"))
            .json(&UpdateEmployeeBody::from(employee));
        self.send("update_employee", request).await?;

        info!(employee_id = %employee.id, "Employee updated");
        Ok(())
    }

    async fn delete_employee(&self, id: EmployeeId) -> PayrollResult<()> {
        let request = self
            .client
            .post(self.url("/employees/delete"))
            .json(&DeleteEmployeeBody { id });
        self.send("delete_employee", request).await?;

        info!(employee_id = %id, "Employee deleted");
        Ok(())
    }

    async fn save_payroll(&self, submission: &PeriodSubmission) -> PayrollResult<Vec<u8>> {
        let operation = "save_payroll";
        let request = self
            .client
            .post(self.url("/save_payroll"))
            .json(&SavePayrollBody::from(submission));
        let response = self.send(operation, request).await?;
        let bytes = response.bytes().await.map_err(|e| PayrollError::Decode {
            operation: operation.to_string(),
            message: e.to_string(),
        })?;

        info!(
            date_start = %submission.date_start,
            date_end = %submission.date_end,
            line_items = submission.line_items.len(),
            bytes = bytes.len(),
            "Pay period saved"
        );
        Ok(bytes.to_vec())
    }

    async fn history(&self) -> PayrollResult<Vec<PayPeriodRecord>> {
        let operation = "history";
        let response = self
            .send(operation, self.client.get(self.url("/history")))
            .await?;
        let rows: Vec<HistoryRow> = Self::decode(operation, response).await?;

        rows.into_iter().map(HistoryRow::into_record).collect()
    }
}
