//! Pay period session handling.
//!
//! [`PayrollSession`] holds the roster and the typed-in entries,
//! [`EmployeeForm`] validates the add/edit dialog, and
//! [`PayrollController`] ties both to a [`PayrollGateway`](crate::client::PayrollGateway).

mod controller;
mod form;
mod payroll;

pub use controller::{ExportedDocument, PayrollController};
pub use form::EmployeeForm;
pub use payroll::{PERIOD_DATE_FORMAT, PayrollSession};
