//! Client side of the payroll server contract.
//!
//! The [`PayrollGateway`] trait describes the server operations;
//! [`HttpPayrollGateway`] implements them over HTTP. Wire types in [`wire`]
//! translate between the server's JSON and the domain models.

mod gateway;
mod http;
pub mod wire;

pub use gateway::PayrollGateway;
pub use http::HttpPayrollGateway;
