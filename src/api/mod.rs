//! HTTP API module for the Pay Split Engine.
//!
//! This module provides the calculation preview endpoint, which runs the
//! bank/cash split for a roster without contacting the payroll server.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, EmployeeRequest, EntryRequest};
pub use response::{ApiError, ApiErrorResponse, CalculationResponse, LineResponse};
pub use state::AppState;
