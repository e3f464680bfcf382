//! Pay Split Engine for daily-wage payroll
//!
//! This crate calculates each employee's pay for a period from days worked
//! and overtime hours, and splits it into a bank transfer capped by a
//! per-employee limit and a cash remainder. It also provides the session
//! state used to enter a period, a client for the payroll server that stores
//! employees and pay period history, and an HTTP preview endpoint.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
