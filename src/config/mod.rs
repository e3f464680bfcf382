//! Configuration loading and management for the Pay Split Engine.
//!
//! This module loads the engine configuration from a YAML file: the bank cap
//! policy, the payroll server connection, the preview API address and export
//! settings.
//!
//! # Example
//!
//! ```no_run
//! use paysplit_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Payroll server: {}", config.server().base_url);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{ApiConfig, CalculationConfig, ExportConfig, PayrollConfig, ServerConfig};
