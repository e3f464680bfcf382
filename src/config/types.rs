//! Configuration types for the Pay Split Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every section and field
//! has a default, so an empty file is a valid configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::calculation::BankCapPolicy;

/// Calculation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationConfig {
    /// Which gross amount the bank limit is measured against.
    pub bank_cap_policy: BankCapPolicy,
}

/// Connection settings for the payroll server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL the contract paths are appended to (e.g. "http://127.0.0.1:5000/api").
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl ServerConfig {
    /// Returns the request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000/api".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Settings for the calculation preview API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Socket address the API listens on.
    pub bind_address: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// Settings for exported period documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exported documents are written to.
    pub output_dir: PathBuf,
    /// File name prefix; documents are named `{prefix}_{date_start}.pdf`.
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./exports"),
            file_prefix: "payroll".to_string(),
        }
    }
}

/// The complete engine configuration loaded from YAML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Calculation settings.
    pub calculation: CalculationConfig,
    /// Payroll server connection settings.
    pub server: ServerConfig,
    /// Preview API settings.
    pub api: ApiConfig,
    /// Export settings.
    pub export: ExportConfig,
}
