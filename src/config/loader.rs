//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file.

use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use reqwest::Url;

use crate::calculation::BankCapPolicy;
use crate::error::{PayrollError, PayrollResult};

use super::types::{ApiConfig, ExportConfig, PayrollConfig, ServerConfig};

/// Loads and provides access to the engine configuration.
///
/// # File Format
///
/// ```yaml
/// calculation:
///   bank_cap_policy: cap_by_wage   # or cap_by_gross
/// server:
///   base_url: "http://127.0.0.1:5000/api"
///   timeout_secs: 30
/// api:
///   bind_address: "127.0.0.1:8080"
/// export:
///   output_dir: "./exports"
///   file_prefix: "payroll"
/// ```
///
/// # Example
///
/// ```no_run
/// use paysplit_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
/// println!("Bank cap policy: {}", loader.bank_cap_policy());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML or unknown policy names (`ConfigParseError`)
    /// - A value is out of range, such as a malformed server URL (`ConfigParseError`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use paysplit_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/payroll.yaml")?;
    /// # Ok::<(), paysplit_engine::error::PayrollError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> PayrollResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PayrollError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse(&content, &path_str)
    }

    /// Parses configuration from YAML text.
    ///
    /// # Example
    ///
    /// ```
    /// use paysplit_engine::calculation::BankCapPolicy;
    /// use paysplit_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::from_yaml_str("calculation:\n  bank_cap_policy: cap_by_gross\n")?;
    /// assert_eq!(loader.bank_cap_policy(), BankCapPolicy::CapByGross);
    /// # Ok::<(), paysplit_engine::error::PayrollError>(())
    /// ```
    pub fn from_yaml_str(yaml: &str) -> PayrollResult<Self> {
        Self::parse(yaml, "<inline>")
    }

    /// Wraps an already-built configuration after validating it.
    pub fn from_config(config: PayrollConfig) -> PayrollResult<Self> {
        Self::validate(&config, "<in-memory>")?;
        Ok(Self { config })
    }

    fn parse(content: &str, path: &str) -> PayrollResult<Self> {
        // An empty YAML document deserializes as unit, not as an empty map
        let config: PayrollConfig = if content.trim().is_empty() {
            PayrollConfig::default()
        } else {
            serde_yaml::from_str(content).map_err(|e| PayrollError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?
        };

        Self::validate(&config, path)?;
        Ok(Self { config })
    }

    fn validate(config: &PayrollConfig, path: &str) -> PayrollResult<()> {
        let invalid = |message: String| PayrollError::ConfigParseError {
            path: path.to_string(),
            message,
        };

        let url = Url::parse(&config.server.base_url).map_err(|e| {
            invalid(format!(
                "server.base_url '{}' is not a valid URL: {}",
                config.server.base_url, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!(
                "server.base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }

        if config.server.timeout_secs == 0 {
            return Err(invalid("server.timeout_secs must be greater than 0".to_string()));
        }

        config
            .api
            .bind_address
            .parse::<SocketAddr>()
            .map_err(|e| {
                invalid(format!(
                    "api.bind_address '{}' is not a socket address: {}",
                    config.api.bind_address, e
                ))
            })?;

        if config.export.file_prefix.trim().is_empty() {
            return Err(invalid("export.file_prefix must not be empty".to_string()));
        }

        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the configured bank cap policy.
    pub fn bank_cap_policy(&self) -> BankCapPolicy {
        self.config.calculation.bank_cap_policy
    }

    /// Returns the payroll server settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    /// Returns the preview API settings.
    pub fn api(&self) -> &ApiConfig {
        &self.config.api
    }

    /// Returns the export settings.
    pub fn export(&self) -> &ExportConfig {
        &self.config.export
    }

    /// Returns the preview API bind address.
    pub fn bind_address(&self) -> PayrollResult<SocketAddr> {
        self.config
            .api
            .bind_address
            .parse()
            .map_err(|e: std::net::AddrParseError| PayrollError::ConfigParseError {
                path: "api.bind_address".to_string(),
                message: e.to_string(),
            })
    }
}
