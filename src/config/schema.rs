//! Configuration schema types
//!
//! This module defines the configuration structure for Rulebridge.

use crate::config::SecretString;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest number of operations the Graph batch endpoint accepts in one call
pub const MAX_BATCH_SIZE: usize = 50;

/// Main Rulebridge configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleBridgeConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Graph endpoint and session credentials
    pub graph: GraphConfig,

    /// Batching and pacing of transfers
    #[serde(default)]
    pub transfer: TransferConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RuleBridgeConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.graph.validate()?;
        self.transfer.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (read from the API, never write)
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Graph endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Endpoint host, without the version segment
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API version segment (e.g. "v23.0")
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Session access token of the logged-in user
    /// Stored securely in memory and automatically zeroized on drop
    pub access_token: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Locale sent with rule writes
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl GraphConfig {
    /// Creates a configuration for `access_token` with default endpoint settings
    pub fn new(access_token: SecretString) -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            access_token,
            timeout_seconds: default_timeout_seconds(),
            locale: default_locale(),
        }
    }

    /// Versioned API root, always ending in `/`
    pub fn api_root(&self) -> String {
        format!(
            "{}/{}/",
            self.base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/')
        )
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("graph.base_url cannot be empty".to_string());
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "graph.base_url must start with http:// or https://, got '{}'",
                self.base_url
            ));
        }
        if !is_api_version(&self.api_version) {
            return Err(format!(
                "graph.api_version must look like 'v23.0', got '{}'",
                self.api_version
            ));
        }
        if self.access_token.expose_secret().is_blank() {
            return Err("graph.access_token cannot be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("graph.timeout_seconds must be > 0".to_string());
        }
        if self.locale.is_empty() {
            return Err("graph.locale cannot be empty".to_string());
        }
        Ok(())
    }
}

fn is_api_version(version: &str) -> bool {
    let Some(rest) = version.strip_prefix('v') else {
        return false;
    };
    let mut parts = rest.split('.');
    let (Some(major), Some(minor), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    [major, minor]
        .iter()
        .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

/// Batching and pacing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferConfig {
    /// Operations per batch request
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between create batches, in milliseconds
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,

    /// Pause between accounts in multi-account operations, in milliseconds
    #[serde(default = "default_account_delay_ms")]
    pub account_delay_ms: u64,

    /// Pause between delete batches, in milliseconds
    #[serde(default = "default_delete_delay_ms")]
    pub delete_delay_ms: u64,

    /// Create rules through the batch endpoint (false = one request per rule)
    #[serde(default = "default_true")]
    pub use_batch_requests: bool,

    /// Status for imported rules that don't carry one
    #[serde(default = "default_status")]
    pub default_status: String,

    /// Directory export bundles are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            batch_delay_ms: default_batch_delay_ms(),
            account_delay_ms: default_account_delay_ms(),
            delete_delay_ms: default_delete_delay_ms(),
            use_batch_requests: true,
            default_status: default_status(),
            output_dir: default_output_dir(),
        }
    }
}

impl TransferConfig {
    fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 || self.batch_size > MAX_BATCH_SIZE {
            return Err(format!(
                "transfer.batch_size must be between 1 and {MAX_BATCH_SIZE}, got {}",
                self.batch_size
            ));
        }
        let valid_statuses = ["ENABLED", "DISABLED"];
        if !valid_statuses.contains(&self.default_status.as_str()) {
            return Err(format!(
                "Invalid transfer.default_status '{}'. Must be one of: {}",
                self.default_status,
                valid_statuses.join(", ")
            ));
        }
        if self.output_dir.is_empty() {
            return Err("transfer.output_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily, hourly, never)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_base_url() -> String {
    "https://adsmanager-graph.facebook.com".to_string()
}

fn default_api_version() -> String {
    "v23.0".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_locale() -> String {
    "en_US".to_string()
}

fn default_true() -> bool {
    true
}

fn default_batch_size() -> usize {
    40
}

fn default_batch_delay_ms() -> u64 {
    600
}

fn default_account_delay_ms() -> u64 {
    1000
}

fn default_delete_delay_ms() -> u64 {
    300
}

fn default_status() -> String {
    "ENABLED".to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn graph_config() -> GraphConfig {
        GraphConfig::new(secret_string("token".to_string()))
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_graph_config_validation() {
        let mut config = graph_config();
        assert!(config.validate().is_ok());

        config.base_url = "adsmanager-graph.facebook.com".to_string();
        assert!(config.validate().is_err());

        config.base_url = default_base_url();
        config.api_version = "23".to_string();
        assert!(config.validate().is_err());

        config.api_version = "v23.0".to_string();
        config.access_token = secret_string(" ".to_string());
        let result = config.validate();
        assert!(result.unwrap_err().contains("access_token"));
    }

    #[test]
    fn test_api_root() {
        let mut config = graph_config();
        assert_eq!(config.api_root(), "https://adsmanager-graph.facebook.com/v23.0/");

        config.base_url = "http://127.0.0.1:1234/".to_string();
        config.api_version = "v19.0".to_string();
        assert_eq!(config.api_root(), "http://127.0.0.1:1234/v19.0/");
    }

    #[test]
    fn test_api_version_format() {
        assert!(is_api_version("v23.0"));
        assert!(is_api_version("v9.12"));
        assert!(!is_api_version("v23"));
        assert!(!is_api_version("23.0"));
        assert!(!is_api_version("v23.0.1"));
        assert!(!is_api_version("va.b"));
    }

    #[test]
    fn test_transfer_config_validation() {
        let mut config = TransferConfig::default();
        assert!(config.validate().is_ok());

        config.batch_size = 0;
        assert!(config.validate().is_err());

        config.batch_size = MAX_BATCH_SIZE + 1;
        assert!(config.validate().is_err());

        config.batch_size = MAX_BATCH_SIZE;
        config.default_status = "PAUSED".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_values() {
        let transfer = TransferConfig::default();
        assert_eq!(transfer.batch_size, 40);
        assert_eq!(transfer.batch_delay_ms, 600);
        assert_eq!(transfer.account_delay_ms, 1000);
        assert_eq!(transfer.delete_delay_ms, 300);
        assert!(transfer.use_batch_requests);

        let graph = graph_config();
        assert_eq!(graph.api_version, "v23.0");
        assert_eq!(graph.locale, "en_US");
        assert_eq!(graph.timeout(), Duration::from_secs(60));
    }
}
