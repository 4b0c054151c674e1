//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::RuleBridgeConfig;
use super::secret::secret_string;
use crate::domain::errors::RuleBridgeError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into RuleBridgeConfig
/// 4. Applies environment variable overrides (RULEBRIDGE_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use rulebridge::config::loader::load_config;
///
/// let config = load_config("rulebridge.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<RuleBridgeConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RuleBridgeError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        RuleBridgeError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration text, applying substitution, overrides and validation
///
/// # Errors
///
/// Same as [`load_config`], minus the file access.
pub fn parse_config(contents: &str) -> Result<RuleBridgeConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: RuleBridgeConfig = toml::from_str(&contents)
        .map_err(|e| RuleBridgeError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        RuleBridgeError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left alone so that documented placeholders don't have to
/// be set.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| RuleBridgeError::Other(format!("Invalid placeholder pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(RuleBridgeError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the RULEBRIDGE_* prefix
///
/// Environment variables follow the pattern: RULEBRIDGE_<SECTION>_<KEY>
/// For example: RULEBRIDGE_GRAPH_API_VERSION, RULEBRIDGE_TRANSFER_BATCH_SIZE.
/// Unparsable numeric or boolean values are ignored.
fn apply_env_overrides(config: &mut RuleBridgeConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("RULEBRIDGE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Ok(val) = std::env::var("RULEBRIDGE_APPLICATION_DRY_RUN") {
        config.application.dry_run = val.parse().unwrap_or(false);
    }

    // Graph overrides
    if let Ok(val) = std::env::var("RULEBRIDGE_GRAPH_BASE_URL") {
        config.graph.base_url = val;
    }
    if let Ok(val) = std::env::var("RULEBRIDGE_GRAPH_API_VERSION") {
        config.graph.api_version = val;
    }
    if let Ok(val) = std::env::var("RULEBRIDGE_GRAPH_ACCESS_TOKEN") {
        config.graph.access_token = secret_string(val);
    }
    if let Ok(val) = std::env::var("RULEBRIDGE_GRAPH_TIMEOUT_SECONDS") {
        if let Ok(timeout) = val.parse() {
            config.graph.timeout_seconds = timeout;
        }
    }
    if let Ok(val) = std::env::var("RULEBRIDGE_GRAPH_LOCALE") {
        config.graph.locale = val;
    }

    // Transfer overrides
    if let Ok(val) = std::env::var("RULEBRIDGE_TRANSFER_BATCH_SIZE") {
        if let Ok(size) = val.parse() {
            config.transfer.batch_size = size;
        }
    }
    if let Ok(val) = std::env::var("RULEBRIDGE_TRANSFER_BATCH_DELAY_MS") {
        if let Ok(delay) = val.parse() {
            config.transfer.batch_delay_ms = delay;
        }
    }
    if let Ok(val) = std::env::var("RULEBRIDGE_TRANSFER_ACCOUNT_DELAY_MS") {
        if let Ok(delay) = val.parse() {
            config.transfer.account_delay_ms = delay;
        }
    }
    if let Ok(val) = std::env::var("RULEBRIDGE_TRANSFER_DELETE_DELAY_MS") {
        if let Ok(delay) = val.parse() {
            config.transfer.delete_delay_ms = delay;
        }
    }
    if let Ok(val) = std::env::var("RULEBRIDGE_TRANSFER_USE_BATCH_REQUESTS") {
        if let Ok(flag) = val.parse() {
            config.transfer.use_batch_requests = flag;
        }
    }
    if let Ok(val) = std::env::var("RULEBRIDGE_TRANSFER_DEFAULT_STATUS") {
        config.transfer.default_status = val;
    }
    if let Ok(val) = std::env::var("RULEBRIDGE_TRANSFER_OUTPUT_DIR") {
        config.transfer.output_dir = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("RULEBRIDGE_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(true);
    }
    if let Ok(val) = std::env::var("RULEBRIDGE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("RULEBRIDGE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}
