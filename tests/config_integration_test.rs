//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` to avoid
//! interference between tests.

use rulebridge::config::load_config;
use rulebridge::config::SecretValue;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    std::env::remove_var("RULEBRIDGE_APPLICATION_LOG_LEVEL");
    std::env::remove_var("RULEBRIDGE_APPLICATION_DRY_RUN");
    std::env::remove_var("RULEBRIDGE_GRAPH_API_VERSION");
    std::env::remove_var("RULEBRIDGE_TRANSFER_BATCH_SIZE");
    std::env::remove_var("RULEBRIDGE_TRANSFER_BATCH_DELAY_MS");
    std::env::remove_var("TEST_RULEBRIDGE_TOKEN");
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn token(value: &rulebridge::config::SecretString) -> String {
    let secret: &SecretValue = value.expose_secret();
    secret.as_ref().to_string()
}

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
log_level = "debug"
dry_run = true

[graph]
base_url = "https://graph.example.com"
api_version = "v22.0"
access_token = "EAAB-complete"
timeout_seconds = 30
locale = "de_DE"

[transfer]
batch_size = 25
batch_delay_ms = 100
account_delay_ms = 200
delete_delay_ms = 50
use_batch_requests = false
default_status = "DISABLED"
output_dir = "./exports"

[logging]
local_enabled = true
local_path = "./logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert!(config.application.dry_run);
    assert_eq!(config.graph.api_root(), "https://graph.example.com/v22.0/");
    assert_eq!(token(&config.graph.access_token), "EAAB-complete");
    assert_eq!(config.graph.locale, "de_DE");
    assert_eq!(config.transfer.batch_size, 25);
    assert!(!config.transfer.use_batch_requests);
    assert_eq!(config.transfer.default_status, "DISABLED");
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_minimal_config_uses_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let file = write_config(
        r#"
[graph]
access_token = "EAAB-minimal"
"#,
    );

    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert!(!config.application.dry_run);
    assert_eq!(
        config.graph.api_root(),
        "https://adsmanager-graph.facebook.com/v23.0/"
    );
    assert_eq!(config.graph.timeout_seconds, 60);
    assert_eq!(config.transfer.batch_size, 40);
    assert_eq!(config.transfer.batch_delay_ms, 600);
    assert_eq!(config.transfer.account_delay_ms, 1000);
    assert_eq!(config.transfer.delete_delay_ms, 300);
    assert!(config.transfer.use_batch_requests);
    assert_eq!(config.transfer.default_status, "ENABLED");
    assert!(!config.logging.local_enabled);
}

#[test]
fn test_token_substitution_and_env_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_RULEBRIDGE_TOKEN", "EAAB-from-env");
    std::env::set_var("RULEBRIDGE_TRANSFER_BATCH_SIZE", "10");
    std::env::set_var("RULEBRIDGE_GRAPH_API_VERSION", "v24.0");
    std::env::set_var("RULEBRIDGE_APPLICATION_DRY_RUN", "true");

    let file = write_config(
        r#"
[graph]
access_token = "${TEST_RULEBRIDGE_TOKEN}"

[transfer]
batch_size = 40
"#,
    );

    let result = load_config(file.path());
    cleanup_env_vars();
    let config = result.unwrap();

    assert_eq!(token(&config.graph.access_token), "EAAB-from-env");
    assert_eq!(config.transfer.batch_size, 10);
    assert_eq!(config.graph.api_version, "v24.0");
    assert!(config.application.dry_run);
}

#[test]
fn test_missing_env_vars_are_all_reported() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::remove_var("TEST_RULEBRIDGE_MISSING_A");
    std::env::remove_var("TEST_RULEBRIDGE_MISSING_B");

    let file = write_config(
        r#"
[graph]
access_token = "${TEST_RULEBRIDGE_MISSING_A}"
locale = "${TEST_RULEBRIDGE_MISSING_B}"
"#,
    );

    let message = load_config(file.path()).unwrap_err().to_string();
    assert!(message.contains("TEST_RULEBRIDGE_MISSING_A"));
    assert!(message.contains("TEST_RULEBRIDGE_MISSING_B"));
}

#[test]
fn test_invalid_values_are_rejected() {
    let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let cases = [
        ("[graph]\naccess_token = \"\"\n", "token"),
        (
            "[graph]\naccess_token = \"t\"\n[transfer]\nbatch_size = 0\n",
            "batch_size",
        ),
        (
            "[graph]\naccess_token = \"t\"\napi_version = \"23\"\n",
            "api_version",
        ),
        (
            "[graph]\naccess_token = \"t\"\n[application]\nlog_level = \"loud\"\n",
            "log_level",
        ),
    ];

    for (contents, expected) in cases {
        let file = write_config(contents);
        let message = load_config(file.path()).unwrap_err().to_string();
        assert!(
            message.contains(expected),
            "expected '{expected}' in: {message}"
        );
    }
}
