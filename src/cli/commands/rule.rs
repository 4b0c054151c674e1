//! Single-rule commands: `delete-rule` and `execute`

use super::session::{load_session_config, Session};
use crate::core::transfer::TransferCoordinator;
use crate::domain::RuleId;
use clap::Args;

/// Arguments for the delete-rule command
#[derive(Args, Debug)]
pub struct DeleteRuleArgs {
    /// Rule ID
    #[arg(short, long)]
    pub rule_id: String,
}

/// Arguments for the execute command
#[derive(Args, Debug)]
pub struct ExecuteArgs {
    /// Rule ID
    #[arg(short, long)]
    pub rule_id: String,
}

impl DeleteRuleArgs {
    /// Execute the delete-rule command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(rule_id = %self.rule_id, "Starting delete-rule command");

        let (coordinator, rule_id) = match prepare(config_path, &self.rule_id) {
            Ok(prepared) => prepared,
            Err(code) => return Ok(code),
        };

        match coordinator.delete_rule(&rule_id).await {
            Ok(()) => Ok(0),
            Err(e) => {
                tracing::error!(rule_id = %rule_id, error = %e, "Failed to delete rule");
                eprintln!("❌ Failed to delete rule {rule_id}: {e}");
                Ok(4)
            }
        }
    }
}

impl ExecuteArgs {
    /// Execute the execute command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(rule_id = %self.rule_id, "Starting execute command");

        let (coordinator, rule_id) = match prepare(config_path, &self.rule_id) {
            Ok(prepared) => prepared,
            Err(code) => return Ok(code),
        };

        match coordinator.execute_rule(&rule_id).await {
            Ok(()) => Ok(0),
            Err(e) => {
                tracing::error!(rule_id = %rule_id, error = %e, "Failed to execute rule");
                eprintln!("❌ Failed to execute rule {rule_id}: {e}");
                Ok(4)
            }
        }
    }
}

/// Single-rule commands need neither the account list nor pacing
fn prepare(config_path: &str, raw_id: &str) -> Result<(TransferCoordinator, RuleId), i32> {
    let rule_id = RuleId::new(raw_id).map_err(|e| {
        eprintln!("❌ {e}");
        2
    })?;
    let config = load_session_config(config_path)?;
    let session = Session::open(config)?;
    Ok((session.coordinator(false), rule_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_args_creation() {
        let delete = DeleteRuleArgs {
            rule_id: "42".to_string(),
        };
        let execute = ExecuteArgs {
            rule_id: "43".to_string(),
        };
        assert_eq!(delete.rule_id, "42");
        assert_eq!(execute.rule_id, "43");
    }

    #[tokio::test]
    async fn test_blank_rule_id_is_rejected_before_config() {
        let args = DeleteRuleArgs {
            rule_id: "  ".to_string(),
        };
        assert_eq!(args.execute("does-not-exist.toml").await.unwrap(), 2);
    }
}
