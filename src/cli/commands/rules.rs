//! Rules command implementation
//!
//! Lists one account's automated rules exactly as the server reports them,
//! in the account's own currency.

use super::session::{load_session_config, Session};
use crate::adapters::graph::{RuleRepository, RuleStore};
use crate::domain::{AccountId, RawRule};
use clap::Args;
use serde_json::Value;

/// Arguments for the rules command
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Account ID (`act_` prefix optional)
    #[arg(short, long)]
    pub account: String,

    /// Print the rules as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl RulesArgs {
    /// Execute the rules command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(account = %self.account, "Starting rules command");

        let account_id = match AccountId::new(self.account.as_str()) {
            Ok(id) => id,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let config = match load_session_config(config_path) {
            Ok(config) => config,
            Err(code) => return Ok(code),
        };
        let session = match Session::open(config) {
            Ok(session) => session,
            Err(code) => return Ok(code),
        };

        let repository =
            RuleRepository::new(session.client.clone(), session.config.graph.locale.clone());
        let rules = match repository.list_rules(&account_id).await {
            Ok(rules) => rules,
            Err(e) => {
                tracing::error!(account_id = %account_id, error = %e, "Failed to list rules");
                eprintln!("❌ Failed to list rules for {account_id}: {e}");
                return Ok(4);
            }
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rules)?);
            return Ok(0);
        }

        println!("📋 {} autorules in account {account_id}", rules.len());
        println!();
        for line in rule_lines(&rules) {
            println!("{line}");
        }
        println!();
        Ok(0)
    }
}

/// One line per rule: id, status, name and the number of filters
fn rule_lines(rules: &[RawRule]) -> Vec<String> {
    rules
        .iter()
        .map(|rule| {
            let id = match &rule.id {
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
                None => "-".to_string(),
            };
            let filters = rule
                .evaluation_spec
                .as_ref()
                .and_then(|spec| spec.get("filters"))
                .and_then(Value::as_array)
                .map_or(0, Vec::len);
            format!(
                "  {:<20} {:<9} {} ({filters} filters)",
                id,
                rule.status.as_deref().unwrap_or("-"),
                rule.display_name()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rule_lines() {
        let rules = vec![
            RawRule {
                id: Some(json!("120")),
                name: Some("Pause expensive ads".to_string()),
                evaluation_spec: Some(json!({"filters": [{"field": "cpc"}, {"field": "spent"}]})),
                status: Some("ENABLED".to_string()),
                ..Default::default()
            },
            RawRule {
                id: Some(json!(121)),
                ..Default::default()
            },
        ];

        let lines = rule_lines(&rules);
        assert!(lines[0].contains("120"));
        assert!(lines[0].contains("ENABLED"));
        assert!(lines[0].contains("Pause expensive ads (2 filters)"));
        assert!(lines[1].contains("121"));
        assert!(lines[1].contains("(0 filters)"));
    }
}
