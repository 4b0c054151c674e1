//! Import preparation: bundle rules to native-currency create requests
//!
//! Each input rule is validated, stripped of its server id, given the default
//! status when it has none, and converted from USD. Rules failing any step are
//! logged and skipped before anything is sent.

use super::progress::ProgressLog;
use crate::currency::from_usd;
use crate::domain::{CurrencyContext, RawRule, Result, Rule};
use serde_json::Value;

/// Turns bundle rules into rules ready to create in the target account
pub fn prepare_import(
    raw_rules: &[Value],
    currency: &CurrencyContext,
    default_status: &str,
    log: &mut ProgressLog<'_>,
) -> Vec<Rule> {
    let mut prepared = Vec::with_capacity(raw_rules.len());

    for (idx, value) in raw_rules.iter().enumerate() {
        match import_rule(value, currency, default_status) {
            Ok(rule) => prepared.push(rule),
            Err(e) => log.warn(format!("Skipping rule #{}: {e}", idx + 1)),
        }
    }

    prepared
}

fn import_rule(value: &Value, currency: &CurrencyContext, default_status: &str) -> Result<Rule> {
    let raw: RawRule = serde_json::from_value(value.clone())?;
    let has_status = raw.status.as_deref().is_some_and(|s| !s.trim().is_empty());

    let mut rule = Rule::try_from_raw(raw)?.without_id();
    if !has_status {
        rule.status = default_status.to_string();
    }

    from_usd(&rule, currency.conversion_rate, &currency.currency)
}

/// `Uploading rules a-b of N via batch...`
pub fn upload_message(chunk_index: usize, batch_size: usize, chunk_len: usize, total: usize) -> String {
    let first = chunk_index * batch_size + 1;
    let last = chunk_index * batch_size + chunk_len;
    format!("Uploading rules {first}-{last} of {total} via batch...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transfer::progress::TracingSink;
    use serde_json::json;

    fn usd_rule(name: &str, cpc: &str) -> Value {
        json!({
            "id": "999",
            "name": name,
            "evaluation_spec": {"filters": [{"field": "cpc", "value": cpc}]},
            "execution_spec": {"execution_type": "PAUSE"},
            "schedule_spec": {"schedule_type": "DAILY"}
        })
    }

    #[test]
    fn test_prepare_import_converts_strips_id_and_defaults_status() {
        let sink = TracingSink;
        let mut log = ProgressLog::new(&sink);
        let currency = CurrencyContext {
            currency: "JPY".to_string(),
            conversion_rate: 150.0,
        };

        let rules = prepare_import(&[usd_rule("a", "666")], &currency, "DISABLED", &mut log);

        assert_eq!(rules.len(), 1);
        assert!(rules[0].id.is_none());
        assert_eq!(rules[0].status, "DISABLED");
        assert_eq!(rules[0].filters()[0].value, json!("999"));
        assert!(log.lines().is_empty());
    }

    #[test]
    fn test_prepare_import_skips_incomplete_rules() {
        let sink = TracingSink;
        let mut log = ProgressLog::new(&sink);
        let mut incomplete = usd_rule("b", "10");
        incomplete.as_object_mut().unwrap().remove("execution_spec");

        let rules = prepare_import(
            &[usd_rule("a", "10"), incomplete, json!("not an object"), usd_rule("c", "10")],
            &CurrencyContext::default(),
            "ENABLED",
            &mut log,
        );

        let names: Vec<&str> = rules.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert_eq!(log.lines().len(), 2);
        assert!(log.lines()[0].contains("#2"));
        assert!(log.lines()[0].contains("execution_spec"));
    }

    #[test]
    fn test_explicit_status_is_kept() {
        let sink = TracingSink;
        let mut log = ProgressLog::new(&sink);
        let mut value = usd_rule("a", "10");
        value["status"] = json!("DISABLED");

        let rules = prepare_import(&[value], &CurrencyContext::default(), "ENABLED", &mut log);
        assert_eq!(rules[0].status, "DISABLED");
    }

    #[test]
    fn test_upload_message() {
        assert_eq!(upload_message(0, 40, 40, 85), "Uploading rules 1-40 of 85 via batch...");
        assert_eq!(upload_message(2, 40, 5, 85), "Uploading rules 81-85 of 85 via batch...");
    }
}
