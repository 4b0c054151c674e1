//! Export preparation: listed rules to a USD-normalized bundle

use super::progress::ProgressLog;
use crate::currency::to_usd;
use crate::domain::{
    AccountId, BundleMetadata, CurrencyContext, ExportBundle, RawRule, Result, Rule,
};
use chrono::{DateTime, Utc};

/// Rules ready for a bundle, plus how many were left out
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedExport {
    pub rules: Vec<Rule>,
    pub skipped: usize,
}

/// Validates and converts listed rules to USD
///
/// A rule that fails to parse or convert is logged and excluded; the rest are
/// still exported.
pub fn prepare_export(
    raw_rules: Vec<RawRule>,
    currency: &CurrencyContext,
    log: &mut ProgressLog<'_>,
) -> PreparedExport {
    let mut rules = Vec::with_capacity(raw_rules.len());
    let mut skipped = 0;

    for raw in raw_rules {
        let label = raw.display_name();
        match export_rule(raw, currency) {
            Ok(rule) => rules.push(rule),
            Err(e) => {
                skipped += 1;
                log.warn(format!("Skipping rule {label}: {e}"));
            }
        }
    }

    PreparedExport { rules, skipped }
}

fn export_rule(raw: RawRule, currency: &CurrencyContext) -> Result<Rule> {
    let rule = Rule::try_from_raw(raw)?;
    to_usd(&rule, currency.conversion_rate, &currency.currency)
}

/// Wraps converted rules with their provenance
pub fn build_bundle(
    rules: Vec<Rule>,
    account_id: &AccountId,
    currency: &CurrencyContext,
    exported_at: DateTime<Utc>,
) -> ExportBundle {
    ExportBundle {
        rules,
        metadata: BundleMetadata::new(
            exported_at,
            account_id,
            currency.currency.clone(),
            currency.conversion_rate,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transfer::progress::TracingSink;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawRule {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_prepare_export_converts_and_skips() {
        let sink = TracingSink;
        let mut log = ProgressLog::new(&sink);
        let currency = CurrencyContext {
            currency: "EUR".to_string(),
            conversion_rate: 0.92,
        };

        let prepared = prepare_export(
            vec![
                raw(json!({
                    "id": "1",
                    "name": "cpm guard",
                    "evaluation_spec": r#"{"filters":[{"field":"cpm","value":"50","operator":"GREATER_THAN"}]}"#,
                    "execution_spec": r#"{"execution_type":"PAUSE"}"#,
                    "schedule_spec": r#"{"schedule_type":"DAILY"}"#,
                    "status": "ENABLED"
                })),
                raw(json!({"id": "2", "name": "broken", "evaluation_spec": "{oops"})),
            ],
            &currency,
            &mut log,
        );

        assert_eq!(prepared.rules.len(), 1);
        assert_eq!(prepared.skipped, 1);
        assert_eq!(prepared.rules[0].filters()[0].value, json!("54"));
        assert_eq!(prepared.rules[0].id.as_ref().map(|id| id.as_str()), Some("1"));
        assert!(log.lines()[0].contains("broken"));
    }

    #[test]
    fn test_build_bundle_metadata() {
        let account_id = AccountId::new("act_5").unwrap();
        let bundle = build_bundle(
            Vec::new(),
            &account_id,
            &CurrencyContext::default(),
            Utc::now(),
        );
        assert_eq!(bundle.metadata.source_account_id, "5");
        assert_eq!(bundle.metadata.source_currency, "USD");
        assert_eq!(bundle.metadata.conversion_rate, 1.0);
    }
}
