//! Export bundle file format
//!
//! The bundle is the only durable artifact the tool produces: UTF-8 JSON with a
//! `rules` array (values normalized to USD) and a `metadata` object. It is the
//! wire contract for import, so readers are lenient about individual rules and
//! strict about the envelope.

use super::errors::RuleBridgeError;
use super::ids::AccountId;
use super::result::Result;
use super::rule::Rule;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Message shown when an import file doesn't carry a `rules` array
pub const INVALID_BUNDLE_MESSAGE: &str =
    "Invalid file format. Expected a JSON file with 'rules' array.";

/// Provenance of an export bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleMetadata {
    /// ISO-8601 timestamp of the export
    pub export_date: String,
    pub source_account_id: String,
    pub source_currency: String,
    pub conversion_rate: f64,
}

impl BundleMetadata {
    pub fn new(
        exported_at: DateTime<Utc>,
        source_account_id: &AccountId,
        source_currency: impl Into<String>,
        conversion_rate: f64,
    ) -> Self {
        Self {
            export_date: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            source_account_id: source_account_id.to_string(),
            source_currency: source_currency.into(),
            conversion_rate,
        }
    }
}

/// Bundle written by an export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub rules: Vec<Rule>,
    pub metadata: BundleMetadata,
}

impl ExportBundle {
    /// Writes the bundle as pretty JSON into `dir`, named after the source
    /// account and the export date. Returns the written path.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>, date: NaiveDate) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let path = dir.join(bundle_file_name(&self.metadata.source_account_id, date));
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&path, contents)?;

        tracing::debug!(path = %path.display(), rules = self.rules.len(), "Wrote export bundle");
        Ok(path)
    }
}

/// Bundle as read for import: the envelope is checked, rules are left raw so
/// each can be validated (and skipped) individually.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportBundle {
    pub rules: Vec<Value>,
    pub metadata: Option<BundleMetadata>,
}

impl ImportBundle {
    /// Validates a parsed JSON document as an import bundle
    ///
    /// # Errors
    ///
    /// Returns [`RuleBridgeError::Validation`] when `rules` is absent or not an array.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut root) = value else {
            return Err(RuleBridgeError::Validation(INVALID_BUNDLE_MESSAGE.to_string()));
        };

        let rules = match root.remove("rules") {
            Some(Value::Array(rules)) => rules,
            _ => return Err(RuleBridgeError::Validation(INVALID_BUNDLE_MESSAGE.to_string())),
        };

        // Metadata is informational only; a malformed block doesn't block import
        let metadata = root
            .remove("metadata")
            .and_then(|m| serde_json::from_value(m).ok());

        Ok(Self { rules, metadata })
    }
}

/// Reads and validates an import bundle from disk
pub fn load_bundle(path: impl AsRef<Path>) -> Result<ImportBundle> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RuleBridgeError::Io(format!(
            "Bundle file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&contents).map_err(|e| {
        RuleBridgeError::Validation(format!("{} is not valid JSON: {e}", path.display()))
    })?;

    ImportBundle::from_value(value)
}

/// `autorules_<account>_<YYYY-MM-DD>.json`
pub fn bundle_file_name(account_id: &str, date: NaiveDate) -> String {
    format!("autorules_{}_{}.json", account_id, date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rule::{EvaluationSpec, Filter};
    use chrono::TimeZone;
    use serde_json::json;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn sample_rule() -> Rule {
        Rule {
            id: None,
            name: "cpm guard".to_string(),
            evaluation_spec: EvaluationSpec::with_filters(vec![Filter::new("cpm", "54")]),
            execution_spec: json!({"execution_type": "PAUSE"}),
            schedule_spec: json!({"schedule_type": "DAILY"}),
            status: "ENABLED".to_string(),
        }
    }

    #[test]
    fn test_bundle_file_name() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(bundle_file_name("12345", date), "autorules_12345_2025-03-09.json");
    }

    #[test]
    fn test_metadata_serializes_camel_case() {
        let at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let metadata = BundleMetadata::new(at, &AccountId::new("act_9").unwrap(), "EUR", 0.92);
        let encoded = serde_json::to_value(&metadata).unwrap();

        assert_eq!(encoded["exportDate"], json!("2025-01-02T03:04:05.000Z"));
        assert_eq!(encoded["sourceAccountId"], json!("9"));
        assert_eq!(encoded["sourceCurrency"], json!("EUR"));
        assert_eq!(encoded["conversionRate"], json!(0.92));
    }

    #[test]
    fn test_import_bundle_requires_rules_array() {
        for invalid in [json!({}), json!({"rules": {}}), json!([1, 2]), json!({"rules": "x"})] {
            let err = ImportBundle::from_value(invalid).unwrap_err();
            assert_eq!(err.to_string(), format!("Validation error: {INVALID_BUNDLE_MESSAGE}"));
        }

        let ok = ImportBundle::from_value(json!({"rules": [{"name": "a"}]})).unwrap();
        assert_eq!(ok.rules.len(), 1);
        assert!(ok.metadata.is_none());
    }

    #[test]
    fn test_write_then_load_bundle() {
        let dir = TempDir::new().unwrap();
        let at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let bundle = ExportBundle {
            rules: vec![sample_rule()],
            metadata: BundleMetadata::new(at, &AccountId::new("42").unwrap(), "EUR", 0.92),
        };

        let path = bundle.write_to_dir(dir.path(), at.date_naive()).unwrap();
        assert!(path.ends_with("autorules_42_2025-06-01.json"));

        let loaded = load_bundle(&path).unwrap();
        assert_eq!(loaded.rules.len(), 1);
        assert_eq!(loaded.rules[0]["name"], json!("cpm guard"));
        assert_eq!(loaded.metadata, Some(bundle.metadata));
    }

    #[test]
    fn test_load_bundle_rejects_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();
        file.flush().unwrap();

        let err = load_bundle(file.path()).unwrap_err();
        assert!(matches!(err, RuleBridgeError::Validation(_)));
    }

    #[test]
    fn test_load_bundle_missing_file() {
        let err = load_bundle("does-not-exist.json").unwrap_err();
        assert!(matches!(err, RuleBridgeError::Io(_)));
    }
}
