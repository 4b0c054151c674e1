//! Bulk deletion of an account's rules
//!
//! Deletes run in chunks of the batch size with a pause in between. A chunk
//! that fails is logged and the remaining chunks still run. A rule with no
//! response slot counts as not deleted.

use super::progress::ProgressLog;
use super::summary::DeleteOutcome;
use crate::adapters::graph::models::{slot_error_message, slot_succeeded};
use crate::adapters::graph::RuleStore;
use crate::core::pacing::Pacer;
use crate::domain::{AccountId, RawRule, Result, RuleId};
use crate::log_chunk_progress;

/// Lists an account's rules and deletes all of them
///
/// # Errors
///
/// Only a failure listing the rules. Failed chunks and rejected rules are
/// logged and counted in the outcome.
pub async fn clear_rules(
    store: &dyn RuleStore,
    pacer: &Pacer,
    log: &mut ProgressLog<'_>,
    account_id: &AccountId,
    batch_size: usize,
) -> Result<DeleteOutcome> {
    let rules = store.list_rules(account_id).await?;
    let ids = rule_ids(&rules);

    if ids.is_empty() {
        tracing::debug!(account_id = %account_id, "No rules to delete");
        return Ok(DeleteOutcome::default());
    }

    log.info(format!("Deleting {} rules in batches...", ids.len()));
    Ok(delete_in_chunks(store, pacer, log, &ids, batch_size).await)
}

/// Deletes `ids` chunk by chunk; never fails as a whole
pub async fn delete_in_chunks(
    store: &dyn RuleStore,
    pacer: &Pacer,
    log: &mut ProgressLog<'_>,
    ids: &[RuleId],
    batch_size: usize,
) -> DeleteOutcome {
    let mut outcome = DeleteOutcome {
        found: ids.len(),
        ..DeleteOutcome::default()
    };

    let chunks: Vec<&[RuleId]> = ids.chunks(batch_size.max(1)).collect();
    let total = chunks.len();

    for (idx, chunk) in chunks.iter().enumerate() {
        let number = idx + 1;
        log_chunk_progress!(number, total, chunk.len());
        log.info(format!(
            "Deleting batch {number}/{total} ({} rules)...",
            chunk.len()
        ));

        match store.delete_rules_batch(chunk).await {
            Ok(slots) => {
                for (slot_idx, id) in chunk.iter().enumerate() {
                    let slot = slots.get(slot_idx).cloned().flatten();
                    if slot_succeeded(&slot) {
                        outcome.deleted += 1;
                    } else {
                        outcome.failed += 1;
                        log.warn(format!(
                            "Failed to delete rule {id}: {}",
                            slot_error_message(&slot)
                        ));
                    }
                }
            }
            Err(e) => {
                outcome.failed_chunks += 1;
                outcome.failed += chunk.len();
                log.error(format!("Error deleting batch {number}: {e}"));
            }
        }

        if number < total {
            pacer.between_deletes().await;
        }
    }

    outcome
}

/// Ids of listed rules; rules without a usable id are skipped
fn rule_ids(rules: &[RawRule]) -> Vec<RuleId> {
    rules
        .iter()
        .filter_map(|rule| {
            let id = match rule.id.as_ref()? {
                serde_json::Value::String(s) => RuleId::new(s.as_str()).ok(),
                serde_json::Value::Number(n) => RuleId::new(n.to_string()).ok(),
                _ => None,
            };
            if id.is_none() {
                tracing::warn!(rule = %rule.display_name(), "Rule has no usable id");
            }
            id
        })
        .collect()
}
