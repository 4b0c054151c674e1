//! Pacing between rate-limited requests
//!
//! Transfers pause between chunks and between accounts to stay under the
//! platform's rate limits. The pause lengths come from [`PacingPolicy`]; the
//! actual waiting is delegated to a [`Sleeper`] so tests can record delays
//! instead of waiting for them.

use crate::config::TransferConfig;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Something that can wait
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Waits on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Fixed pauses between units of work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    /// Between create batches of one account
    pub batch_delay: Duration,
    /// Between accounts of a multi-account operation
    pub account_delay: Duration,
    /// Between delete batches of one account
    pub delete_delay: Duration,
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self::from(&TransferConfig::default())
    }
}

impl From<&TransferConfig> for PacingPolicy {
    fn from(config: &TransferConfig) -> Self {
        Self {
            batch_delay: Duration::from_millis(config.batch_delay_ms),
            account_delay: Duration::from_millis(config.account_delay_ms),
            delete_delay: Duration::from_millis(config.delete_delay_ms),
        }
    }
}

/// Fixed-interval gate between sequential units of work
///
/// Callers invoke the `between_*` methods only when another unit follows, so
/// no pause happens after the last chunk or account.
#[derive(Clone)]
pub struct Pacer {
    policy: PacingPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl Pacer {
    pub fn new(policy: PacingPolicy, sleeper: Arc<dyn Sleeper>) -> Self {
        Self { policy, sleeper }
    }

    /// Pacer waiting on the tokio timer
    pub fn tokio(policy: PacingPolicy) -> Self {
        Self::new(policy, Arc::new(TokioSleeper))
    }

    pub fn policy(&self) -> &PacingPolicy {
        &self.policy
    }

    pub async fn between_chunks(&self) {
        self.wait(self.policy.batch_delay).await;
    }

    pub async fn between_accounts(&self) {
        self.wait(self.policy.account_delay).await;
    }

    pub async fn between_deletes(&self) {
        self.wait(self.policy.delete_delay).await;
    }

    async fn wait(&self, duration: Duration) {
        if duration.is_zero() {
            return;
        }
        tracing::trace!(delay_ms = duration.as_millis() as u64, "Pacing");
        self.sleeper.sleep(duration).await;
    }
}

impl std::fmt::Debug for Pacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pacer").field("policy", &self.policy).finish()
    }
}
