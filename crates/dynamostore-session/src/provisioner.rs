//! Idempotent provisioning of the session table.
//!
//! [`TableProvisioner::ensure_table`] is safe to call on every startup:
//!
//! 1. Describe the table. Missing: create it. `CREATING`: wait for it.
//!    `DELETING`: fail. `ACTIVE`/`UPDATING`: done. Anything else: fail.
//! 2. After a fresh create, poll until the table is usable, then enable TTL
//!    on the `ttl` attribute.
//!
//! A table found already existing is assumed to be fully configured; its TTL
//! settings are not re-checked.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use dynamostore_core::error::StoreError;
use dynamostore_core::result::StoreResult;
use dynamostore_core::traits::{Clock, KvBackend};
use dynamostore_core::types::{TableSpec, TableStatus};

use crate::codec::{TOKEN_ATTRIBUTE, TTL_ATTRIBUTE};

/// Bounded polling policy for waiting on table creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Sleep before each describe.
    pub interval: Duration,
    /// Maximum number of describes.
    pub max_attempts: u32,
}

impl Default for WaitPolicy {
    /// One describe per second for up to 60 seconds.
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            max_attempts: 60,
        }
    }
}

/// Outcome of waiting for a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WaitOutcome {
    /// The table reached `ACTIVE` or `UPDATING`.
    Ready,
    /// The table disappeared while waiting.
    Vanished,
}

/// Ensures the session table exists, is active, and expires items.
#[derive(Debug, Clone)]
pub struct TableProvisioner {
    backend: Arc<dyn KvBackend>,
    clock: Arc<dyn Clock>,
    table_name: String,
    policy: WaitPolicy,
}

impl TableProvisioner {
    /// Create a provisioner for `table_name` with the default wait policy.
    pub fn new(
        backend: Arc<dyn KvBackend>,
        clock: Arc<dyn Clock>,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            clock,
            table_name: table_name.into(),
            policy: WaitPolicy::default(),
        }
    }

    /// Replace the wait policy.
    pub fn with_policy(mut self, policy: WaitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The table this provisioner manages.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Create the table if it doesn't already exist.
    ///
    /// May block for up to `interval * max_attempts` while a new table
    /// becomes active.
    pub async fn ensure_table(&self) -> StoreResult<()> {
        let table = self.table_name.as_str();

        match self.backend.describe_table(table).await? {
            None => {
                info!(table, "Session table not found, creating");
            }
            Some(desc) => {
                return match desc.status {
                    TableStatus::Creating => {
                        info!(table, "Session table is being created, waiting");
                        self.wait_for_table().await.map(|_| ())
                    }
                    TableStatus::Deleting => Err(StoreError::delete_in_progress(table)),
                    TableStatus::Active | TableStatus::Updating => {
                        debug!(table, status = %desc.status, "Session table already exists");
                        Ok(())
                    }
                    TableStatus::Unrecognized(ref status) => {
                        Err(StoreError::unrecognized_status(table, status))
                    }
                };
            }
        }

        self.backend
            .create_table(&TableSpec::new(table, TOKEN_ATTRIBUTE))
            .await?;

        if self.wait_for_table().await? == WaitOutcome::Vanished {
            warn!(table, "Session table disappeared while waiting for it to become active");
        }

        self.backend
            .update_time_to_live(table, TTL_ATTRIBUTE, true)
            .await?;

        info!(table, ttl_attribute = TTL_ATTRIBUTE, "Session table created");
        Ok(())
    }

    /// Poll until the table is usable, bounded by the wait policy.
    ///
    /// A table that vanishes mid-poll is tolerated rather than reported, and
    /// unrecognized statuses keep the loop polling.
    async fn wait_for_table(&self) -> StoreResult<WaitOutcome> {
        let table = self.table_name.as_str();

        for attempt in 1..=self.policy.max_attempts {
            self.clock.sleep(self.policy.interval).await;

            let Some(desc) = self.backend.describe_table(table).await? else {
                return Ok(WaitOutcome::Vanished);
            };

            match desc.status {
                TableStatus::Active | TableStatus::Updating => {
                    debug!(table, attempt, status = %desc.status, "Session table is ready");
                    return Ok(WaitOutcome::Ready);
                }
                TableStatus::Deleting => return Err(StoreError::delete_in_progress(table)),
                TableStatus::Creating => {
                    debug!(table, attempt, "Session table still creating");
                }
                TableStatus::Unrecognized(ref status) => {
                    warn!(table, attempt, status = %status, "Unrecognized table status while waiting");
                }
            }
        }

        Err(StoreError::create_timed_out(table, self.policy.max_attempts))
    }
}
