//! DynamoDB-style session store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use dynamostore_core::config::store::{DEFAULT_TABLE_NAME, StoreConfig};
use dynamostore_core::result::StoreResult;
use dynamostore_core::traits::{Clock, KvBackend, SessionStore, SystemClock};
use dynamostore_core::types::SessionRecord;

use crate::codec;
use crate::provisioner::TableProvisioner;

/// Session store over a single key-value table.
///
/// Expiry is enforced on read: a record whose expiry has passed is reported
/// as absent even if the backend has not swept it yet. Writes are
/// unconditional and concurrent commits to one token race; the backend's
/// last write wins.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    backend: Arc<dyn KvBackend>,
    clock: Arc<dyn Clock>,
    table_name: String,
}

impl DynamoStore {
    /// Create a store on the default table, [`DEFAULT_TABLE_NAME`].
    pub fn new(backend: Arc<dyn KvBackend>) -> Self {
        Self::with_table_name(backend, DEFAULT_TABLE_NAME)
    }

    /// Create a store on a specific table.
    pub fn with_table_name(backend: Arc<dyn KvBackend>, table_name: impl Into<String>) -> Self {
        Self {
            backend,
            clock: Arc::new(SystemClock),
            table_name: table_name.into(),
        }
    }

    /// Create a store from configuration.
    pub fn from_config(backend: Arc<dyn KvBackend>, config: &StoreConfig) -> Self {
        Self::with_table_name(backend, config.table_name.clone())
    }

    /// Replace the clock used for expiry checks and provisioning waits.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The backing table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// A provisioner for this store's table, sharing its backend and clock.
    pub fn provisioner(&self) -> TableProvisioner {
        TableProvisioner::new(
            Arc::clone(&self.backend),
            Arc::clone(&self.clock),
            self.table_name.clone(),
        )
    }

    /// Create the backing table if it doesn't already exist.
    ///
    /// Shorthand for `self.provisioner().ensure_table()`.
    pub async fn ensure_table(&self) -> StoreResult<()> {
        self.provisioner().ensure_table().await
    }
}

#[async_trait]
impl SessionStore for DynamoStore {
    async fn find(&self, token: &str) -> StoreResult<Option<Vec<u8>>> {
        let item = self
            .backend
            .get_item(&self.table_name, codec::key(token), true)
            .await?;

        let Some(record) = codec::decode(item)? else {
            debug!(table = %self.table_name, "Session not found");
            return Ok(None);
        };

        if record.is_expired_at(self.clock.now()) {
            debug!(table = %self.table_name, expiry = %record.expiry, "Session expired");
            return Ok(None);
        }

        Ok(Some(record.payload))
    }

    async fn commit(&self, token: &str, payload: &[u8], expiry: DateTime<Utc>) -> StoreResult<()> {
        let record = SessionRecord::new(token, payload, expiry);
        self.backend
            .put_item(&self.table_name, codec::encode(&record))
            .await?;

        debug!(table = %self.table_name, %expiry, bytes = payload.len(), "Session committed");
        Ok(())
    }

    async fn delete(&self, token: &str) -> StoreResult<()> {
        if token.is_empty() {
            return Ok(());
        }

        self.backend
            .delete_item(&self.table_name, codec::key(token))
            .await?;

        debug!(table = %self.table_name, "Session deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamostore_backend::memory::MemoryBackend;
    use dynamostore_backend::memory::store::ops;
    use dynamostore_core::error::ErrorKind;
    use dynamostore_core::traits::ManualClock;
    use dynamostore_core::types::{AttributeValue, TableStatus};
    use std::time::Duration;

    struct Fixture {
        backend: MemoryBackend,
        clock: Arc<ManualClock>,
        store: DynamoStore,
    }

    async fn fixture() -> Fixture {
        let backend = MemoryBackend::new();
        let clock = Arc::new(ManualClock::new(
            DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        ));
        let store = DynamoStore::new(Arc::new(backend.clone())).with_clock(clock.clone());
        store.ensure_table().await.unwrap();
        Fixture {
            backend,
            clock,
            store,
        }
    }

    fn seconds_from_now(clock: &ManualClock, seconds: i64) -> DateTime<Utc> {
        clock.now() + chrono::Duration::seconds(seconds)
    }

    #[tokio::test]
    async fn test_find_never_committed() {
        let f = fixture().await;
        assert_eq!(f.store.find("never-committed").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_commit_then_find() {
        let f = fixture().await;
        let expiry = seconds_from_now(&f.clock, 60);

        f.store.commit("abc", &[1, 2, 3], expiry).await.unwrap();

        assert_eq!(f.store.find("abc").await.unwrap(), Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_session_expires_without_delete() {
        let f = fixture().await;
        let expiry = seconds_from_now(&f.clock, 2);

        f.store.commit("abc", &[1, 2, 3], expiry).await.unwrap();
        assert_eq!(f.store.find("abc").await.unwrap(), Some(vec![1, 2, 3]));

        f.clock.advance(Duration::from_secs(3));

        assert_eq!(f.store.find("abc").await.unwrap(), None);
        // Still physically present; only the read path hides it.
        assert_eq!(f.backend.item_count(DEFAULT_TABLE_NAME), 1);
    }

    #[tokio::test]
    async fn test_expiry_exactly_now_is_absent() {
        let f = fixture().await;
        f.store.commit("abc", b"x", f.clock.now()).await.unwrap();
        assert_eq!(f.store.find("abc").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_subsecond_expiry_truncated_to_second() {
        let f = fixture().await;
        let expiry = f.clock.now() + chrono::Duration::milliseconds(900);

        f.store.commit("abc", b"x", expiry).await.unwrap();

        // Stored expiry is the start of the current second, so it is already dead.
        assert_eq!(f.store.find("abc").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_commit_replaces_payload_and_expiry() {
        let f = fixture().await;

        f.store
            .commit("abc", b"first", seconds_from_now(&f.clock, 60))
            .await
            .unwrap();
        f.store
            .commit("abc", b"second", seconds_from_now(&f.clock, 5))
            .await
            .unwrap();

        assert_eq!(f.store.find("abc").await.unwrap(), Some(b"second".to_vec()));

        // The shorter expiry of the second commit wins.
        f.clock.advance(Duration::from_secs(10));
        assert_eq!(f.store.find("abc").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_token() {
        let f = fixture().await;
        f.store.delete("missing-token").await.unwrap();
        assert_eq!(f.store.find("missing-token").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_removes_session() {
        let f = fixture().await;
        f.store
            .commit("abc", b"x", seconds_from_now(&f.clock, 60))
            .await
            .unwrap();

        f.store.delete("abc").await.unwrap();

        assert_eq!(f.store.find("abc").await.unwrap(), None);
        assert_eq!(f.backend.item_count(DEFAULT_TABLE_NAME), 0);
    }

    #[tokio::test]
    async fn test_delete_empty_token_skips_backend() {
        let f = fixture().await;
        let calls_before = f.backend.total_calls();

        f.store.delete("").await.unwrap();

        assert_eq!(f.backend.total_calls(), calls_before);
        assert_eq!(f.backend.call_count(ops::DELETE_ITEM), 0);
    }

    #[tokio::test]
    async fn test_commit_empty_token_is_forwarded() {
        let f = fixture().await;

        let err = f
            .store
            .commit("", b"x", seconds_from_now(&f.clock, 60))
            .await
            .unwrap_err();

        assert_eq!(err.kind, ErrorKind::Backend);
        assert_eq!(f.backend.call_count(ops::PUT_ITEM), 1);
    }

    #[tokio::test]
    async fn test_undecodable_item_is_an_error() {
        let f = fixture().await;
        let mut item = codec::key("abc");
        item.insert("data".to_string(), AttributeValue::S("not bytes".to_string()));
        item.insert("ttl".to_string(), AttributeValue::N("1800000000".to_string()));
        f.backend.put_item(DEFAULT_TABLE_NAME, item).await.unwrap();

        let err = f.store.find("abc").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let backend = MemoryBackend::new();
        let store = DynamoStore::with_table_name(Arc::new(backend), "missing.table");

        let err = store.find("abc").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Backend);

        let err = store
            .commit("abc", b"x", Utc::now() + chrono::Duration::seconds(60))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Backend);
    }

    #[tokio::test]
    async fn test_custom_table_name() {
        let backend = MemoryBackend::new();
        backend.insert_table("sessions.custom", "token", TableStatus::Active);
        let config = StoreConfig {
            table_name: "sessions.custom".to_string(),
        };
        let store = DynamoStore::from_config(Arc::new(backend.clone()), &config);

        store
            .commit("abc", b"x", Utc::now() + chrono::Duration::seconds(60))
            .await
            .unwrap();

        assert_eq!(store.table_name(), "sessions.custom");
        assert_eq!(backend.item_count("sessions.custom"), 1);
        assert_eq!(backend.item_count(DEFAULT_TABLE_NAME), 0);
    }

    #[tokio::test]
    async fn test_concurrent_commits_last_write_wins() {
        let f = fixture().await;
        let store = Arc::new(f.store.clone());
        let expiry = seconds_from_now(&f.clock, 60);

        let handles: Vec<_> = (0u8..8)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.commit("shared", &[i], expiry).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let payload = f.store.find("shared").await.unwrap().unwrap();
        assert_eq!(payload.len(), 1);
        assert!(payload[0] < 8);
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let f = fixture().await;
        let store: Arc<dyn SessionStore> = Arc::new(f.store);

        store
            .commit("abc", b"x", seconds_from_now(&f.clock, 60))
            .await
            .unwrap();
        assert_eq!(store.find("abc").await.unwrap(), Some(b"x".to_vec()));
    }
}
