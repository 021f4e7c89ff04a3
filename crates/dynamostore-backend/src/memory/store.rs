//! In-memory backend implementation using the dashmap crate.
//!
//! Behaves like a single-region DynamoDB for the operations the session
//! store uses: tables move from `CREATING` to `ACTIVE`, item operations on a
//! missing table fail, and empty string key values are rejected. There is no
//! background expiry sweep, so expired items stay readable until deleted.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;

use dynamostore_core::error::StoreError;
use dynamostore_core::result::StoreResult;
use dynamostore_core::traits::KvBackend;
use dynamostore_core::types::{AttributeValue, Item, TableDescription, TableSpec, TableStatus};

/// Backend operation names, as counted by [`MemoryBackend::call_count`].
pub mod ops {
    pub const DESCRIBE_TABLE: &str = "describe_table";
    pub const CREATE_TABLE: &str = "create_table";
    pub const UPDATE_TIME_TO_LIVE: &str = "update_time_to_live";
    pub const GET_ITEM: &str = "get_item";
    pub const PUT_ITEM: &str = "put_item";
    pub const DELETE_ITEM: &str = "delete_item";
}

#[derive(Debug, Clone)]
struct MemoryTable {
    hash_key: String,
    status: TableStatus,
    /// Describes remaining before a `CREATING` table turns `ACTIVE`.
    pending_polls: u32,
    ttl_attribute: Option<String>,
    items: HashMap<String, Item>,
}

/// In-memory key-value backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    /// Tables by name.
    tables: Arc<DashMap<String, MemoryTable>>,
    /// Per-operation call counters.
    calls: Arc<DashMap<&'static str, AtomicU64>>,
    /// Describes a new table reports `CREATING` before it turns `ACTIVE`.
    creation_polls: u32,
}

impl MemoryBackend {
    /// Create an empty backend where new tables are active on the next describe.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep new tables in `CREATING` for `polls` describe calls.
    pub fn with_creation_polls(mut self, polls: u32) -> Self {
        self.creation_polls = polls;
        self
    }

    /// Seed a table in the given status, bypassing `create_table`.
    pub fn insert_table(&self, name: &str, hash_key: &str, status: TableStatus) {
        self.tables.insert(
            name.to_string(),
            MemoryTable {
                hash_key: hash_key.to_string(),
                status,
                pending_polls: self.creation_polls,
                ttl_attribute: None,
                items: HashMap::new(),
            },
        );
    }

    /// The attribute TTL is enabled on, if any.
    pub fn ttl_attribute(&self, name: &str) -> Option<String> {
        self.tables.get(name).and_then(|t| t.ttl_attribute.clone())
    }

    /// Number of items stored in a table, including expired ones.
    pub fn item_count(&self, name: &str) -> usize {
        self.tables.get(name).map(|t| t.items.len()).unwrap_or(0)
    }

    /// Number of times an operation (see [`ops`]) has been called.
    pub fn call_count(&self, operation: &str) -> u64 {
        self.calls
            .get(operation)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total number of backend calls of any kind.
    pub fn total_calls(&self) -> u64 {
        self.calls
            .iter()
            .map(|entry| entry.value().load(Ordering::SeqCst))
            .sum()
    }

    fn record(&self, operation: &'static str) {
        self.calls
            .entry(operation)
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(1, Ordering::SeqCst);
    }

    fn missing_table(table: &str) -> StoreError {
        StoreError::backend(format!(
            "ResourceNotFoundException: Requested resource not found: Table: {table} not found"
        ))
    }

    /// Extract the string hash key value from an item or key.
    fn key_value(hash_key: &str, item: &Item) -> StoreResult<String> {
        match item.get(hash_key) {
            Some(AttributeValue::S(value)) if value.is_empty() => Err(StoreError::backend(format!(
                "ValidationException: The AttributeValue for a key attribute cannot contain an empty string value. Key: {hash_key}"
            ))),
            Some(AttributeValue::S(value)) => Ok(value.clone()),
            Some(other) => Err(StoreError::backend(format!(
                "ValidationException: Type mismatch for key {hash_key}: expected S, got {}",
                other.type_name()
            ))),
            None => Err(StoreError::backend(format!(
                "ValidationException: Missing the key {hash_key} in the item"
            ))),
        }
    }
}

#[async_trait]
impl KvBackend for MemoryBackend {
    async fn describe_table(&self, table: &str) -> StoreResult<Option<TableDescription>> {
        self.record(ops::DESCRIBE_TABLE);

        let Some(mut entry) = self.tables.get_mut(table) else {
            return Ok(None);
        };

        if entry.status == TableStatus::Creating {
            if entry.pending_polls == 0 {
                entry.status = TableStatus::Active;
            } else {
                entry.pending_polls -= 1;
            }
        }

        Ok(Some(TableDescription {
            name: table.to_string(),
            status: entry.status.clone(),
        }))
    }

    async fn create_table(&self, spec: &TableSpec) -> StoreResult<()> {
        self.record(ops::CREATE_TABLE);

        if self.tables.contains_key(&spec.name) {
            return Err(StoreError::backend(format!(
                "ResourceInUseException: Table already exists: {}",
                spec.name
            )));
        }

        self.insert_table(&spec.name, &spec.hash_key, TableStatus::Creating);
        debug!(table = %spec.name, "Created in-memory table");
        Ok(())
    }

    async fn update_time_to_live(
        &self,
        table: &str,
        attribute: &str,
        enabled: bool,
    ) -> StoreResult<()> {
        self.record(ops::UPDATE_TIME_TO_LIVE);

        let mut entry = self
            .tables
            .get_mut(table)
            .ok_or_else(|| Self::missing_table(table))?;
        entry.ttl_attribute = enabled.then(|| attribute.to_string());
        Ok(())
    }

    async fn get_item(
        &self,
        table: &str,
        key: Item,
        _consistent_read: bool,
    ) -> StoreResult<Option<Item>> {
        self.record(ops::GET_ITEM);

        let entry = self
            .tables
            .get(table)
            .ok_or_else(|| Self::missing_table(table))?;
        let value = Self::key_value(&entry.hash_key, &key)?;
        Ok(entry.items.get(&value).cloned())
    }

    async fn put_item(&self, table: &str, item: Item) -> StoreResult<()> {
        self.record(ops::PUT_ITEM);

        let mut entry = self
            .tables
            .get_mut(table)
            .ok_or_else(|| Self::missing_table(table))?;
        let value = Self::key_value(&entry.hash_key, &item)?;
        entry.items.insert(value, item);
        Ok(())
    }

    async fn delete_item(&self, table: &str, key: Item) -> StoreResult<()> {
        self.record(ops::DELETE_ITEM);

        let mut entry = self
            .tables
            .get_mut(table)
            .ok_or_else(|| Self::missing_table(table))?;
        let value = Self::key_value(&entry.hash_key, &key)?;
        entry.items.remove(&value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamostore_core::error::ErrorKind;

    fn key(token: &str) -> Item {
        let mut item = Item::new();
        item.insert("token".to_string(), AttributeValue::S(token.to_string()));
        item
    }

    async fn active_backend() -> MemoryBackend {
        let backend = MemoryBackend::new();
        backend.insert_table("sessions", "token", TableStatus::Active);
        backend
    }

    #[tokio::test]
    async fn test_describe_missing_table() {
        let backend = MemoryBackend::new();
        assert!(backend.describe_table("sessions").await.unwrap().is_none());
        assert_eq!(backend.call_count(ops::DESCRIBE_TABLE), 1);
    }

    #[tokio::test]
    async fn test_creating_table_turns_active_after_polls() {
        let backend = MemoryBackend::new().with_creation_polls(2);
        backend
            .create_table(&TableSpec::new("sessions", "token"))
            .await
            .unwrap();

        let mut statuses = Vec::new();
        for _ in 0..4 {
            let desc = backend.describe_table("sessions").await.unwrap().unwrap();
            statuses.push(desc.status);
        }
        assert_eq!(
            statuses,
            vec![
                TableStatus::Creating,
                TableStatus::Creating,
                TableStatus::Active,
                TableStatus::Active
            ]
        );
    }

    #[tokio::test]
    async fn test_create_existing_table_fails() {
        let backend = active_backend().await;
        let err = backend
            .create_table(&TableSpec::new("sessions", "token"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Backend);
    }

    #[tokio::test]
    async fn test_put_get_delete() {
        let backend = active_backend().await;
        let mut item = key("abc");
        item.insert("data".to_string(), AttributeValue::B(vec![1, 2, 3]));

        backend.put_item("sessions", item.clone()).await.unwrap();
        assert_eq!(
            backend.get_item("sessions", key("abc"), true).await.unwrap(),
            Some(item)
        );

        backend.delete_item("sessions", key("abc")).await.unwrap();
        assert!(backend.get_item("sessions", key("abc"), true).await.unwrap().is_none());

        // Deleting again is not an error.
        backend.delete_item("sessions", key("abc")).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let backend = active_backend().await;
        let err = backend.put_item("sessions", key("")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Backend);
        assert!(err.message.contains("empty string"));
    }

    #[tokio::test]
    async fn test_item_ops_on_missing_table_fail() {
        let backend = MemoryBackend::new();
        let err = backend.get_item("nope", key("abc"), true).await.unwrap_err();
        assert!(err.message.contains("ResourceNotFoundException"));
    }

    #[tokio::test]
    async fn test_ttl_attribute_tracked() {
        let backend = active_backend().await;
        backend
            .update_time_to_live("sessions", "ttl", true)
            .await
            .unwrap();
        assert_eq!(backend.ttl_attribute("sessions"), Some("ttl".to_string()));
        assert_eq!(backend.total_calls(), 1);
    }
}
