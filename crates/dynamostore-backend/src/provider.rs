//! Backend manager that dispatches to the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use dynamostore_core::config::backend::BackendConfig;
use dynamostore_core::error::StoreError;
use dynamostore_core::result::StoreResult;
use dynamostore_core::traits::KvBackend;
use dynamostore_core::types::{Item, TableDescription, TableSpec};

/// Backend manager that wraps the configured key-value backend.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct BackendManager {
    /// The inner backend.
    inner: Arc<dyn KvBackend>,
}

impl BackendManager {
    /// Create a new backend manager from configuration.
    pub async fn new(config: &BackendConfig) -> StoreResult<Self> {
        let inner: Arc<dyn KvBackend> = match config.provider.as_str() {
            #[cfg(feature = "dynamodb")]
            "dynamodb" => {
                info!("Initializing DynamoDB backend");
                let client = crate::dynamodb::DynamoDbClient::connect(&config.dynamodb).await?;
                Arc::new(crate::dynamodb::DynamoDbBackend::new(client))
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory backend");
                Arc::new(crate::memory::MemoryBackend::new())
            }
            other => {
                return Err(StoreError::configuration(format!(
                    "Unknown backend provider: '{other}'. Supported: dynamodb, memory"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Get a shared handle to the inner backend.
    pub fn backend(&self) -> Arc<dyn KvBackend> {
        Arc::clone(&self.inner)
    }
}

#[async_trait]
impl KvBackend for BackendManager {
    async fn describe_table(&self, table: &str) -> StoreResult<Option<TableDescription>> {
        self.inner.describe_table(table).await
    }

    async fn create_table(&self, spec: &TableSpec) -> StoreResult<()> {
        self.inner.create_table(spec).await
    }

    async fn update_time_to_live(
        &self,
        table: &str,
        attribute: &str,
        enabled: bool,
    ) -> StoreResult<()> {
        self.inner.update_time_to_live(table, attribute, enabled).await
    }

    async fn get_item(
        &self,
        table: &str,
        key: Item,
        consistent_read: bool,
    ) -> StoreResult<Option<Item>> {
        self.inner.get_item(table, key, consistent_read).await
    }

    async fn put_item(&self, table: &str, item: Item) -> StoreResult<()> {
        self.inner.put_item(table, item).await
    }

    async fn delete_item(&self, table: &str, key: Item) -> StoreResult<()> {
        self.inner.delete_item(table, key).await
    }
}
