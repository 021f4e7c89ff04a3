//! Key-value backend trait for pluggable table services.

use async_trait::async_trait;

use crate::result::StoreResult;
use crate::types::{Item, TableDescription, TableSpec};

/// The narrow slice of a managed key-value service the session store needs.
///
/// "Not found" is never an error here: [`describe_table`](Self::describe_table)
/// returns `Ok(None)` for a missing table and [`get_item`](Self::get_item)
/// returns `Ok(None)` for a missing item. Every other failure is returned
/// as a [`Backend`](crate::error::ErrorKind::Backend) error.
#[async_trait]
pub trait KvBackend: Send + Sync + std::fmt::Debug + 'static {
    /// Describe a table by name. Returns `None` if it does not exist.
    async fn describe_table(&self, table: &str) -> StoreResult<Option<TableDescription>>;

    /// Create a table with on-demand capacity and a single string hash key.
    async fn create_table(&self, spec: &TableSpec) -> StoreResult<()>;

    /// Enable or disable time-to-live expiration on an attribute.
    async fn update_time_to_live(
        &self,
        table: &str,
        attribute: &str,
        enabled: bool,
    ) -> StoreResult<()>;

    /// Read a single item by key.
    async fn get_item(
        &self,
        table: &str,
        key: Item,
        consistent_read: bool,
    ) -> StoreResult<Option<Item>>;

    /// Write an item, replacing any existing item with the same key.
    async fn put_item(&self, table: &str, item: Item) -> StoreResult<()>;

    /// Delete an item by key. Deleting a missing item succeeds.
    async fn delete_item(&self, table: &str, key: Item) -> StoreResult<()>;
}
