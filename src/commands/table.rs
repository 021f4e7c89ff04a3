//! Table provisioning command.

use crate::output::{self, OutputFormat};
use dynamostore_core::error::StoreError;
use dynamostore_session::DynamoStore;

/// Run the idempotent table provisioner.
pub async fn ensure(store: &DynamoStore, format: OutputFormat) -> Result<(), StoreError> {
    tracing::info!(table = store.table_name(), "Ensuring session table");
    store.ensure_table().await?;
    output::print_success(&format!("Table '{}' is ready", store.table_name()), format);
    Ok(())
}
