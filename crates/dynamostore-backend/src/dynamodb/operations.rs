//! DynamoDB backend implementation.

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
    TimeToLiveSpecification,
};
use tracing::debug;

use dynamostore_core::error::{ErrorKind, StoreError};
use dynamostore_core::result::StoreResult;
use dynamostore_core::traits::KvBackend;
use dynamostore_core::types::{Item, TableDescription, TableSpec, TableStatus};

use super::client::DynamoDbClient;
use super::convert::{from_sdk_item, to_sdk_item};

/// DynamoDB-backed key-value backend.
#[derive(Debug, Clone)]
pub struct DynamoDbBackend {
    /// DynamoDB client.
    client: DynamoDbClient,
}

impl DynamoDbBackend {
    /// Create a new DynamoDB backend.
    pub fn new(client: DynamoDbClient) -> Self {
        Self { client }
    }

    /// Map an SDK error to a StoreError.
    fn map_err<E>(operation: &str, e: E) -> StoreError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StoreError::with_source(
            ErrorKind::Backend,
            format!("DynamoDB {operation} failed: {}", DisplayErrorContext(&e)),
            e,
        )
    }

    /// Map a request builder error to a StoreError.
    fn build_err(e: aws_sdk_dynamodb::error::BuildError) -> StoreError {
        StoreError::with_source(ErrorKind::Internal, format!("Invalid DynamoDB request: {e}"), e)
    }
}

#[async_trait]
impl KvBackend for DynamoDbBackend {
    async fn describe_table(&self, table: &str) -> StoreResult<Option<TableDescription>> {
        let result = self
            .client
            .inner()
            .describe_table()
            .table_name(table)
            .send()
            .await;

        match result {
            Ok(output) => {
                let status = output
                    .table()
                    .and_then(|t| t.table_status())
                    .map(|s| TableStatus::parse(s.as_str()))
                    .unwrap_or_else(|| TableStatus::Unrecognized(String::new()));

                debug!(table, %status, "Described table");
                Ok(Some(TableDescription {
                    name: table.to_string(),
                    status,
                }))
            }
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception()) =>
            {
                debug!(table, "Table not found");
                Ok(None)
            }
            Err(err) => Err(Self::map_err("DescribeTable", err)),
        }
    }

    async fn create_table(&self, spec: &TableSpec) -> StoreResult<()> {
        let key_schema = KeySchemaElement::builder()
            .attribute_name(&spec.hash_key)
            .key_type(KeyType::Hash)
            .build()
            .map_err(Self::build_err)?;

        let attribute = AttributeDefinition::builder()
            .attribute_name(&spec.hash_key)
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(Self::build_err)?;

        self.client
            .inner()
            .create_table()
            .table_name(&spec.name)
            .billing_mode(BillingMode::PayPerRequest)
            .key_schema(key_schema)
            .attribute_definitions(attribute)
            .send()
            .await
            .map_err(|e| Self::map_err("CreateTable", e))?;

        debug!(table = %spec.name, hash_key = %spec.hash_key, "Create table requested");
        Ok(())
    }

    async fn update_time_to_live(
        &self,
        table: &str,
        attribute: &str,
        enabled: bool,
    ) -> StoreResult<()> {
        let specification = TimeToLiveSpecification::builder()
            .attribute_name(attribute)
            .enabled(enabled)
            .build()
            .map_err(Self::build_err)?;

        self.client
            .inner()
            .update_time_to_live()
            .table_name(table)
            .time_to_live_specification(specification)
            .send()
            .await
            .map_err(|e| Self::map_err("UpdateTimeToLive", e))?;

        debug!(table, attribute, enabled, "Updated time to live");
        Ok(())
    }

    async fn get_item(
        &self,
        table: &str,
        key: Item,
        consistent_read: bool,
    ) -> StoreResult<Option<Item>> {
        let output = self
            .client
            .inner()
            .get_item()
            .table_name(table)
            .set_key(Some(to_sdk_item(key)))
            .consistent_read(consistent_read)
            .send()
            .await
            .map_err(|e| Self::map_err("GetItem", e))?;

        output.item.map(from_sdk_item).transpose()
    }

    async fn put_item(&self, table: &str, item: Item) -> StoreResult<()> {
        self.client
            .inner()
            .put_item()
            .table_name(table)
            .set_item(Some(to_sdk_item(item)))
            .send()
            .await
            .map_err(|e| Self::map_err("PutItem", e))?;
        Ok(())
    }

    async fn delete_item(&self, table: &str, key: Item) -> StoreResult<()> {
        self.client
            .inner()
            .delete_item()
            .table_name(table)
            .set_key(Some(to_sdk_item(key)))
            .send()
            .await
            .map_err(|e| Self::map_err("DeleteItem", e))?;
        Ok(())
    }
}
