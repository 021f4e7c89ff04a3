//! Shared helpers for DynamoDB Local integration tests.

use dynamostore_backend::BackendManager;
use dynamostore_core::config::backend::{BackendConfig, DynamoDbConfig};
use dynamostore_session::DynamoStore;

/// Environment variable holding the DynamoDB Local endpoint.
pub const ENDPOINT_VAR: &str = "DYNAMOSTORE_ENDPOINT";

/// Build a store against DynamoDB Local, or `None` when no endpoint is set.
///
/// Each call uses a fresh table name so tests don't interfere.
pub async fn local_store() -> Option<DynamoStore> {
    let Ok(endpoint) = std::env::var(ENDPOINT_VAR) else {
        eprintln!("{ENDPOINT_VAR} not set; skipping DynamoDB Local test");
        return None;
    };

    let config = BackendConfig {
        provider: "dynamodb".to_string(),
        dynamodb: DynamoDbConfig {
            region: "us-west-2".to_string(),
            endpoint,
            access_key_id: "id".to_string(),
            secret_access_key: "secret".to_string(),
            session_token: "token".to_string(),
            ..DynamoDbConfig::default()
        },
    };

    let manager = BackendManager::new(&config)
        .await
        .expect("Failed to build DynamoDB backend");

    let table = format!("scs.session.{}", uuid::Uuid::new_v4().simple());
    Some(DynamoStore::with_table_name(manager.backend(), table))
}

/// A random session token.
pub fn random_token() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
