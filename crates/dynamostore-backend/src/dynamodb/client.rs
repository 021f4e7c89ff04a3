//! DynamoDB client construction.

use std::time::Duration;

use aws_config::BehaviorVersion;
use aws_config::timeout::TimeoutConfig;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{Credentials, Region};
use tracing::info;

use dynamostore_core::config::backend::DynamoDbConfig;
use dynamostore_core::result::StoreResult;

/// Provider name attached to statically configured credentials.
const STATIC_CREDENTIALS_PROVIDER: &str = "dynamostore-config";

/// DynamoDB client wrapper.
#[derive(Debug, Clone)]
pub struct DynamoDbClient {
    /// The SDK client; cheap to clone, shares one connection pool.
    client: Client,
}

impl DynamoDbClient {
    /// Create a client from configuration.
    ///
    /// Static credentials and the endpoint override are optional; when absent
    /// the SDK's default credential chain and regional endpoint are used.
    pub async fn connect(config: &DynamoDbConfig) -> StoreResult<Self> {
        info!(
            region = %config.region,
            endpoint = %display_endpoint(&config.endpoint),
            access_key = %mask_access_key(&config.access_key_id),
            "Connecting to DynamoDB"
        );

        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

        if !config.endpoint.is_empty() {
            loader = loader.endpoint_url(config.endpoint.as_str());
        }

        if config.has_static_credentials() {
            let session_token =
                (!config.session_token.is_empty()).then(|| config.session_token.clone());
            loader = loader.credentials_provider(Credentials::new(
                config.access_key_id.clone(),
                config.secret_access_key.clone(),
                session_token,
                None,
                STATIC_CREDENTIALS_PROVIDER,
            ));
        }

        if config.operation_timeout_ms > 0 {
            loader = loader.timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(Duration::from_millis(config.operation_timeout_ms))
                    .build(),
            );
        }

        let sdk_config = loader.load().await;
        info!("DynamoDB client configured");

        Ok(Self {
            client: Client::new(&sdk_config),
        })
    }

    /// Wrap an existing SDK client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Get a reference to the SDK client.
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

fn display_endpoint(endpoint: &str) -> &str {
    if endpoint.is_empty() { "<regional>" } else { endpoint }
}

/// Mask an access key ID for safe logging, keeping the first four characters.
fn mask_access_key(key: &str) -> String {
    if key.is_empty() {
        return "<default chain>".to_string();
    }
    let visible: String = key.chars().take(4).collect();
    format!("{visible}****")
}
