//! Key-value backend configuration.

use serde::{Deserialize, Serialize};

/// Top-level backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Backend provider type: `"dynamodb"` or `"memory"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// DynamoDB-specific configuration.
    #[serde(default)]
    pub dynamodb: DynamoDbConfig,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            dynamodb: DynamoDbConfig::default(),
        }
    }
}

/// DynamoDB client configuration.
///
/// Empty strings mean "not set": an empty endpoint uses the regional AWS
/// endpoint, and empty credentials fall back to the default provider chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DynamoDbConfig {
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Endpoint override (e.g. `http://localhost:8000` for DynamoDB Local).
    #[serde(default)]
    pub endpoint: String,
    /// Static access key ID.
    #[serde(default)]
    pub access_key_id: String,
    /// Static secret access key.
    #[serde(default)]
    pub secret_access_key: String,
    /// Optional session token for temporary credentials.
    #[serde(default)]
    pub session_token: String,
    /// Per-operation timeout in milliseconds. `0` keeps the SDK default.
    #[serde(default)]
    pub operation_timeout_ms: u64,
}

impl Default for DynamoDbConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            endpoint: String::new(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            session_token: String::new(),
            operation_timeout_ms: 0,
        }
    }
}

impl DynamoDbConfig {
    /// Whether static credentials were supplied.
    pub fn has_static_credentials(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }
}

fn default_provider() -> String {
    "dynamodb".to_string()
}

fn default_region() -> String {
    "us-west-2".to_string()
}
