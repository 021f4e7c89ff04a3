//! Configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section; every field has a default so an empty file is valid.

pub mod backend;
pub mod logging;
pub mod store;

use serde::{Deserialize, Serialize};

use self::backend::BackendConfig;
use self::logging::LoggingConfig;
use self::store::StoreConfig;

use crate::error::StoreError;

/// Environment variable prefix for overrides, e.g. `DYNAMOSTORE__STORE__TABLE_NAME`.
pub const ENV_PREFIX: &str = "DYNAMOSTORE";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Session store settings.
    #[serde(default)]
    pub store: StoreConfig,
    /// Key-value backend settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// The file is optional. Values are overlaid with environment variables
    /// prefixed with `DYNAMOSTORE__`, using `__` as the section separator.
    pub fn load(path: &str) -> Result<Self, StoreError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| StoreError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| StoreError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
