//! Session store configuration.

use serde::{Deserialize, Serialize};

/// Table name used when a more specific name isn't configured.
pub const DEFAULT_TABLE_NAME: &str = "scs.session";

/// Session store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Name of the backing table.
    #[serde(default = "default_table_name")]
    pub table_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            table_name: default_table_name(),
        }
    }
}

fn default_table_name() -> String {
    DEFAULT_TABLE_NAME.to_string()
}
