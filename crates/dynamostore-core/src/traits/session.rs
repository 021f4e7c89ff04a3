//! Session store trait consumed by session middleware.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::result::StoreResult;

/// Token-keyed session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the payload for a live session, or `None` if the token is
    /// unknown or expired.
    async fn find(&self, token: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Insert or fully replace the session under `token`.
    async fn commit(&self, token: &str, payload: &[u8], expiry: DateTime<Utc>) -> StoreResult<()>;

    /// Remove the session under `token`. Missing tokens are not an error.
    async fn delete(&self, token: &str) -> StoreResult<()>;
}
