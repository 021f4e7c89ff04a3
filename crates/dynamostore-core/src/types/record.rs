//! The session record persisted by the store.

use chrono::{DateTime, Utc};

/// A session token with its opaque payload and absolute expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    /// Unique session token; the table's partition key.
    pub token: String,
    /// Opaque payload bytes.
    pub payload: Vec<u8>,
    /// Instant after which the record is logically dead.
    pub expiry: DateTime<Utc>,
}

impl SessionRecord {
    /// Create a new record.
    pub fn new(token: impl Into<String>, payload: impl Into<Vec<u8>>, expiry: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            payload: payload.into(),
            expiry,
        }
    }

    /// Whether the record is expired at `now`. A record expiring exactly
    /// at `now` is already expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry <= now
    }
}
