//! Record codec: session records to and from table items.
//!
//! | attribute | type | content |
//! |-----------|------|---------|
//! | `token`   | S    | partition key |
//! | `data`    | B    | opaque payload |
//! | `ttl`     | N    | expiry, whole seconds since the Unix epoch |
//!
//! The expiry is truncated to whole seconds on encode because DynamoDB's
//! TTL sweep only understands second resolution. Token and payload
//! round-trip exactly; the expiry round-trips to the start of its second.

use chrono::{DateTime, Utc};

use dynamostore_core::error::StoreError;
use dynamostore_core::result::StoreResult;
use dynamostore_core::types::{AttributeValue, Item, SessionRecord};

/// Partition key attribute.
pub const TOKEN_ATTRIBUTE: &str = "token";
/// Payload attribute.
pub const DATA_ATTRIBUTE: &str = "data";
/// Expiry attribute; the table's TTL is bound to it.
pub const TTL_ATTRIBUTE: &str = "ttl";

/// Encode a record into a full item.
pub fn encode(record: &SessionRecord) -> Item {
    let mut item = key(&record.token);
    item.insert(
        DATA_ATTRIBUTE.to_string(),
        AttributeValue::B(record.payload.clone()),
    );
    item.insert(
        TTL_ATTRIBUTE.to_string(),
        AttributeValue::N(record.expiry.timestamp().to_string()),
    );
    item
}

/// Build the primary key item for a token.
pub fn key(token: &str) -> Item {
    let mut item = Item::new();
    item.insert(
        TOKEN_ATTRIBUTE.to_string(),
        AttributeValue::S(token.to_string()),
    );
    item
}

/// Decode a backend response.
///
/// `None` (no item) decodes to `Ok(None)`. A present item must carry all
/// three attributes with the expected types.
pub fn decode(item: Option<Item>) -> StoreResult<Option<SessionRecord>> {
    let Some(mut item) = item else {
        return Ok(None);
    };

    let token = match item.remove(TOKEN_ATTRIBUTE) {
        Some(AttributeValue::S(token)) => token,
        other => return Err(unexpected(TOKEN_ATTRIBUTE, "S", other)),
    };

    let payload = match item.remove(DATA_ATTRIBUTE) {
        Some(AttributeValue::B(payload)) => payload,
        other => return Err(unexpected(DATA_ATTRIBUTE, "B", other)),
    };

    let expiry = match item.remove(TTL_ATTRIBUTE) {
        Some(AttributeValue::N(n)) => parse_epoch_seconds(&n)?,
        other => return Err(unexpected(TTL_ATTRIBUTE, "N", other)),
    };

    Ok(Some(SessionRecord {
        token,
        payload,
        expiry,
    }))
}

/// Parse a DynamoDB number holding epoch seconds. A fractional part is
/// tolerated and dropped.
fn parse_epoch_seconds(n: &str) -> StoreResult<DateTime<Utc>> {
    let seconds = match n.parse::<i64>() {
        Ok(seconds) => seconds,
        Err(_) => n
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f.trunc() as i64)
            .ok_or_else(|| StoreError::decode(format!("'{TTL_ATTRIBUTE}' is not a number: {n}")))?,
    };

    DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
        StoreError::decode(format!("'{TTL_ATTRIBUTE}' is out of range: {seconds}"))
    })
}

fn unexpected(attribute: &str, expected: &str, found: Option<AttributeValue>) -> StoreError {
    match found {
        Some(value) => StoreError::decode(format!(
            "attribute '{attribute}' has type {}, expected {expected}",
            value.type_name()
        )),
        None => StoreError::decode(format!("attribute '{attribute}' is missing")),
    }
}
