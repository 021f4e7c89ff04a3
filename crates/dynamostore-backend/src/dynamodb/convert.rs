//! Conversion between the core item model and SDK attribute values.

use std::collections::HashMap;

use aws_sdk_dynamodb::primitives::Blob;
use aws_sdk_dynamodb::types::AttributeValue as SdkAttributeValue;

use dynamostore_core::error::StoreError;
use dynamostore_core::result::StoreResult;
use dynamostore_core::types::{AttributeValue, Item};

/// Convert a core item into an SDK attribute map.
pub fn to_sdk_item(item: Item) -> HashMap<String, SdkAttributeValue> {
    item.into_iter()
        .map(|(name, value)| (name, to_sdk_value(value)))
        .collect()
}

/// Convert an SDK attribute map into a core item.
///
/// Only `S`, `N` and `B` attributes are understood; anything else means the
/// item was not written by this store and fails with a decode error.
pub fn from_sdk_item(item: HashMap<String, SdkAttributeValue>) -> StoreResult<Item> {
    item.into_iter()
        .map(|(name, value)| {
            let converted = from_sdk_value(&name, value)?;
            Ok((name, converted))
        })
        .collect()
}

fn to_sdk_value(value: AttributeValue) -> SdkAttributeValue {
    match value {
        AttributeValue::S(s) => SdkAttributeValue::S(s),
        AttributeValue::N(n) => SdkAttributeValue::N(n),
        AttributeValue::B(b) => SdkAttributeValue::B(Blob::new(b)),
    }
}

fn from_sdk_value(name: &str, value: SdkAttributeValue) -> StoreResult<AttributeValue> {
    match value {
        SdkAttributeValue::S(s) => Ok(AttributeValue::S(s)),
        SdkAttributeValue::N(n) => Ok(AttributeValue::N(n)),
        SdkAttributeValue::B(b) => Ok(AttributeValue::B(b.into_inner())),
        other => Err(StoreError::decode(format!(
            "unsupported attribute type for '{name}': {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamostore_core::error::ErrorKind;

    #[test]
    fn test_sdk_item_conversion() {
        let mut item = Item::new();
        item.insert("token".to_string(), AttributeValue::S("abc".to_string()));
        item.insert("data".to_string(), AttributeValue::B(vec![0, 255]));
        item.insert("ttl".to_string(), AttributeValue::N("1700000000".to_string()));

        let sdk = to_sdk_item(item.clone());
        assert_eq!(sdk.get("data"), Some(&SdkAttributeValue::B(Blob::new(vec![0, 255]))));

        assert_eq!(from_sdk_item(sdk).unwrap(), item);
    }

    #[test]
    fn test_unsupported_attribute_type() {
        let mut sdk = HashMap::new();
        sdk.insert("flag".to_string(), SdkAttributeValue::Bool(true));

        let err = from_sdk_item(sdk).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Decode);
        assert!(err.message.contains("'flag'"));
    }
}
