//! Backend-neutral wire item model.
//!
//! Mirrors the subset of DynamoDB attribute types the session table uses,
//! so the codec and in-memory backend need no SDK types.

use std::collections::HashMap;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    /// String.
    S(String),
    /// Number, carried in its decimal string form.
    N(String),
    /// Binary.
    B(Vec<u8>),
}

impl AttributeValue {
    /// The DynamoDB type descriptor (`"S"`, `"N"`, `"B"`).
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::S(_) => "S",
            Self::N(_) => "N",
            Self::B(_) => "B",
        }
    }
}

/// An item: attribute name to value.
pub type Item = HashMap<String, AttributeValue>;
