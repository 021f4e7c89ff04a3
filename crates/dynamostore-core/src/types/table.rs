//! Table descriptions and creation specs.

use std::fmt;

/// Lifecycle status of a table as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableStatus {
    /// The table is being created.
    Creating,
    /// The table is ready for use.
    Active,
    /// The table is being updated but remains usable.
    Updating,
    /// The table is being deleted.
    Deleting,
    /// Any status string outside the known set.
    Unrecognized(String),
}

impl TableStatus {
    /// Parse a backend status string such as `"ACTIVE"`.
    pub fn parse(status: &str) -> Self {
        match status {
            "CREATING" => Self::Creating,
            "ACTIVE" => Self::Active,
            "UPDATING" => Self::Updating,
            "DELETING" => Self::Deleting,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// The backend status string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Creating => "CREATING",
            Self::Active => "ACTIVE",
            Self::Updating => "UPDATING",
            Self::Deleting => "DELETING",
            Self::Unrecognized(s) => s,
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of describing a table that exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescription {
    /// Table name.
    pub name: String,
    /// Current status.
    pub status: TableStatus,
}

/// Parameters for creating a table with a single string hash key and
/// on-demand (pay-per-request) capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    /// Table name.
    pub name: String,
    /// Name of the string-typed partition key attribute.
    pub hash_key: String,
}

impl TableSpec {
    /// Build a spec for the given table and hash key.
    pub fn new(name: impl Into<String>, hash_key: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hash_key: hash_key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(TableStatus::parse("CREATING"), TableStatus::Creating);
        assert_eq!(TableStatus::parse("UPDATING"), TableStatus::Updating);
        assert_eq!(
            TableStatus::parse("ARCHIVED"),
            TableStatus::Unrecognized("ARCHIVED".to_string())
        );
        assert_eq!(TableStatus::parse("ARCHIVED").as_str(), "ARCHIVED");
    }
}
