//! Convenience result type alias for dynamostore.

use crate::error::StoreError;

/// A specialized `Result` type for dynamostore operations.
///
/// Absence of a record or table is expressed as `Ok(None)` by the
/// operations that can observe it, never as an error.
pub type StoreResult<T> = Result<T, StoreError>;
