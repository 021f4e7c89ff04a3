//! DynamoDB backend.

pub mod client;
pub mod convert;
pub mod operations;

pub use client::DynamoDbClient;
pub use operations::DynamoDbBackend;
