//! # dynamostore-backend
//!
//! [`KvBackend`](dynamostore_core::traits::KvBackend) implementations for
//! dynamostore. Supports two providers:
//!
//! - **dynamodb**: Amazon DynamoDB (or DynamoDB Local) via
//!   [aws-sdk-dynamodb](https://crates.io/crates/aws-sdk-dynamodb)
//! - **memory**: In-process tables backed by
//!   [dashmap](https://crates.io/crates/dashmap), for tests and local runs
//!
//! The provider is selected at runtime based on configuration.

#[cfg(feature = "dynamodb")]
pub mod dynamodb;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::BackendManager;
