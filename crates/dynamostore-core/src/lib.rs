//! # dynamostore-core
//!
//! Core crate for dynamostore. Contains the backend and clock traits,
//! configuration schemas, the wire item model, table descriptions,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other dynamostore crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::StoreError;
pub use result::StoreResult;
