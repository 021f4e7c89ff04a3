//! # dynamostore-session
//!
//! The session store itself: the [`codec`] between session records and
//! table items, the idempotent [`provisioner`] for the backing table, and
//! the [`store`] implementing find/commit/delete with client-side expiry.

pub mod codec;
pub mod provisioner;
pub mod store;

pub use provisioner::{TableProvisioner, WaitPolicy};
pub use store::DynamoStore;
