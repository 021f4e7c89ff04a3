//! Core type definitions shared by the codec, the provisioner, and the backends.

pub mod item;
pub mod record;
pub mod table;

pub use item::{AttributeValue, Item};
pub use record::SessionRecord;
pub use table::{TableDescription, TableSpec, TableStatus};
