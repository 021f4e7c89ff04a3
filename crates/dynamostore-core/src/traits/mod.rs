//! Core traits defined in `dynamostore-core` and implemented by other crates.

pub mod backend;
pub mod clock;
pub mod session;

pub use backend::KvBackend;
pub use clock::{Clock, ManualClock, SystemClock};
pub use session::SessionStore;
