//! In-memory backend for the advising store.
//!
//! State lives for the lifetime of the process. Identity and token tables sit
//! behind one async `RwLock`; each session carries its own once-cell so that
//! bookings of different sessions never contend.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{MemoryStore, MemoryStoreBuilder};
