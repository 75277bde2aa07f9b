//! In-memory stores for local runs and tests.

mod store;

pub use store::MemoryStore;
