//! Process-local record store for tests, demos and `database_target = "memory"`

pub mod store;

pub use store::MemoryStore;
