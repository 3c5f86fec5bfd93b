//! Storage abstraction layer
//!
//! ShiftSync talks to storage only through the [`RecordStore`] trait, so the
//! service and HTTP layers run unchanged against PostgreSQL or the in-memory
//! store.

pub mod factory;
pub mod traits;

pub use factory::create_record_store;
pub use traits::RecordStore;
