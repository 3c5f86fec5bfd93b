//! Storage backends for ShiftSync.
//!
//! - [`database`] - the [`RecordStore`](database::RecordStore) trait and factory
//! - [`memory`] - process-local store used by tests and demos
//! - [`postgresql`] - PostgreSQL implementation
//!
//! ```rust,no_run
//! use shiftsync::adapters::database::create_record_store;
//! use shiftsync::config::ShiftSyncConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = create_record_store(&ShiftSyncConfig::default())?;
//! store.ensure_schema().await?;
//! assert_eq!(store.backend_name(), "memory");
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod memory;
pub mod postgresql;
