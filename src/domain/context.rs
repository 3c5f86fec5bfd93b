//! Error context extension trait
//!
//! Adds `.context()` / `.with_context()` to any `Result` whose error converts into
//! [`ShiftSyncError`]. Unlike `anyhow::Context`, the variant is kept: a wrapped
//! database failure is still a `Database` error and still maps to a 500, and errors
//! the caller caused (validation, not found, authentication) pass through untouched
//! so their user-facing message is not polluted with internal detail.
//!
//! ```rust
//! use shiftsync::domain::Result;
//! use shiftsync::domain::context::ResultExt;
//!
//! fn read_config(path: &str) -> Result<String> {
//!     std::fs::read_to_string(path)
//!         .with_context(|| format!("Failed to read config file: {path}"))
//! }
//! ```

use crate::domain::errors::ShiftSyncError;
use crate::domain::result::Result;
use std::fmt::Display;

/// Extension trait for adding context to `Result` types
pub trait ResultExt<T> {
    /// Add context to an error (eager)
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Add context to an error; the closure only runs on failure
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<ShiftSyncError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| wrap(e.into(), context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| wrap(e.into(), f()))
    }
}

fn wrap(error: ShiftSyncError, context: impl Display) -> ShiftSyncError {
    match error {
        ShiftSyncError::Configuration(msg) => {
            ShiftSyncError::Configuration(format!("{context}: {msg}"))
        }
        ShiftSyncError::Database(msg) => ShiftSyncError::Database(format!("{context}: {msg}")),
        ShiftSyncError::Serialization(msg) => {
            ShiftSyncError::Serialization(format!("{context}: {msg}"))
        }
        ShiftSyncError::Io(msg) => ShiftSyncError::Io(format!("{context}: {msg}")),
        ShiftSyncError::Other(msg) => ShiftSyncError::Other(format!("{context}: {msg}")),
        client @ (ShiftSyncError::Validation(_)
        | ShiftSyncError::NotFound { .. }
        | ShiftSyncError::Authentication(_)) => client,
    }
}
