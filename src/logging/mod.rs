//! Logging and observability
//!
//! Structured logging through `tracing`, with:
//! - JSON-formatted rolling log files
//! - Configurable log levels (`RUST_LOG` overrides the configured level)
//! - Human-readable or JSON console output
//! - Macros for record lifecycle and authentication events
//!
//! Record macros log identifiers only, never patient names or clinical text.
//!
//! # Example
//!
//! ```no_run
//! use shiftsync::logging::init_logging;
//! use shiftsync::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("ShiftSync API starting");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the creation of a record
///
/// # Example
///
/// ```no_run
/// use shiftsync::log_record_created;
/// use shiftsync::domain::PatientId;
///
/// let id = PatientId::new();
/// log_record_created!("patient", &id);
/// ```
#[macro_export]
macro_rules! log_record_created {
    ($entity:expr, $id:expr) => {
        tracing::info!(entity = $entity, id = %$id, "Record created");
    };
}

/// Log a change to an existing record
///
/// # Example
///
/// ```no_run
/// use shiftsync::log_record_updated;
/// use shiftsync::domain::PatientId;
///
/// let id = PatientId::new();
/// log_record_updated!("patient", &id, "deactivated");
/// ```
#[macro_export]
macro_rules! log_record_updated {
    ($entity:expr, $id:expr, $action:expr) => {
        tracing::info!(entity = $entity, id = %$id, action = $action, "Record updated");
    };
}

/// Log an authentication event
///
/// # Example
///
/// ```no_run
/// use shiftsync::log_auth_event;
///
/// log_auth_event!("login_failed", "nurse@ward.example");
/// ```
#[macro_export]
macro_rules! log_auth_event {
    ($event:expr, $email:expr) => {
        tracing::info!(event = $event, email = %$email, "Authentication event");
    };
}
