//! Domain error types
//!
//! This module defines the error hierarchy for ShiftSync. Every fallible operation
//! in the crate returns [`ShiftSyncError`]; the HTTP layer maps each variant to a
//! status code and the client layer re-reads the message from the response body.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Main ShiftSync error type
#[derive(Debug, Error)]
pub enum ShiftSyncError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Missing, malformed or out-of-enum fields, and duplicate unique keys
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// The referenced record does not exist
    #[error("{entity} not found")]
    NotFound {
        /// Record type, e.g. "Patient"
        entity: &'static str,
        /// Identifier that failed to resolve
        id: String,
    },

    /// Bad credentials or an invalid/expired session token
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl ShiftSyncError {
    /// Creates a NotFound error for the given record type and id
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        ShiftSyncError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Returns true for errors caused by the caller's input rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ShiftSyncError::Validation(_)
                | ShiftSyncError::NotFound { .. }
                | ShiftSyncError::Authentication(_)
        )
    }
}

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Wire name of the field (camelCase), e.g. `roomNumber` or `pendingTasks[1].priority`
    pub field: String,

    /// Human-readable reason
    pub message: String,
}

/// Collected validation failures for one record
///
/// Validators accumulate every problem they find instead of stopping at the first,
/// so a form can highlight all offending fields at once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Creates an empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an error set holding one failure
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// Duplicate unique key (mrn, email)
    pub fn duplicate(field: impl Into<String>, value: impl fmt::Display) -> Self {
        let field = field.into();
        let message = format!("A record with {field} '{value}' already exists");
        Self::single(field, message)
    }

    /// Records a failure
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Appends every failure from another set
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Records a "field is required" failure
    pub fn required(&mut self, field: &str) {
        self.add(field, format!("{field} is required"));
    }

    /// True when no failures have been recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of recorded failures
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Recorded failures in the order they were found
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// True if the given field has at least one failure
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Converts into `Ok(value)` when empty, `Err(self)` otherwise
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

// Conversion from std::io::Error
impl From<std::io::Error> for ShiftSyncError {
    fn from(err: std::io::Error) -> Self {
        ShiftSyncError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ShiftSyncError {
    fn from(err: serde_json::Error) -> Self {
        ShiftSyncError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ShiftSyncError {
    fn from(err: toml::de::Error) -> Self {
        ShiftSyncError::Configuration(format!("TOML parse error: {err}"))
    }
}
