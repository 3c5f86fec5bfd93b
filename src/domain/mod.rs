//! Domain models and types for ShiftSync.
//!
//! This module holds the three record types (users, patients, handoffs), their
//! wire payloads, the validators that turn payloads into storable values, and the
//! crate-wide error type.
//!
//! # Overview
//!
//! - **Strongly-typed identifiers** ([`UserId`], [`PatientId`], [`HandoffId`])
//! - **Records** ([`User`], [`Patient`], [`Handoff`]) and the joined [`HandoffView`]
//! - **Validators** ([`validation`]) shared by the server and the client forms
//! - **Error types** ([`ShiftSyncError`], [`ValidationErrors`]) and the [`Result`] alias
//!
//! # Type Safety
//!
//! Identifiers are UUID newtypes, so ids of different record types cannot be mixed:
//!
//! ```rust
//! use shiftsync::domain::{HandoffId, PatientId};
//!
//! let patient: PatientId = "0b9a4a3e-8d54-4c59-bd55-4c3fd9d1b2a7".parse().unwrap();
//! assert_eq!(patient.to_string(), "0b9a4a3e-8d54-4c59-bd55-4c3fd9d1b2a7");
//!
//! // let wrong: HandoffId = patient;  // Compile error!
//! # let _ = HandoffId::new();
//! ```
//!
//! # Validation
//!
//! ```rust
//! use shiftsync::domain::validation::validate_new_patient;
//! use shiftsync::domain::NewPatient;
//!
//! let errors = validate_new_patient(&NewPatient::default()).unwrap_err();
//! assert!(errors.has_field("mrn"));
//! assert!(errors.has_field("codeStatus"));
//! ```

pub mod context;
pub mod errors;
pub mod handoff;
pub mod ids;
pub mod patient;
pub mod result;
pub mod user;
pub mod validation;

// Re-export commonly used types for convenience
pub use errors::{FieldError, ShiftSyncError, ValidationErrors};
pub use handoff::{
    Handoff, HandoffView, MedicationDue, MedicationInput, NewHandoff, NumberInput, PendingTask,
    Shift, TaskInput, TaskPriority, Vitals, VitalsInput,
};
pub use ids::{HandoffId, PatientId, UserId};
pub use patient::{
    CodeStatus, NewPatient, Patient, PatientPatch, PatientSummary, TextList, ValidPatientPatch,
};
pub use result::Result;
pub use user::{LoginRequest, RegisterUser, Role, User, UserProfile};
pub use validation::{ValidHandoff, ValidLogin, ValidPatient, ValidUser};
