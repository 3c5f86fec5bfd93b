//! Core business logic for ShiftSync.
//!
//! # Modules
//!
//! - [`auth`] - argon2 password hashing and HS256 session tokens
//! - [`records`] - the record service: validate, persist, attach summaries
//!
//! # Handoff Workflow
//!
//! 1. **Validate**: the payload goes through `domain::validation`
//! 2. **Resolve**: the referenced patient must exist
//! 3. **Persist**: the normalized handoff is written to the record store
//! 4. **Shape**: reads join a patient summary onto each handoff
//!
//! # Example
//!
//! ```rust,no_run
//! use shiftsync::adapters::memory::MemoryStore;
//! use shiftsync::core::records::RecordService;
//! use shiftsync::domain::{NewHandoff, NewPatient};
//! use std::sync::Arc;
//!
//! # async fn example(intake: NewPatient) -> Result<(), Box<dyn std::error::Error>> {
//! let service = RecordService::new(Arc::new(MemoryStore::new()));
//! let patient = service.create_patient(&intake).await?;
//!
//! let handoff = NewHandoff {
//!     patient: Some(patient.id.to_string()),
//!     shift: Some("night".to_string()),
//!     situation: Some("Afebrile, resting".to_string()),
//!     background: Some("Post-op day 2".to_string()),
//!     assessment: Some("Pain controlled".to_string()),
//!     recommendation: Some("Ambulate in the morning".to_string()),
//!     ..NewHandoff::default()
//! };
//! service.create_handoff(&handoff, None).await?;
//!
//! println!("{} handoffs", service.list_handoffs().await?.len());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod records;
