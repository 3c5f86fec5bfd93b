// ShiftSync - SBAR shift handoff service
// Copyright (c) 2025 ShiftSync Contributors
// Licensed under the MIT License

//! # ShiftSync - SBAR shift handoff service
//!
//! ShiftSync lets nurses record structured shift-change handoffs for hospital
//! patients. Each handoff follows the SBAR format (Situation, Background,
//! Assessment, Recommendation) with optional vitals, medications due, pending
//! tasks, urgent flags and family concerns.
//!
//! ## Overview
//!
//! This library provides:
//! - **Accounts** for nursing staff with argon2 password hashes and signed session tokens
//! - **Patients** with unique MRNs, admission details and soft deactivation
//! - **Handoffs** stored against a patient and listed newest first
//! - **A REST API** served with axum, and a typed client with form controllers
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`api`] - HTTP routes, extractors and the server lifecycle
//! - [`client`] - API client and the login, intake and handoff form controllers
//! - [`core`] - Business logic (authentication, record service)
//! - [`adapters`] - Record stores (PostgreSQL, in-memory)
//! - [`domain`] - Records, payloads, validation and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shiftsync::adapters::database::create_record_store;
//! use shiftsync::api::{bind, serve, AppState};
//! use shiftsync::config::load_config;
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("shiftsync.toml")?;
//!     let store = create_record_store(&config)?;
//!     store.ensure_schema().await?;
//!
//!     let (_shutdown_tx, shutdown_rx) = watch::channel(false);
//!     let listener = bind(&config.server.bind_address()).await?;
//!     serve(listener, AppState::new(store, &config.auth), shutdown_rx).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Recording a Handoff
//!
//! ```rust
//! use shiftsync::adapters::memory::MemoryStore;
//! use shiftsync::core::records::RecordService;
//! use shiftsync::domain::{NewHandoff, NewPatient};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let records = RecordService::new(Arc::new(MemoryStore::new()));
//!
//! let patient = records
//!     .create_patient(&NewPatient {
//!         mrn: Some("MRN-1001".to_string()),
//!         first_name: Some("Ada".to_string()),
//!         last_name: Some("Byron".to_string()),
//!         date_of_birth: Some("1952-12-10".to_string()),
//!         room_number: Some("4B".to_string()),
//!         admitting_diagnosis: Some("Pneumonia".to_string()),
//!         code_status: Some("Full Code".to_string()),
//!         attending_physician: Some("Dr. Grey".to_string()),
//!         ..NewPatient::default()
//!     })
//!     .await?;
//!
//! let handoff = records
//!     .create_handoff(
//!         &NewHandoff {
//!             patient: Some(patient.id.to_string()),
//!             shift: Some("night".to_string()),
//!             situation: Some("Stable overnight".to_string()),
//!             background: Some("Day 2 of IV antibiotics".to_string()),
//!             assessment: Some("Afebrile, sats 95% on 2L".to_string()),
//!             recommendation: Some("Wean oxygen as tolerated".to_string()),
//!             ..NewHandoff::default()
//!         },
//!         None,
//!     )
//!     .await?;
//!
//! let summary = handoff.patient.expect("patient summary");
//! assert_eq!(summary.room_number, "4B");
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return [`domain::Result`], whose error is
//! [`domain::ShiftSyncError`]. Field-level problems arrive as
//! [`domain::ValidationErrors`] and map to `400 Bad Request` in the API.

pub mod adapters;
pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
