//! PostgreSQL record store
//!
//! Users, patients and handoffs live in three tables created by
//! `migrations/001_initial_schema.sql`. Unique constraints on `users.email` and
//! `patients.mrn` back up the service-level checks.

pub mod adapter;
pub mod client;
pub mod models;

pub use adapter::PostgreSQLAdapter;
pub use client::PostgreSQLClient;
