//! Route handlers, one module per resource

pub mod auth;
pub mod handoffs;
pub mod patients;
pub mod system;
