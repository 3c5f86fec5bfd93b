//! Response envelopes
//!
//! Shared by the handlers and the API client so both sides agree on the wire
//! shape.

use crate::domain::{FieldError, HandoffView, Patient, UserProfile};
use serde::{Deserialize, Serialize};

/// `{message}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok" or "unavailable"
    pub status: String,
    /// Backend name
    pub database: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientResponse {
    pub message: String,
    pub patient: Patient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientListResponse {
    pub message: String,
    pub count: usize,
    pub patients: Vec<Patient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoffResponse {
    pub message: String,
    pub handoff: HandoffView,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoffListResponse {
    pub message: String,
    pub count: usize,
    pub handoffs: Vec<HandoffView>,
}

/// Body of every 4xx/5xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }
}
