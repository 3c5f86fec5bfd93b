//! Form controllers
//!
//! Each form validates locally with the same validators the server uses, then
//! calls the [`ApiClient`](super::ApiClient). A submission runs in two halves,
//! `begin_submit` and `finish_submit`, so a UI can start a request from one event
//! and apply its result from another. `submit` runs both around the call.

pub mod handoff;
pub mod login;
pub mod patient_intake;

pub use handoff::{HandoffForm, HandoffFormStatus, MedicationRow, TaskRow, VitalsFields};
pub use login::{AuthMode, AuthRequest, AuthResponse, LoginForm, LoginOutcome};
pub use patient_intake::{IntakeOutcome, PatientIntakeForm};

use super::error::ClientError;
use crate::domain::PatientId;

/// Navigation target after a form completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    PatientList,
    PatientDetail(PatientId),
}

/// In-flight flag shared by every form
#[derive(Debug, Default)]
pub struct SubmitState {
    submitting: bool,
}

impl SubmitState {
    /// Marks a submission as started
    ///
    /// # Errors
    ///
    /// [`ClientError::AlreadySubmitting`] while a previous one is unfinished
    pub fn begin(&mut self) -> Result<(), ClientError> {
        if self.submitting {
            return Err(ClientError::AlreadySubmitting);
        }
        self.submitting = true;
        Ok(())
    }

    pub fn finish(&mut self) {
        self.submitting = false;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}

fn trimmed(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
