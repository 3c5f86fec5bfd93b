//! New patient intake form

use super::{trimmed, SubmitState};
use crate::client::error::{ClientError, ClientResult};
use crate::client::session::RequestContext;
use crate::client::ApiClient;
use crate::domain::patient::split_comma_list;
use crate::domain::validation::validate_new_patient;
use crate::domain::{CodeStatus, NewPatient, Patient, TextList};

const MISSING_FIELDS: &str = "Please fill out all required fields.";

/// Result of a successful intake
#[derive(Debug, Clone)]
pub struct IntakeOutcome {
    pub patient: Patient,
    /// Refreshed roster; `None` if the refresh call failed
    pub roster: Option<Vec<Patient>>,
}

/// Intake modal
#[derive(Debug)]
pub struct PatientIntakeForm {
    pub first_name: String,
    pub last_name: String,
    pub mrn: String,
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
    pub room_number: String,
    pub code_status: String,
    pub admitting_diagnosis: String,
    /// Comma-separated
    pub allergies: String,
    pub attending_physician: String,
    open: bool,
    error: Option<String>,
    submit: SubmitState,
}

impl Default for PatientIntakeForm {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            mrn: String::new(),
            date_of_birth: String::new(),
            room_number: String::new(),
            code_status: CodeStatus::default().as_str().to_string(),
            admitting_diagnosis: String::new(),
            allergies: String::new(),
            attending_physician: String::new(),
            open: false,
            error: None,
            submit: SubmitState::default(),
        }
    }
}

impl PatientIntakeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
        self.error = None;
    }

    /// Closes and clears the form
    pub fn close(&mut self) {
        *self = Self::default();
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submit.is_submitting()
    }

    /// Payload as it would be sent
    pub fn to_new_patient(&self) -> NewPatient {
        NewPatient {
            mrn: trimmed(&self.mrn),
            first_name: trimmed(&self.first_name),
            last_name: trimmed(&self.last_name),
            date_of_birth: trimmed(&self.date_of_birth),
            room_number: trimmed(&self.room_number),
            admitting_diagnosis: trimmed(&self.admitting_diagnosis),
            code_status: trimmed(&self.code_status),
            allergies: Some(TextList::List(split_comma_list(&self.allergies))),
            attending_physician: trimmed(&self.attending_physician),
        }
    }

    pub fn begin_submit(&mut self) -> ClientResult<NewPatient> {
        if self.submit.is_submitting() {
            return Err(ClientError::AlreadySubmitting);
        }

        let payload = self.to_new_patient();
        if let Err(errors) = validate_new_patient(&payload) {
            let any_missing = errors.errors().iter().any(|e| e.message.ends_with("is required"));
            self.error = Some(if any_missing {
                MISSING_FIELDS.to_string()
            } else {
                errors.to_string()
            });
            return Err(errors.into());
        }

        self.submit.begin()?;
        self.error = None;
        Ok(payload)
    }

    /// On success the form resets and closes; on failure it stays open with
    /// its fields intact
    pub fn finish_submit(&mut self, result: ClientResult<Patient>) -> ClientResult<Patient> {
        self.submit.finish();
        match result {
            Ok(patient) => {
                self.close();
                Ok(patient)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Creates the patient, then reloads the roster
    pub async fn submit(
        &mut self,
        api: &ApiClient,
        ctx: &RequestContext,
    ) -> ClientResult<IntakeOutcome> {
        let payload = self.begin_submit()?;
        let result = api.create_patient(ctx, &payload).await;
        let patient = self.finish_submit(result)?;

        let roster = match api.list_patients(ctx).await {
            Ok(patients) => Some(patients),
            Err(e) => {
                tracing::warn!(error = %e, "Patient list refresh failed");
                None
            }
        };
        Ok(IntakeOutcome { patient, roster })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> PatientIntakeForm {
        let mut form = PatientIntakeForm::new();
        form.open();
        form.first_name = "Ada".to_string();
        form.last_name = "Lovelace".to_string();
        form.mrn = "MRN-1001".to_string();
        form.date_of_birth = "1950-12-10".to_string();
        form.room_number = "4B".to_string();
        form.admitting_diagnosis = "Pneumonia".to_string();
        form.allergies = "Penicillin, Latex, , Sulfa".to_string();
        form.attending_physician = "Dr. Babbage".to_string();
        form
    }

    #[test]
    fn test_allergy_text_becomes_list() {
        let payload = filled().to_new_patient();
        assert_eq!(
            payload.allergies,
            Some(TextList::List(vec![
                "Penicillin".to_string(),
                "Latex".to_string(),
                "Sulfa".to_string()
            ]))
        );
        assert_eq!(payload.code_status.as_deref(), Some("Full Code"));
    }

    #[test]
    fn test_missing_field_keeps_form_open() {
        let mut form = filled();
        form.room_number = "  ".to_string();

        assert!(matches!(form.begin_submit(), Err(ClientError::Validation(_))));
        assert_eq!(form.error(), Some(MISSING_FIELDS));
        assert!(form.is_open());
        assert!(!form.is_submitting());
        assert_eq!(form.mrn, "MRN-1001");
    }

    #[test]
    fn test_server_error_keeps_fields() {
        let mut form = filled();
        form.begin_submit().unwrap();
        assert!(matches!(form.begin_submit(), Err(ClientError::AlreadySubmitting)));

        let err = form
            .finish_submit(Err(ClientError::Server {
                status: 400,
                message: "A record with mrn 'MRN-1001' already exists".to_string(),
            }))
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(form.error(), Some("A record with mrn 'MRN-1001' already exists"));
        assert!(form.is_open());
        assert_eq!(form.first_name, "Ada");
    }
}
