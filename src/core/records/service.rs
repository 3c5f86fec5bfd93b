//! Record service
//!
//! Every write runs its validator first and touches the store only with a
//! normalized value. Reads attach patient summaries to handoffs.

use crate::adapters::database::traits::RecordStore;
use crate::core::auth::{hash_password_async, verify_password_async};
use crate::domain::validation::{
    validate_login, validate_new_handoff, validate_new_patient, validate_new_user,
    validate_patient_patch,
};
use crate::domain::{
    Handoff, HandoffId, HandoffView, LoginRequest, NewHandoff, NewPatient, Patient, PatientId,
    PatientPatch, PatientSummary, RegisterUser, Result, ShiftSyncError, User, UserId, UserProfile,
    ValidationErrors,
};
use crate::{log_auth_event, log_record_created, log_record_updated};
use chrono::Utc;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Parses a path id; anything that is not a UUID simply does not resolve
fn resolve_id<T: FromStr>(entity: &'static str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| ShiftSyncError::not_found(entity, raw))
}

/// Users, patients and handoffs on top of a [`RecordStore`]
#[derive(Clone)]
pub struct RecordService {
    store: Arc<dyn RecordStore>,
}

impl RecordService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// The backing store
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Registers a nurse account
    ///
    /// # Errors
    ///
    /// Validation errors for missing fields, a malformed email, a short password
    /// or an email that is already registered
    pub async fn create_user(&self, input: &RegisterUser) -> Result<UserProfile> {
        let valid = validate_new_user(input)?;

        if self.store.find_user_by_email(&valid.email).await?.is_some() {
            return Err(ValidationErrors::duplicate("email", &valid.email).into());
        }

        let password_hash = hash_password_async(valid.password).await?;
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            name: valid.name,
            email: valid.email,
            password_hash,
            role: valid.role,
            department: valid.department,
            created_at: now,
            updated_at: now,
        };

        self.store.insert_user(&user).await?;
        log_record_created!("user", user.id);
        log_auth_event!("registered", user.email);
        Ok(user.profile())
    }

    /// Checks credentials
    ///
    /// An unknown email and a wrong password fail identically.
    pub async fn authenticate(&self, input: &LoginRequest) -> Result<User> {
        let login = validate_login(input)?;

        let Some(user) = self.store.find_user_by_email(&login.email).await? else {
            log_auth_event!("login_failed", login.email);
            return Err(ShiftSyncError::Authentication(INVALID_CREDENTIALS.to_string()));
        };

        if !verify_password_async(login.password, user.password_hash.clone()).await? {
            log_auth_event!("login_failed", login.email);
            return Err(ShiftSyncError::Authentication(INVALID_CREDENTIALS.to_string()));
        }

        log_auth_event!("login", user.email);
        Ok(user)
    }

    pub async fn get_user(&self, id: UserId) -> Result<UserProfile> {
        self.store
            .get_user(id)
            .await?
            .map(|user| user.profile())
            .ok_or_else(|| ShiftSyncError::not_found("User", id))
    }

    /// Admits a patient to the roster
    pub async fn create_patient(&self, input: &NewPatient) -> Result<Patient> {
        let valid = validate_new_patient(input)?;
        let now = Utc::now();
        let patient = Patient {
            id: PatientId::new(),
            mrn: valid.mrn,
            first_name: valid.first_name,
            last_name: valid.last_name,
            date_of_birth: valid.date_of_birth,
            room_number: valid.room_number,
            admitting_diagnosis: valid.admitting_diagnosis,
            code_status: valid.code_status,
            allergies: valid.allergies,
            attending_physician: valid.attending_physician,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        self.store.insert_patient(&patient).await?;
        log_record_created!("patient", patient.id);
        Ok(patient)
    }

    pub async fn get_patient(&self, id: &str) -> Result<Patient> {
        let patient_id: PatientId = resolve_id("Patient", id)?;
        self.store
            .get_patient(patient_id)
            .await?
            .ok_or_else(|| ShiftSyncError::not_found("Patient", id))
    }

    /// Applies a patch to the mutable patient fields
    pub async fn update_patient(&self, id: &str, patch: &PatientPatch) -> Result<Patient> {
        let mut patient = self.get_patient(id).await?;
        let patch = validate_patient_patch(patch)?;

        patient.apply(patch, Utc::now());
        if !self.store.update_patient(&patient).await? {
            return Err(ShiftSyncError::not_found("Patient", id));
        }

        log_record_updated!("patient", patient.id, "updated");
        Ok(patient)
    }

    /// Soft-deletes a patient; repeating it is a no-op
    pub async fn deactivate_patient(&self, id: &str) -> Result<Patient> {
        let mut patient = self.get_patient(id).await?;
        if !patient.is_active {
            return Ok(patient);
        }

        patient.is_active = false;
        patient.updated_at = Utc::now();
        if !self.store.update_patient(&patient).await? {
            return Err(ShiftSyncError::not_found("Patient", id));
        }

        log_record_updated!("patient", patient.id, "deactivated");
        Ok(patient)
    }

    /// Active patients by room, then last name
    pub async fn list_active_patients(&self) -> Result<Vec<Patient>> {
        self.store.list_active_patients().await
    }

    /// Records an SBAR handoff for an existing patient
    ///
    /// # Errors
    ///
    /// Validation errors for a bad shift or blank SBAR text; NotFound when the
    /// patient does not exist
    pub async fn create_handoff(
        &self,
        input: &NewHandoff,
        created_by: Option<UserId>,
    ) -> Result<HandoffView> {
        let valid = validate_new_handoff(input)?;
        let patient = self.get_patient(&valid.patient).await?;

        let now = Utc::now();
        let handoff = Handoff {
            id: HandoffId::new(),
            patient: patient.id,
            created_by,
            shift: valid.shift,
            date: now,
            situation: valid.situation,
            background: valid.background,
            assessment: valid.assessment,
            recommendation: valid.recommendation,
            vitals: valid.vitals,
            medications_due: valid.medications_due,
            pending_tasks: valid.pending_tasks,
            urgent_flags: valid.urgent_flags,
            family_concerns: valid.family_concerns,
            created_at: now,
            updated_at: now,
        };

        self.store.insert_handoff(&handoff).await?;
        log_record_created!("handoff", handoff.id);
        Ok(HandoffView::new(handoff, Some(PatientSummary::brief(&patient))))
    }

    /// Every handoff, newest first
    pub async fn list_handoffs(&self) -> Result<Vec<HandoffView>> {
        let handoffs = self.store.list_handoffs(None).await?;
        self.attach_summaries(handoffs).await
    }

    /// Handoffs for one patient, newest first; an unknown id gives an empty list
    pub async fn list_handoffs_for_patient(&self, id: &str) -> Result<Vec<HandoffView>> {
        let Ok(patient_id) = id.parse::<PatientId>() else {
            return Ok(Vec::new());
        };
        let handoffs = self.store.list_handoffs(Some(patient_id)).await?;
        self.attach_summaries(handoffs).await
    }

    /// One handoff with the detailed patient summary
    pub async fn get_handoff(&self, id: &str) -> Result<HandoffView> {
        let handoff_id: HandoffId = resolve_id("Handoff", id)?;
        let handoff = self
            .store
            .get_handoff(handoff_id)
            .await?
            .ok_or_else(|| ShiftSyncError::not_found("Handoff", id))?;

        let patient = self.store.get_patient(handoff.patient).await?;
        Ok(HandoffView::new(
            handoff,
            patient.as_ref().map(PatientSummary::detailed),
        ))
    }

    async fn attach_summaries(&self, handoffs: Vec<Handoff>) -> Result<Vec<HandoffView>> {
        let mut ids: Vec<PatientId> = handoffs.iter().map(|h| h.patient).collect();
        ids.sort();
        ids.dedup();

        let summaries: HashMap<PatientId, PatientSummary> = self
            .store
            .get_patients(&ids)
            .await?
            .iter()
            .map(|p| (p.id, PatientSummary::brief(p)))
            .collect();

        Ok(handoffs
            .into_iter()
            .map(|h| {
                let summary = summaries.get(&h.patient).cloned();
                HandoffView::new(h, summary)
            })
            .collect())
    }
}
