//! Record store abstraction
//!
//! Every backend stores the three record types and enforces the two uniqueness
//! rules (patient `mrn`, user `email`). A violation surfaces as
//! [`ShiftSyncError::Validation`](crate::domain::ShiftSyncError::Validation) built
//! with [`ValidationErrors::duplicate`](crate::domain::ValidationErrors::duplicate),
//! so callers see the same 400 whether the check raced or not.

use crate::domain::{Handoff, HandoffId, Patient, PatientId, Result, User, UserId};
use async_trait::async_trait;

/// Storage interface used by the record service
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short backend name for logs and the health endpoint
    fn backend_name(&self) -> &'static str;

    /// Test the store connection
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    async fn test_connection(&self) -> Result<()>;

    /// Create tables and indexes if they don't exist
    async fn ensure_schema(&self) -> Result<()>;

    /// Insert a new user; fails with a duplicate error if the email is taken
    async fn insert_user(&self, user: &User) -> Result<()>;

    /// Look up a user by normalized email
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Insert a new patient; fails with a duplicate error if the mrn is taken
    async fn insert_patient(&self, patient: &Patient) -> Result<()>;

    async fn get_patient(&self, id: PatientId) -> Result<Option<Patient>>;

    /// Fetch several patients at once; missing ids are skipped
    async fn get_patients(&self, ids: &[PatientId]) -> Result<Vec<Patient>>;

    /// Overwrite the mutable fields of an existing patient
    ///
    /// Returns `false` if no patient has this id.
    async fn update_patient(&self, patient: &Patient) -> Result<bool>;

    /// Active patients ordered by room number, then last name
    async fn list_active_patients(&self) -> Result<Vec<Patient>>;

    async fn insert_handoff(&self, handoff: &Handoff) -> Result<()>;

    async fn get_handoff(&self, id: HandoffId) -> Result<Option<Handoff>>;

    /// Handoffs newest first, optionally restricted to one patient
    ///
    /// Handoffs created within the same instant keep reverse insertion order.
    async fn list_handoffs(&self, patient: Option<PatientId>) -> Result<Vec<Handoff>>;
}
