//! PostgreSQL adapter implementing [`RecordStore`]

use crate::adapters::database::traits::RecordStore;
use crate::adapters::postgresql::client::PostgreSQLClient;
use crate::adapters::postgresql::models::{
    handoff_from_row, patient_from_row, to_json, user_from_row, HANDOFF_COLUMNS, PATIENT_COLUMNS,
    USER_COLUMNS,
};
use crate::domain::context::ResultExt;
use crate::domain::{Handoff, HandoffId, Patient, PatientId, Result, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// PostgreSQL implementation of [`RecordStore`]
pub struct PostgreSQLAdapter {
    client: Arc<PostgreSQLClient>,
}

impl PostgreSQLAdapter {
    pub fn new(client: PostgreSQLClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Get a reference to the underlying client
    pub fn client(&self) -> &Arc<PostgreSQLClient> {
        &self.client
    }
}

#[async_trait]
impl RecordStore for PostgreSQLAdapter {
    fn backend_name(&self) -> &'static str {
        "postgresql"
    }

    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn ensure_schema(&self) -> Result<()> {
        self.client.ensure_schema().await
    }

    async fn insert_user(&self, user: &User) -> Result<()> {
        let statement = format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)"
        );
        self.client
            .execute(
                &statement,
                &[
                    user.id.as_uuid(),
                    &user.name,
                    &user.email,
                    &user.password_hash,
                    &user.role.as_str(),
                    &user.department,
                    &user.created_at,
                    &user.updated_at,
                ],
            )
            .await
            .context("Failed to insert user")?;
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        self.client
            .query_opt(&query, &[&email])
            .await
            .context("Failed to look up user")?
            .as_ref()
            .map(user_from_row)
            .transpose()
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        self.client
            .query_opt(&query, &[id.as_uuid()])
            .await
            .context("Failed to load user")?
            .as_ref()
            .map(user_from_row)
            .transpose()
    }

    async fn insert_patient(&self, patient: &Patient) -> Result<()> {
        let statement = format!(
            "INSERT INTO patients ({PATIENT_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)"
        );
        self.client
            .execute(
                &statement,
                &[
                    patient.id.as_uuid(),
                    &patient.mrn,
                    &patient.first_name,
                    &patient.last_name,
                    &patient.date_of_birth,
                    &patient.room_number,
                    &patient.admitting_diagnosis,
                    &patient.code_status.as_str(),
                    &patient.allergies,
                    &patient.attending_physician,
                    &patient.is_active,
                    &patient.created_at,
                    &patient.updated_at,
                ],
            )
            .await
            .context("Failed to insert patient")?;
        Ok(())
    }

    async fn get_patient(&self, id: PatientId) -> Result<Option<Patient>> {
        let query = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = $1");
        self.client
            .query_opt(&query, &[id.as_uuid()])
            .await
            .context("Failed to load patient")?
            .as_ref()
            .map(patient_from_row)
            .transpose()
    }

    async fn get_patients(&self, ids: &[PatientId]) -> Result<Vec<Patient>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();
        let query = format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ANY($1)");
        self.client
            .query(&query, &[&ids])
            .await
            .context("Failed to load patients")?
            .iter()
            .map(patient_from_row)
            .collect()
    }

    async fn update_patient(&self, patient: &Patient) -> Result<bool> {
        let updated = self
            .client
            .execute(
                "UPDATE patients SET room_number = $2, admitting_diagnosis = $3, \
                 code_status = $4, allergies = $5, attending_physician = $6, \
                 is_active = $7, updated_at = $8 WHERE id = $1",
                &[
                    patient.id.as_uuid(),
                    &patient.room_number,
                    &patient.admitting_diagnosis,
                    &patient.code_status.as_str(),
                    &patient.allergies,
                    &patient.attending_physician,
                    &patient.is_active,
                    &patient.updated_at,
                ],
            )
            .await
            .context("Failed to update patient")?;
        Ok(updated > 0)
    }

    async fn list_active_patients(&self) -> Result<Vec<Patient>> {
        let query = format!(
            "SELECT {PATIENT_COLUMNS} FROM patients WHERE is_active \
             ORDER BY room_number ASC, last_name ASC"
        );
        self.client
            .query(&query, &[])
            .await
            .context("Failed to list patients")?
            .iter()
            .map(patient_from_row)
            .collect()
    }

    async fn insert_handoff(&self, handoff: &Handoff) -> Result<()> {
        let statement = format!(
            "INSERT INTO handoffs ({HANDOFF_COLUMNS}) VALUES \
             ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)"
        );
        let vitals = handoff.vitals.as_ref().map(to_json).transpose()?;
        let medications_due = to_json(&handoff.medications_due)?;
        let pending_tasks = to_json(&handoff.pending_tasks)?;
        let created_by = handoff.created_by.map(|id| *id.as_uuid());

        self.client
            .execute(
                &statement,
                &[
                    handoff.id.as_uuid(),
                    handoff.patient.as_uuid(),
                    &created_by,
                    &handoff.shift.as_str(),
                    &handoff.date,
                    &handoff.situation,
                    &handoff.background,
                    &handoff.assessment,
                    &handoff.recommendation,
                    &vitals,
                    &medications_due,
                    &pending_tasks,
                    &handoff.urgent_flags,
                    &handoff.family_concerns,
                    &handoff.created_at,
                    &handoff.updated_at,
                ],
            )
            .await
            .context("Failed to insert handoff")?;
        Ok(())
    }

    async fn get_handoff(&self, id: HandoffId) -> Result<Option<Handoff>> {
        let query = format!("SELECT {HANDOFF_COLUMNS} FROM handoffs WHERE id = $1");
        self.client
            .query_opt(&query, &[id.as_uuid()])
            .await
            .context("Failed to load handoff")?
            .as_ref()
            .map(handoff_from_row)
            .transpose()
    }

    async fn list_handoffs(&self, patient: Option<PatientId>) -> Result<Vec<Handoff>> {
        let rows = match patient {
            Some(id) => {
                let query = format!(
                    "SELECT {HANDOFF_COLUMNS} FROM handoffs WHERE patient_id = $1 \
                     ORDER BY created_at DESC, seq DESC"
                );
                self.client.query(&query, &[id.as_uuid()]).await
            }
            None => {
                let query = format!(
                    "SELECT {HANDOFF_COLUMNS} FROM handoffs ORDER BY created_at DESC, seq DESC"
                );
                self.client.query(&query, &[]).await
            }
        }
        .context("Failed to list handoffs")?;

        rows.iter().map(handoff_from_row).collect()
    }
}
