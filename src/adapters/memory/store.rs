//! In-memory record store

use crate::adapters::database::traits::RecordStore;
use crate::domain::{
    Handoff, HandoffId, Patient, PatientId, Result, User, UserId, ValidationErrors,
};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Default)]
struct Records {
    users: Vec<User>,
    patients: Vec<Patient>,
    /// Insertion order is kept; it breaks ties between equal timestamps
    handoffs: Vec<Handoff>,
}

/// Process-local [`RecordStore`]
///
/// All three collections sit behind one lock, so the uniqueness check and the
/// insert happen atomically.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn test_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_user(&self, user: &User) -> Result<()> {
        let mut records = self.records.write().await;
        if records.users.iter().any(|u| u.email == user.email) {
            return Err(ValidationErrors::duplicate("email", &user.email).into());
        }
        records.users.push(user.clone());
        Ok(())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let records = self.records.read().await;
        Ok(records.users.iter().find(|u| u.email == email).cloned())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let records = self.records.read().await;
        Ok(records.users.iter().find(|u| u.id == id).cloned())
    }

    async fn insert_patient(&self, patient: &Patient) -> Result<()> {
        let mut records = self.records.write().await;
        if records.patients.iter().any(|p| p.mrn == patient.mrn) {
            return Err(ValidationErrors::duplicate("mrn", &patient.mrn).into());
        }
        records.patients.push(patient.clone());
        Ok(())
    }

    async fn get_patient(&self, id: PatientId) -> Result<Option<Patient>> {
        let records = self.records.read().await;
        Ok(records.patients.iter().find(|p| p.id == id).cloned())
    }

    async fn get_patients(&self, ids: &[PatientId]) -> Result<Vec<Patient>> {
        let records = self.records.read().await;
        Ok(records
            .patients
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn update_patient(&self, patient: &Patient) -> Result<bool> {
        let mut records = self.records.write().await;
        match records.patients.iter_mut().find(|p| p.id == patient.id) {
            Some(existing) => {
                existing.room_number = patient.room_number.clone();
                existing.admitting_diagnosis = patient.admitting_diagnosis.clone();
                existing.code_status = patient.code_status;
                existing.allergies = patient.allergies.clone();
                existing.attending_physician = patient.attending_physician.clone();
                existing.is_active = patient.is_active;
                existing.updated_at = patient.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_active_patients(&self) -> Result<Vec<Patient>> {
        let records = self.records.read().await;
        let mut patients: Vec<Patient> = records
            .patients
            .iter()
            .filter(|p| p.is_active)
            .cloned()
            .collect();
        patients.sort_by(|a, b| {
            a.room_number
                .cmp(&b.room_number)
                .then_with(|| a.last_name.cmp(&b.last_name))
        });
        Ok(patients)
    }

    async fn insert_handoff(&self, handoff: &Handoff) -> Result<()> {
        self.records.write().await.handoffs.push(handoff.clone());
        Ok(())
    }

    async fn get_handoff(&self, id: HandoffId) -> Result<Option<Handoff>> {
        let records = self.records.read().await;
        Ok(records.handoffs.iter().find(|h| h.id == id).cloned())
    }

    async fn list_handoffs(&self, patient: Option<PatientId>) -> Result<Vec<Handoff>> {
        let records = self.records.read().await;
        let mut handoffs: Vec<Handoff> = records
            .handoffs
            .iter()
            .rev()
            .filter(|h| patient.is_none() || patient == Some(h.patient))
            .cloned()
            .collect();
        // Stable sort keeps reverse insertion order for equal timestamps
        handoffs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(handoffs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CodeStatus, Shift, ShiftSyncError};
    use chrono::{NaiveDate, Utc};

    fn patient(mrn: &str, room: &str, last_name: &str) -> Patient {
        let now = Utc::now();
        Patient {
            id: PatientId::new(),
            mrn: mrn.to_string(),
            first_name: "Test".to_string(),
            last_name: last_name.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            room_number: room.to_string(),
            admitting_diagnosis: "Observation".to_string(),
            code_status: CodeStatus::FullCode,
            allergies: Vec::new(),
            attending_physician: "Dr. Grey".to_string(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    fn handoff(patient: PatientId, situation: &str) -> Handoff {
        let now = Utc::now();
        Handoff {
            id: HandoffId::new(),
            patient,
            created_by: None,
            shift: Shift::Night,
            date: now,
            situation: situation.to_string(),
            background: "b".to_string(),
            assessment: "a".to_string(),
            recommendation: "r".to_string(),
            vitals: None,
            medications_due: Vec::new(),
            pending_tasks: Vec::new(),
            urgent_flags: Vec::new(),
            family_concerns: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_duplicate_mrn_is_rejected() {
        let store = MemoryStore::new();
        store.insert_patient(&patient("MRN-1", "1A", "A")).await.unwrap();

        let err = store
            .insert_patient(&patient("MRN-1", "2A", "B"))
            .await
            .unwrap_err();
        assert!(matches!(err, ShiftSyncError::Validation(_)));
        assert_eq!(store.list_active_patients().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_active_patients_sorted_by_room_then_name() {
        let store = MemoryStore::new();
        store.insert_patient(&patient("M1", "3B", "Young")).await.unwrap();
        store.insert_patient(&patient("M2", "1A", "Zane")).await.unwrap();
        store.insert_patient(&patient("M3", "1A", "Adams")).await.unwrap();

        let rooms: Vec<(String, String)> = store
            .list_active_patients()
            .await
            .unwrap()
            .into_iter()
            .map(|p| (p.room_number, p.last_name))
            .collect();
        assert_eq!(
            rooms,
            vec![
                ("1A".to_string(), "Adams".to_string()),
                ("1A".to_string(), "Zane".to_string()),
                ("3B".to_string(), "Young".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_missing_patient_returns_false() {
        let store = MemoryStore::new();
        assert!(!store.update_patient(&patient("M9", "9", "N")).await.unwrap());
    }

    #[tokio::test]
    async fn test_handoffs_newest_first_with_equal_timestamps() {
        let store = MemoryStore::new();
        let p = PatientId::new();
        let first = handoff(p, "first");
        let mut second = handoff(p, "second");
        second.created_at = first.created_at;
        store.insert_handoff(&first).await.unwrap();
        store.insert_handoff(&second).await.unwrap();
        store.insert_handoff(&handoff(PatientId::new(), "other")).await.unwrap();

        let listed = store.list_handoffs(Some(p)).await.unwrap();
        let order: Vec<&str> = listed.iter().map(|h| h.situation.as_str()).collect();
        assert_eq!(order, vec!["second", "first"]);
        assert_eq!(store.list_handoffs(None).await.unwrap().len(), 3);
    }
}
