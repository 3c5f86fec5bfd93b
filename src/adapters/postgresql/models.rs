//! Row conversions for the PostgreSQL tables
//!
//! Enums are stored as their wire strings, handoff sub-lists as JSONB.

use crate::domain::{
    Handoff, MedicationDue, Patient, PendingTask, Result, ShiftSyncError, User, Vitals,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::str::FromStr;
use tokio_postgres::types::FromSql;
use tokio_postgres::Row;
use uuid::Uuid;

pub const USER_COLUMNS: &str =
    "id, name, email, password_hash, role, department, created_at, updated_at";

pub const PATIENT_COLUMNS: &str = "id, mrn, first_name, last_name, date_of_birth, room_number, \
     admitting_diagnosis, code_status, allergies, attending_physician, is_active, \
     created_at, updated_at";

pub const HANDOFF_COLUMNS: &str = "id, patient_id, created_by, shift, date, situation, background, \
     assessment, recommendation, vitals, medications_due, pending_tasks, urgent_flags, \
     family_concerns, created_at, updated_at";

fn column<'a, T: FromSql<'a>>(row: &'a Row, name: &str) -> Result<T> {
    row.try_get(name)
        .map_err(|e| ShiftSyncError::Database(format!("Failed to read column {name}: {e}")))
}

fn enum_column<T>(row: &Row, name: &str) -> Result<T>
where
    T: FromStr<Err = String>,
{
    let raw: String = column(row, name)?;
    raw.parse()
        .map_err(|e| ShiftSyncError::Database(format!("Bad value in column {name}: {e}")))
}

fn json_column<T: DeserializeOwned>(row: &Row, name: &str) -> Result<T> {
    let raw: Value = column(row, name)?;
    serde_json::from_value(raw)
        .map_err(|e| ShiftSyncError::Database(format!("Bad JSON in column {name}: {e}")))
}

/// Serializes a handoff sub-document for a JSONB parameter
pub fn to_json<T: serde::Serialize>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

pub fn user_from_row(row: &Row) -> Result<User> {
    Ok(User {
        id: column::<Uuid>(row, "id")?.into(),
        name: column(row, "name")?,
        email: column(row, "email")?,
        password_hash: column(row, "password_hash")?,
        role: enum_column(row, "role")?,
        department: column(row, "department")?,
        created_at: column(row, "created_at")?,
        updated_at: column(row, "updated_at")?,
    })
}

pub fn patient_from_row(row: &Row) -> Result<Patient> {
    Ok(Patient {
        id: column::<Uuid>(row, "id")?.into(),
        mrn: column(row, "mrn")?,
        first_name: column(row, "first_name")?,
        last_name: column(row, "last_name")?,
        date_of_birth: column(row, "date_of_birth")?,
        room_number: column(row, "room_number")?,
        admitting_diagnosis: column(row, "admitting_diagnosis")?,
        code_status: enum_column(row, "code_status")?,
        allergies: column(row, "allergies")?,
        attending_physician: column(row, "attending_physician")?,
        is_active: column(row, "is_active")?,
        created_at: column(row, "created_at")?,
        updated_at: column(row, "updated_at")?,
    })
}

pub fn handoff_from_row(row: &Row) -> Result<Handoff> {
    let vitals: Option<Value> = column(row, "vitals")?;
    let vitals = vitals
        .map(serde_json::from_value::<Vitals>)
        .transpose()
        .map_err(|e| ShiftSyncError::Database(format!("Bad JSON in column vitals: {e}")))?;
    let medications_due: Vec<MedicationDue> = json_column(row, "medications_due")?;
    let pending_tasks: Vec<PendingTask> = json_column(row, "pending_tasks")?;

    Ok(Handoff {
        id: column::<Uuid>(row, "id")?.into(),
        patient: column::<Uuid>(row, "patient_id")?.into(),
        created_by: column::<Option<Uuid>>(row, "created_by")?.map(Into::into),
        shift: enum_column(row, "shift")?,
        date: column(row, "date")?,
        situation: column(row, "situation")?,
        background: column(row, "background")?,
        assessment: column(row, "assessment")?,
        recommendation: column(row, "recommendation")?,
        vitals,
        medications_due,
        pending_tasks,
        urgent_flags: column(row, "urgent_flags")?,
        family_concerns: column(row, "family_concerns")?,
        created_at: column(row, "created_at")?,
        updated_at: column(row, "updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TaskPriority;

    #[test]
    fn test_sublists_serialize_for_jsonb() {
        let tasks = vec![PendingTask {
            task: "Recheck K+".to_string(),
            priority: TaskPriority::High,
        }];
        let json = to_json(&tasks).unwrap();
        assert_eq!(json, serde_json::json!([{"task": "Recheck K+", "priority": "high"}]));

        let back: Vec<PendingTask> = serde_json::from_value(json).unwrap();
        assert_eq!(back, tasks);
    }

    #[test]
    fn test_column_lists_match_schema() {
        for column in ["created_by", "urgent_flags", "family_concerns"] {
            assert!(HANDOFF_COLUMNS.contains(column));
        }
        assert!(PATIENT_COLUMNS.contains("is_active"));
        assert!(!USER_COLUMNS.contains("password,"));
    }
}
