//! Ward patient model

use super::ids::PatientId;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resuscitation code status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CodeStatus {
    #[default]
    #[serde(rename = "Full Code")]
    FullCode,
    #[serde(rename = "DNR")]
    Dnr,
    #[serde(rename = "DNI")]
    Dni,
    /// Allow Natural Death
    #[serde(rename = "AND")]
    And,
}

impl CodeStatus {
    /// Every accepted code status, in wire form
    pub const VALUES: [&'static str; 4] = ["Full Code", "DNR", "DNI", "AND"];

    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeStatus::FullCode => "Full Code",
            CodeStatus::Dnr => "DNR",
            CodeStatus::Dni => "DNI",
            CodeStatus::And => "AND",
        }
    }
}

impl fmt::Display for CodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CodeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Full Code" => Ok(CodeStatus::FullCode),
            "DNR" => Ok(CodeStatus::Dnr),
            "DNI" => Ok(CodeStatus::Dni),
            "AND" => Ok(CodeStatus::And),
            other => Err(format!(
                "codeStatus must be one of: {} (got '{other}')",
                CodeStatus::VALUES.join(", ")
            )),
        }
    }
}

/// Stored patient record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: PatientId,
    pub mrn: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub room_number: String,
    pub admitting_diagnosis: String,
    pub code_status: CodeStatus,
    pub allergies: Vec<String>,
    pub attending_physician: String,
    /// Soft-delete flag; inactive patients drop off the roster but keep their history
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    /// Applies a validated patch, touching only the mutable fields
    pub fn apply(&mut self, patch: ValidPatientPatch, now: DateTime<Utc>) {
        if let Some(room_number) = patch.room_number {
            self.room_number = room_number;
        }
        if let Some(admitting_diagnosis) = patch.admitting_diagnosis {
            self.admitting_diagnosis = admitting_diagnosis;
        }
        if let Some(code_status) = patch.code_status {
            self.code_status = code_status;
        }
        if let Some(allergies) = patch.allergies {
            self.allergies = allergies;
        }
        if let Some(attending_physician) = patch.attending_physician {
            self.attending_physician = attending_physician;
        }
        self.updated_at = now;
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A list field that may arrive either as a JSON array or as comma-separated text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextList {
    List(Vec<String>),
    Text(String),
}

impl TextList {
    /// Trimmed entries with blanks removed
    pub fn normalize(&self) -> Vec<String> {
        match self {
            TextList::List(items) => items
                .iter()
                .map(|item| item.trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
            TextList::Text(text) => split_comma_list(text),
        }
    }
}

impl From<Vec<String>> for TextList {
    fn from(items: Vec<String>) -> Self {
        TextList::List(items)
    }
}

/// Splits "Penicillin, Latex, Sulfa" into trimmed, non-empty entries
pub fn split_comma_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Intake payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    #[serde(default)]
    pub mrn: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub admitting_diagnosis: Option<String>,
    #[serde(default)]
    pub code_status: Option<String>,
    #[serde(default)]
    pub allergies: Option<TextList>,
    #[serde(default)]
    pub attending_physician: Option<String>,
}

/// Partial update of a patient
///
/// Only the fields that may change after admission are accepted; demographics
/// (mrn, names, date of birth) are immutable and any other key is rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatientPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admitting_diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<TextList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attending_physician: Option<String>,
}

/// Patch after validation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidPatientPatch {
    pub room_number: Option<String>,
    pub admitting_diagnosis: Option<String>,
    pub code_status: Option<CodeStatus>,
    pub allergies: Option<Vec<String>>,
    pub attending_physician: Option<String>,
}

/// Patient fields joined into handoff responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientSummary {
    pub id: PatientId,
    pub first_name: String,
    pub last_name: String,
    pub mrn: String,
    pub room_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_status: Option<CodeStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allergies: Option<Vec<String>>,
}

impl PatientSummary {
    /// Name, MRN and room, as shown in handoff lists
    pub fn brief(patient: &Patient) -> Self {
        Self {
            id: patient.id,
            first_name: patient.first_name.clone(),
            last_name: patient.last_name.clone(),
            mrn: patient.mrn.clone(),
            room_number: patient.room_number.clone(),
            code_status: None,
            allergies: None,
        }
    }

    /// Brief summary plus code status and allergies, for the single-handoff view
    pub fn detailed(patient: &Patient) -> Self {
        Self {
            code_status: Some(patient.code_status),
            allergies: Some(patient.allergies.clone()),
            ..Self::brief(patient)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_status_wire_values() {
        for value in CodeStatus::VALUES {
            let status: CodeStatus = value.parse().unwrap();
            assert_eq!(status.as_str(), value);
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{value}\""));
        }
        assert!("Full".parse::<CodeStatus>().is_err());
    }

    #[test]
    fn test_split_comma_list() {
        assert_eq!(
            split_comma_list("Penicillin, Latex, Sulfa"),
            vec!["Penicillin", "Latex", "Sulfa"]
        );
        assert_eq!(split_comma_list(" , ,"), Vec::<String>::new());
        assert_eq!(split_comma_list(""), Vec::<String>::new());
    }

    #[test]
    fn test_text_list_accepts_array_or_string() {
        let list: TextList = serde_json::from_str(r#"[" Latex ", ""]"#).unwrap();
        assert_eq!(list.normalize(), vec!["Latex"]);

        let text: TextList = serde_json::from_str(r#""Latex,Sulfa""#).unwrap();
        assert_eq!(text.normalize(), vec!["Latex", "Sulfa"]);
    }

    #[test]
    fn test_patch_rejects_demographic_fields() {
        let result = serde_json::from_str::<PatientPatch>(r#"{"mrn": "X-1"}"#);
        assert!(result.is_err());

        let patch: PatientPatch = serde_json::from_str(r#"{"roomNumber": "12B"}"#).unwrap();
        assert_eq!(patch.room_number.as_deref(), Some("12B"));
    }
}
