//! Record validators
//!
//! One function per write operation. Each takes the raw payload, checks every rule,
//! and returns either a normalized value ready to be stored or the full list of
//! field failures. Validators never touch storage, so the server and the client form
//! controllers share them and always agree on what is acceptable.

use super::errors::ValidationErrors;
use super::handoff::{
    MedicationDue, NewHandoff, PendingTask, Shift, TaskPriority, Vitals, VitalsInput,
};
use super::patient::{CodeStatus, NewPatient, PatientPatch, ValidPatientPatch};
use super::user::{LoginRequest, RegisterUser, Role};
use crate::config::SecretString;
use chrono::{DateTime, NaiveDate};
use regex::Regex;
use secrecy::ExposeSecret;
use std::sync::OnceLock;

/// Minimum password length in characters
pub const MIN_PASSWORD_LENGTH: usize = 6;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap_or_else(|e| panic!("email regex: {e}"))
    })
}

/// Registration that passed validation
#[derive(Debug, Clone)]
pub struct ValidUser {
    pub name: String,
    pub email: String,
    pub password: SecretString,
    pub role: Role,
    pub department: String,
}

/// Login that passed validation
#[derive(Debug, Clone)]
pub struct ValidLogin {
    pub email: String,
    pub password: SecretString,
}

/// Patient intake that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ValidPatient {
    pub mrn: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub room_number: String,
    pub admitting_diagnosis: String,
    pub code_status: CodeStatus,
    pub allergies: Vec<String>,
    pub attending_physician: String,
}

/// Handoff submission that passed validation
///
/// The patient reference is still the raw string; resolving it is a storage
/// concern and happens in the record service.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidHandoff {
    pub patient: String,
    pub shift: Shift,
    pub situation: String,
    pub background: String,
    pub assessment: String,
    pub recommendation: String,
    pub vitals: Option<Vitals>,
    pub medications_due: Vec<MedicationDue>,
    pub pending_tasks: Vec<PendingTask>,
    pub urgent_flags: Vec<String>,
    pub family_concerns: Option<String>,
}

/// Trimmed, lowercased email
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trimmed value, or `None` if absent or blank
fn present(value: Option<&String>) -> Option<String> {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn require(errors: &mut ValidationErrors, field: &str, value: Option<&String>) -> String {
    match present(value) {
        Some(v) => v,
        None => {
            errors.required(field);
            String::new()
        }
    }
}

fn require_secret(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&SecretString>,
) -> Option<SecretString> {
    match value {
        Some(secret) if !secret.expose_secret().is_empty() => Some(secret.clone()),
        _ => {
            errors.required(field);
            None
        }
    }
}

fn check_email(errors: &mut ValidationErrors, raw: Option<&String>) -> String {
    let email = require(errors, "email", raw);
    if !email.is_empty() && !email_regex().is_match(&email) {
        errors.add("email", "email must be a valid email address");
    }
    normalize_email(&email)
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp (date part is kept)
pub fn parse_date_of_birth(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|ts| ts.date_naive())
        })
}

pub fn validate_new_user(input: &RegisterUser) -> Result<ValidUser, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let name = require(&mut errors, "name", input.name.as_ref());
    let email = check_email(&mut errors, input.email.as_ref());
    let password = require_secret(&mut errors, "password", input.password.as_ref());
    if let Some(password) = &password {
        if password.expose_secret().as_str().chars().count() < MIN_PASSWORD_LENGTH {
            errors.add(
                "password",
                format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
            );
        }
    }
    let department = require(&mut errors, "department", input.department.as_ref());

    let role = match present(input.role.as_ref()) {
        None => Role::default(),
        Some(raw) => raw.parse().unwrap_or_else(|msg: String| {
            errors.add("role", msg);
            Role::default()
        }),
    };

    match (errors.is_empty(), password) {
        (true, Some(password)) => Ok(ValidUser {
            name,
            email,
            password,
            role,
            department,
        }),
        _ => Err(errors),
    }
}

/// Only presence is checked; format problems surface as bad credentials
pub fn validate_login(input: &LoginRequest) -> Result<ValidLogin, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let email = require(&mut errors, "email", input.email.as_ref());
    let password = require_secret(&mut errors, "password", input.password.as_ref());

    match (errors.is_empty(), password) {
        (true, Some(password)) => Ok(ValidLogin {
            email: normalize_email(&email),
            password,
        }),
        _ => Err(errors),
    }
}

fn check_code_status(errors: &mut ValidationErrors, raw: &str) -> CodeStatus {
    raw.parse().unwrap_or_else(|msg: String| {
        errors.add("codeStatus", msg);
        CodeStatus::default()
    })
}

pub fn validate_new_patient(input: &NewPatient) -> Result<ValidPatient, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let mrn = require(&mut errors, "mrn", input.mrn.as_ref());
    let first_name = require(&mut errors, "firstName", input.first_name.as_ref());
    let last_name = require(&mut errors, "lastName", input.last_name.as_ref());

    let dob_raw = require(&mut errors, "dateOfBirth", input.date_of_birth.as_ref());
    let date_of_birth = if dob_raw.is_empty() {
        None
    } else {
        let parsed = parse_date_of_birth(&dob_raw);
        if parsed.is_none() {
            errors.add(
                "dateOfBirth",
                "dateOfBirth must be a date (YYYY-MM-DD or RFC 3339)",
            );
        }
        parsed
    };

    let room_number = require(&mut errors, "roomNumber", input.room_number.as_ref());
    let admitting_diagnosis = require(
        &mut errors,
        "admittingDiagnosis",
        input.admitting_diagnosis.as_ref(),
    );
    let code_status_raw = require(&mut errors, "codeStatus", input.code_status.as_ref());
    let code_status = if code_status_raw.is_empty() {
        CodeStatus::default()
    } else {
        check_code_status(&mut errors, &code_status_raw)
    };
    let attending_physician = require(
        &mut errors,
        "attendingPhysician",
        input.attending_physician.as_ref(),
    );
    let allergies = input
        .allergies
        .as_ref()
        .map(|list| list.normalize())
        .unwrap_or_default();

    match (errors.is_empty(), date_of_birth) {
        (true, Some(date_of_birth)) => Ok(ValidPatient {
            mrn,
            first_name,
            last_name,
            date_of_birth,
            room_number,
            admitting_diagnosis,
            code_status,
            allergies,
            attending_physician,
        }),
        _ => Err(errors),
    }
}

/// Fields that are present must still be non-blank and in-enum
pub fn validate_patient_patch(patch: &PatientPatch) -> Result<ValidPatientPatch, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let mut non_blank = |field: &str, value: Option<&String>| {
        value.map(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                errors.add(field, format!("{field} cannot be blank"));
            }
            trimmed.to_string()
        })
    };
    let room_number = non_blank("roomNumber", patch.room_number.as_ref());
    let admitting_diagnosis = non_blank("admittingDiagnosis", patch.admitting_diagnosis.as_ref());
    let attending_physician = non_blank("attendingPhysician", patch.attending_physician.as_ref());

    let code_status = patch
        .code_status
        .as_deref()
        .map(|raw| check_code_status(&mut errors, raw));
    let allergies = patch.allergies.as_ref().map(|list| list.normalize());

    errors.into_result(ValidPatientPatch {
        room_number,
        admitting_diagnosis,
        code_status,
        allergies,
        attending_physician,
    })
}

pub fn validate_new_handoff(input: &NewHandoff) -> Result<ValidHandoff, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let patient = require(&mut errors, "patient", input.patient.as_ref());

    let shift = match present(input.shift.as_ref()) {
        None => {
            errors.required("shift");
            Shift::default()
        }
        Some(raw) => raw.parse().unwrap_or_else(|msg: String| {
            errors.add("shift", msg);
            Shift::default()
        }),
    };

    let situation = require(&mut errors, "situation", input.situation.as_ref());
    let background = require(&mut errors, "background", input.background.as_ref());
    let assessment = require(&mut errors, "assessment", input.assessment.as_ref());
    let recommendation = require(&mut errors, "recommendation", input.recommendation.as_ref());

    let vitals = match input.vitals.as_ref().map(VitalsInput::parse).transpose() {
        Ok(vitals) => vitals.flatten(),
        Err(vitals_errors) => {
            errors.merge(vitals_errors);
            None
        }
    };

    let medications_due = input
        .medications_due
        .iter()
        .flatten()
        .filter_map(|row| {
            present(row.medication.as_ref()).map(|medication| MedicationDue {
                medication,
                time: present(row.time.as_ref()).unwrap_or_default(),
                route: present(row.route.as_ref()).unwrap_or_default(),
            })
        })
        .collect();

    let mut pending_tasks = Vec::new();
    for (index, row) in input.pending_tasks.iter().flatten().enumerate() {
        let Some(task) = present(row.task.as_ref()) else {
            continue;
        };
        let priority = match present(row.priority.as_ref()) {
            None => TaskPriority::default(),
            Some(raw) => raw.parse().unwrap_or_else(|msg: String| {
                errors.add(format!("pendingTasks[{index}].priority"), msg);
                TaskPriority::default()
            }),
        };
        pending_tasks.push(PendingTask { task, priority });
    }

    let urgent_flags = input
        .urgent_flags
        .as_ref()
        .map(|flags| flags.normalize())
        .unwrap_or_default();
    let family_concerns = present(input.family_concerns.as_ref());

    errors.into_result(ValidHandoff {
        patient,
        shift,
        situation,
        background,
        assessment,
        recommendation,
        vitals,
        medications_due,
        pending_tasks,
        urgent_flags,
        family_concerns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use crate::domain::handoff::{MedicationInput, NumberInput, TaskInput, VitalsInput};
    use crate::domain::patient::TextList;
    use test_case::test_case;

    fn s(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    fn complete_patient() -> NewPatient {
        NewPatient {
            mrn: s("MRN-1001"),
            first_name: s("Ada"),
            last_name: s("Lovelace"),
            date_of_birth: s("1950-12-10"),
            room_number: s("4B"),
            admitting_diagnosis: s("Pneumonia"),
            code_status: s("Full Code"),
            allergies: Some(TextList::Text("Penicillin, Latex, Sulfa".to_string())),
            attending_physician: s("Dr. Babbage"),
        }
    }

    fn complete_handoff() -> NewHandoff {
        NewHandoff {
            patient: s("d8f1c7c2-5c35-4cde-8f53-0e1b3f1f9a10"),
            shift: s("day"),
            situation: s("Stable overnight"),
            background: s("Admitted with CAP"),
            assessment: s("Improving"),
            recommendation: s("Continue antibiotics"),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_patient_normalizes_allergies() {
        let patient = validate_new_patient(&complete_patient()).unwrap();
        assert_eq!(patient.allergies, vec!["Penicillin", "Latex", "Sulfa"]);
        assert_eq!(patient.code_status, CodeStatus::FullCode);
        assert_eq!(
            patient.date_of_birth,
            NaiveDate::from_ymd_opt(1950, 12, 10).unwrap()
        );
    }

    #[test_case("mrn" ; "mrn")]
    #[test_case("firstName" ; "first name")]
    #[test_case("lastName" ; "last name")]
    #[test_case("dateOfBirth" ; "date of birth")]
    #[test_case("roomNumber" ; "room number")]
    #[test_case("admittingDiagnosis" ; "admitting diagnosis")]
    #[test_case("attendingPhysician" ; "attending physician")]
    fn test_patient_missing_required_field(field: &str) {
        let mut input = complete_patient();
        let slot = match field {
            "mrn" => &mut input.mrn,
            "firstName" => &mut input.first_name,
            "lastName" => &mut input.last_name,
            "dateOfBirth" => &mut input.date_of_birth,
            "roomNumber" => &mut input.room_number,
            "admittingDiagnosis" => &mut input.admitting_diagnosis,
            _ => &mut input.attending_physician,
        };
        *slot = s("   ");

        let errors = validate_new_patient(&input).unwrap_err();
        assert!(errors.has_field(field));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_patient_rejects_unknown_code_status() {
        let mut input = complete_patient();
        input.code_status = s("Comfort Care");
        let errors = validate_new_patient(&input).unwrap_err();
        assert!(errors.has_field("codeStatus"));
    }

    #[test]
    fn test_date_of_birth_formats() {
        let expected = NaiveDate::from_ymd_opt(1980, 3, 4);
        assert_eq!(parse_date_of_birth("1980-03-04"), expected);
        assert_eq!(parse_date_of_birth("1980-03-04T00:00:00.000Z"), expected);
        assert_eq!(parse_date_of_birth("03/04/1980"), None);
    }

    #[test]
    fn test_user_rules() {
        let input = RegisterUser {
            name: s("  Dana Reyes "),
            email: s(" Dana@Ward.Example "),
            password: Some(secret_string("secret1".to_string())),
            role: None,
            department: s("ICU"),
        };
        let user = validate_new_user(&input).unwrap();
        assert_eq!(user.name, "Dana Reyes");
        assert_eq!(user.email, "dana@ward.example");
        assert_eq!(user.role, Role::Nurse);

        let short = RegisterUser {
            password: Some(secret_string("12345".to_string())),
            ..input.clone()
        };
        assert!(validate_new_user(&short).unwrap_err().has_field("password"));

        let bad_email = RegisterUser {
            email: s("not-an-email"),
            ..input.clone()
        };
        assert!(validate_new_user(&bad_email).unwrap_err().has_field("email"));

        let bad_role = RegisterUser {
            role: s("surgeon"),
            ..input
        };
        assert!(validate_new_user(&bad_role).unwrap_err().has_field("role"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = validate_login(&LoginRequest::default()).unwrap_err();
        assert!(errors.has_field("email"));
        assert!(errors.has_field("password"));
    }

    #[test]
    fn test_patch_rules() {
        let patch = PatientPatch {
            room_number: s(" 12A "),
            allergies: Some(TextList::Text("Latex,".to_string())),
            ..Default::default()
        };
        let valid = validate_patient_patch(&patch).unwrap();
        assert_eq!(valid.room_number.as_deref(), Some("12A"));
        assert_eq!(valid.allergies, Some(vec!["Latex".to_string()]));
        assert_eq!(valid.code_status, None);

        let blank = PatientPatch {
            attending_physician: s(""),
            code_status: s("maybe"),
            ..Default::default()
        };
        let errors = validate_patient_patch(&blank).unwrap_err();
        assert!(errors.has_field("attendingPhysician"));
        assert!(errors.has_field("codeStatus"));
    }

    #[test_case("situation" ; "situation")]
    #[test_case("background" ; "background")]
    #[test_case("assessment" ; "assessment")]
    #[test_case("recommendation" ; "recommendation")]
    fn test_handoff_requires_sbar(field: &str) {
        let mut input = complete_handoff();
        match field {
            "situation" => input.situation = s(" "),
            "background" => input.background = None,
            "assessment" => input.assessment = s(""),
            _ => input.recommendation = None,
        }
        let errors = validate_new_handoff(&input).unwrap_err();
        assert!(errors.has_field(field));
    }

    #[test]
    fn test_handoff_rejects_unknown_shift() {
        let mut input = complete_handoff();
        input.shift = s("evening");
        assert!(validate_new_handoff(&input).unwrap_err().has_field("shift"));
    }

    #[test]
    fn test_handoff_rejects_unreadable_vitals() {
        let mut input = complete_handoff();
        input.vitals = Some(VitalsInput {
            blood_pressure: Some(NumberInput::Text("120/80".to_string())),
            heart_rate: Some(NumberInput::Text("88".to_string())),
            temperature: Some(NumberInput::Text("warm".to_string())),
            ..Default::default()
        });
        let errors = validate_new_handoff(&input).unwrap_err();
        assert!(errors.has_field("vitals.bloodPressure"));
        assert!(errors.has_field("vitals.temperature"));
        assert!(!errors.has_field("vitals.heartRate"));
    }

    #[test]
    fn test_handoff_drops_blank_rows_and_vitals() {
        let mut input = complete_handoff();
        input.vitals = Some(VitalsInput {
            blood_pressure: Some(NumberInput::Text("120".to_string())),
            heart_rate: Some(NumberInput::Text(String::new())),
            temperature: None,
            ..Default::default()
        });
        input.medications_due = Some(vec![
            MedicationInput {
                medication: s("Heparin"),
                time: s("0900"),
                route: s("SQ"),
            },
            MedicationInput::default(),
        ]);
        input.pending_tasks = Some(vec![
            TaskInput {
                task: s(""),
                priority: s("high"),
            },
            TaskInput {
                task: s("Recheck lactate"),
                priority: None,
            },
        ]);
        input.urgent_flags = Some(TextList::Text("Fall risk, , Isolation".to_string()));

        let handoff = validate_new_handoff(&input).unwrap();
        let vitals = handoff.vitals.unwrap();
        assert_eq!(vitals.blood_pressure, Some(120.0));
        assert_eq!(vitals.heart_rate, None);
        assert_eq!(vitals.temperature, None);
        assert_eq!(handoff.medications_due.len(), 1);
        assert_eq!(handoff.pending_tasks.len(), 1);
        assert_eq!(handoff.pending_tasks[0].priority, TaskPriority::Medium);
        assert_eq!(handoff.urgent_flags, vec!["Fall risk", "Isolation"]);
    }

    #[test]
    fn test_handoff_rejects_bad_priority_on_kept_row() {
        let mut input = complete_handoff();
        input.pending_tasks = Some(vec![TaskInput {
            task: s("Call family"),
            priority: s("asap"),
        }]);
        let errors = validate_new_handoff(&input).unwrap_err();
        assert!(errors.has_field("pendingTasks[0].priority"));
    }
}
