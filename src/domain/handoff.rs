//! SBAR shift handoff model
//!
//! A handoff is one nurse's end-of-shift report for one patient, structured as
//! Situation / Background / Assessment / Recommendation plus optional vitals,
//! medications due, pending tasks and flags. Handoffs are write-once.

use super::errors::ValidationErrors;
use super::ids::{HandoffId, PatientId, UserId};
use super::patient::{PatientSummary, TextList};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Nursing shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    #[default]
    Day,
    Night,
}

impl Shift {
    pub const VALUES: [&'static str; 2] = ["day", "night"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Shift::Day => "day",
            Shift::Night => "night",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "day" => Ok(Shift::Day),
            "night" => Ok(Shift::Night),
            other => Err(format!(
                "shift must be one of: {} (got '{other}')",
                Shift::VALUES.join(", ")
            )),
        }
    }
}

/// Priority of a pending task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const VALUES: [&'static str; 4] = ["low", "medium", "high", "urgent"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            "urgent" => Ok(TaskPriority::Urgent),
            other => Err(format!(
                "priority must be one of: {} (got '{other}')",
                TaskPriority::VALUES.join(", ")
            )),
        }
    }
}

/// Vital signs captured at handoff; every reading is optional
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vitals {
    /// Systolic, mmHg
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<f64>,
    /// bpm
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    /// °F
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// SpO2 %
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<f64>,
    /// breaths/min
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respiratory_rate: Option<f64>,
}

impl Vitals {
    /// True when no reading was recorded
    pub fn is_empty(&self) -> bool {
        self.blood_pressure.is_none()
            && self.heart_rate.is_none()
            && self.temperature.is_none()
            && self.oxygen_saturation.is_none()
            && self.respiratory_rate.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationDue {
    pub medication: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub route: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTask {
    pub task: String,
    #[serde(default)]
    pub priority: TaskPriority,
}

/// Stored handoff record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Handoff {
    pub id: HandoffId,
    pub patient: PatientId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
    pub shift: Shift,
    pub date: DateTime<Utc>,
    pub situation: String,
    pub background: String,
    pub assessment: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitals: Option<Vitals>,
    #[serde(default)]
    pub medications_due: Vec<MedicationDue>,
    #[serde(default)]
    pub pending_tasks: Vec<PendingTask>,
    #[serde(default)]
    pub urgent_flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_concerns: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Handoff with the patient reference replaced by a patient summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoffView {
    pub id: HandoffId,
    /// `None` only if the referenced patient could not be loaded
    pub patient: Option<PatientSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
    pub shift: Shift,
    pub date: DateTime<Utc>,
    pub situation: String,
    pub background: String,
    pub assessment: String,
    pub recommendation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitals: Option<Vitals>,
    #[serde(default)]
    pub medications_due: Vec<MedicationDue>,
    #[serde(default)]
    pub pending_tasks: Vec<PendingTask>,
    #[serde(default)]
    pub urgent_flags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_concerns: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl HandoffView {
    /// Joins a handoff with its patient summary
    pub fn new(handoff: Handoff, patient: Option<PatientSummary>) -> Self {
        Self {
            id: handoff.id,
            patient,
            created_by: handoff.created_by,
            shift: handoff.shift,
            date: handoff.date,
            situation: handoff.situation,
            background: handoff.background,
            assessment: handoff.assessment,
            recommendation: handoff.recommendation,
            vitals: handoff.vitals,
            medications_due: handoff.medications_due,
            pending_tasks: handoff.pending_tasks,
            urgent_flags: handoff.urgent_flags,
            family_concerns: handoff.family_concerns,
            created_at: handoff.created_at,
            updated_at: handoff.updated_at,
        }
    }
}

/// A numeric reading as submitted: a JSON number, or a string from a form input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberInput {
    Number(f64),
    Text(String),
}

impl NumberInput {
    /// Parsed value; blank text yields `Ok(None)`, anything else non-numeric is an error
    pub fn value(&self) -> Result<Option<f64>, String> {
        let n = match self {
            NumberInput::Number(n) => *n,
            NumberInput::Text(text) if text.trim().is_empty() => return Ok(None),
            NumberInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("'{}' is not a number", text.trim()))?,
        };
        if n.is_finite() {
            Ok(Some(n))
        } else {
            Err("must be a finite number".to_string())
        }
    }
}

impl From<f64> for NumberInput {
    fn from(n: f64) -> Self {
        NumberInput::Number(n)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VitalsInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blood_pressure: Option<NumberInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<NumberInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<NumberInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_saturation: Option<NumberInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub respiratory_rate: Option<NumberInput>,
}

impl VitalsInput {
    /// Parsed readings, or `None` when nothing was entered
    ///
    /// Unreadable entries are reported as `vitals.<field>` errors.
    pub fn parse(&self) -> Result<Option<Vitals>, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let mut read = |field: &str, input: &Option<NumberInput>| {
            match input.as_ref().map(NumberInput::value).transpose() {
                Ok(value) => value.flatten(),
                Err(message) => {
                    errors.add(format!("vitals.{field}"), message);
                    None
                }
            }
        };
        let vitals = Vitals {
            blood_pressure: read("bloodPressure", &self.blood_pressure),
            heart_rate: read("heartRate", &self.heart_rate),
            temperature: read("temperature", &self.temperature),
            oxygen_saturation: read("oxygenSaturation", &self.oxygen_saturation),
            respiratory_rate: read("respiratoryRate", &self.respiratory_rate),
        };
        errors.into_result((!vitals.is_empty()).then_some(vitals))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicationInput {
    #[serde(default)]
    pub medication: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub route: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskInput {
    #[serde(default)]
    pub task: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

/// Handoff submission payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewHandoff {
    /// Patient id
    #[serde(default)]
    pub patient: Option<String>,
    #[serde(default)]
    pub shift: Option<String>,
    #[serde(default)]
    pub situation: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub assessment: Option<String>,
    #[serde(default)]
    pub recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitals: Option<VitalsInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications_due: Option<Vec<MedicationInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_tasks: Option<Vec<TaskInput>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgent_flags: Option<TextList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_concerns: Option<String>,
}
