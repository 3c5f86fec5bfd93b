//! SBAR handoff form

use super::{trimmed, Route, SubmitState};
use crate::client::error::{ClientError, ClientResult};
use crate::client::session::RequestContext;
use crate::client::ApiClient;
use crate::domain::patient::split_comma_list;
use crate::domain::validation::validate_new_handoff;
use crate::domain::{
    HandoffView, MedicationInput, NewHandoff, NumberInput, PatientId, Shift, TaskInput,
    TaskPriority, TextList, ValidationErrors, VitalsInput,
};

const INCOMPLETE_SBAR: &str =
    "Please complete all four SBAR fields (Situation, Background, Assessment, Recommendation).";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MedicationRow {
    pub medication: String,
    pub time: String,
    pub route: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskRow {
    pub task: String,
    pub priority: String,
}

impl Default for TaskRow {
    fn default() -> Self {
        Self {
            task: String::new(),
            priority: TaskPriority::default().as_str().to_string(),
        }
    }
}

/// Vitals as typed; blanks are left out of the payload
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VitalsFields {
    pub blood_pressure: String,
    pub heart_rate: String,
    pub temperature: String,
    pub oxygen_saturation: String,
    pub respiratory_rate: String,
}

impl VitalsFields {
    fn to_input(&self) -> Option<VitalsInput> {
        let reading = |value: &str| trimmed(value).map(NumberInput::Text);
        let input = VitalsInput {
            blood_pressure: reading(&self.blood_pressure),
            heart_rate: reading(&self.heart_rate),
            temperature: reading(&self.temperature),
            oxygen_saturation: reading(&self.oxygen_saturation),
            respiratory_rate: reading(&self.respiratory_rate),
        };
        (input != VitalsInput::default()).then_some(input)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HandoffFormStatus {
    Editing,
    Submitted(Box<HandoffView>),
}

/// Handoff editor for one patient
#[derive(Debug)]
pub struct HandoffForm {
    patient: PatientId,
    pub shift: String,
    pub situation: String,
    pub background: String,
    pub assessment: String,
    pub recommendation: String,
    pub vitals: VitalsFields,
    medications: Vec<MedicationRow>,
    tasks: Vec<TaskRow>,
    /// Comma-separated
    pub urgent_flags: String,
    pub family_concerns: String,
    status: HandoffFormStatus,
    error: Option<String>,
    submit: SubmitState,
}

impl HandoffForm {
    pub fn new(patient: PatientId) -> Self {
        Self {
            patient,
            shift: Shift::default().as_str().to_string(),
            situation: String::new(),
            background: String::new(),
            assessment: String::new(),
            recommendation: String::new(),
            vitals: VitalsFields::default(),
            medications: vec![MedicationRow::default()],
            tasks: vec![TaskRow::default()],
            urgent_flags: String::new(),
            family_concerns: String::new(),
            status: HandoffFormStatus::Editing,
            error: None,
            submit: SubmitState::default(),
        }
    }

    pub fn patient(&self) -> PatientId {
        self.patient
    }

    pub fn medications(&self) -> &[MedicationRow] {
        &self.medications
    }

    pub fn medication_mut(&mut self, index: usize) -> Option<&mut MedicationRow> {
        self.medications.get_mut(index)
    }

    pub fn add_medication(&mut self) {
        self.medications.push(MedicationRow::default());
    }

    /// Refuses to remove the last row
    pub fn remove_medication(&mut self, index: usize) -> bool {
        if self.medications.len() <= 1 || index >= self.medications.len() {
            return false;
        }
        self.medications.remove(index);
        true
    }

    pub fn tasks(&self) -> &[TaskRow] {
        &self.tasks
    }

    pub fn task_mut(&mut self, index: usize) -> Option<&mut TaskRow> {
        self.tasks.get_mut(index)
    }

    pub fn add_task(&mut self) {
        self.tasks.push(TaskRow::default());
    }

    /// Refuses to remove the last row
    pub fn remove_task(&mut self, index: usize) -> bool {
        if self.tasks.len() <= 1 || index >= self.tasks.len() {
            return false;
        }
        self.tasks.remove(index);
        true
    }

    pub fn status(&self) -> &HandoffFormStatus {
        &self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submit.is_submitting()
    }

    /// Where the user can go once the handoff is saved
    pub fn routes(&self) -> Vec<Route> {
        match self.status {
            HandoffFormStatus::Submitted(_) => {
                vec![Route::PatientDetail(self.patient), Route::PatientList]
            }
            HandoffFormStatus::Editing => Vec::new(),
        }
    }

    /// Payload with blank rows dropped and flags split
    pub fn to_new_handoff(&self) -> NewHandoff {
        let medications_due = self
            .medications
            .iter()
            .filter(|row| !row.medication.trim().is_empty())
            .map(|row| MedicationInput {
                medication: trimmed(&row.medication),
                time: trimmed(&row.time),
                route: trimmed(&row.route),
            })
            .collect();
        let pending_tasks = self
            .tasks
            .iter()
            .filter(|row| !row.task.trim().is_empty())
            .map(|row| TaskInput {
                task: trimmed(&row.task),
                priority: trimmed(&row.priority),
            })
            .collect();

        NewHandoff {
            patient: Some(self.patient.to_string()),
            shift: trimmed(&self.shift),
            situation: trimmed(&self.situation),
            background: trimmed(&self.background),
            assessment: trimmed(&self.assessment),
            recommendation: trimmed(&self.recommendation),
            vitals: self.vitals.to_input(),
            medications_due: Some(medications_due),
            pending_tasks: Some(pending_tasks),
            urgent_flags: Some(TextList::List(split_comma_list(&self.urgent_flags))),
            family_concerns: trimmed(&self.family_concerns),
        }
    }

    pub fn begin_submit(&mut self) -> ClientResult<NewHandoff> {
        if self.submit.is_submitting() {
            return Err(ClientError::AlreadySubmitting);
        }

        let sbar = [
            ("situation", &self.situation),
            ("background", &self.background),
            ("assessment", &self.assessment),
            ("recommendation", &self.recommendation),
        ];
        let mut missing = ValidationErrors::new();
        for (field, value) in sbar {
            if value.trim().is_empty() {
                missing.required(field);
            }
        }
        if !missing.is_empty() {
            self.error = Some(INCOMPLETE_SBAR.to_string());
            return Err(missing.into());
        }

        let payload = self.to_new_handoff();
        if let Err(errors) = validate_new_handoff(&payload) {
            self.error = Some(errors.to_string());
            return Err(errors.into());
        }

        self.submit.begin()?;
        self.error = None;
        Ok(payload)
    }

    pub fn finish_submit(&mut self, result: ClientResult<HandoffView>) -> ClientResult<()> {
        self.submit.finish();
        match result {
            Ok(handoff) => {
                self.status = HandoffFormStatus::Submitted(Box::new(handoff));
                Ok(())
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn submit(&mut self, api: &ApiClient, ctx: &RequestContext) -> ClientResult<()> {
        let payload = self.begin_submit()?;
        let result = api.create_handoff(ctx, &payload).await;
        self.finish_submit(result)
    }
}
