use crate::api::error::ApiResult;
use crate::api::extract::OptionalAuth;
use crate::api::responses::{PatientListResponse, PatientResponse};
use crate::api::state::AppState;
use crate::domain::{NewPatient, PatientPatch};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn list(
    State(state): State<AppState>,
    _auth: OptionalAuth,
) -> ApiResult<Json<PatientListResponse>> {
    let patients = state.records.list_active_patients().await?;
    Ok(Json(PatientListResponse {
        message: "Patients retrieved successfully".to_string(),
        count: patients.len(),
        patients,
    }))
}

pub async fn create(
    State(state): State<AppState>,
    _auth: OptionalAuth,
    payload: Result<Json<NewPatient>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PatientResponse>)> {
    let Json(input) = payload?;
    let patient = state.records.create_patient(&input).await?;
    Ok((
        StatusCode::CREATED,
        Json(PatientResponse {
            message: "Patient created successfully".to_string(),
            patient,
        }),
    ))
}

pub async fn get(
    State(state): State<AppState>,
    _auth: OptionalAuth,
    Path(id): Path<String>,
) -> ApiResult<Json<PatientResponse>> {
    let patient = state.records.get_patient(&id).await?;
    Ok(Json(PatientResponse {
        message: "Patient retrieved successfully".to_string(),
        patient,
    }))
}

pub async fn update(
    State(state): State<AppState>,
    _auth: OptionalAuth,
    Path(id): Path<String>,
    payload: Result<Json<PatientPatch>, JsonRejection>,
) -> ApiResult<Json<PatientResponse>> {
    // An unknown id answers 404 whatever the body holds
    state.records.get_patient(&id).await?;
    let Json(patch) = payload?;
    let patient = state.records.update_patient(&id, &patch).await?;
    Ok(Json(PatientResponse {
        message: "Patient updated successfully".to_string(),
        patient,
    }))
}

pub async fn deactivate(
    State(state): State<AppState>,
    _auth: OptionalAuth,
    Path(id): Path<String>,
) -> ApiResult<Json<PatientResponse>> {
    let patient = state.records.deactivate_patient(&id).await?;
    Ok(Json(PatientResponse {
        message: "Patient deactivated successfully".to_string(),
        patient,
    }))
}
