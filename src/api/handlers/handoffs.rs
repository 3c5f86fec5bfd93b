use crate::api::error::ApiResult;
use crate::api::extract::OptionalAuth;
use crate::api::responses::{HandoffListResponse, HandoffResponse};
use crate::api::state::AppState;
use crate::domain::NewHandoff;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

/// The caller, when known, is recorded as the author
pub async fn create(
    State(state): State<AppState>,
    auth: OptionalAuth,
    payload: Result<Json<NewHandoff>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<HandoffResponse>)> {
    let Json(input) = payload?;
    let handoff = state.records.create_handoff(&input, auth.user_id()).await?;
    Ok((
        StatusCode::CREATED,
        Json(HandoffResponse {
            message: "Handoff created successfully".to_string(),
            handoff,
        }),
    ))
}

pub async fn list(
    State(state): State<AppState>,
    _auth: OptionalAuth,
) -> ApiResult<Json<HandoffListResponse>> {
    let handoffs = state.records.list_handoffs().await?;
    Ok(Json(HandoffListResponse {
        message: "Handoffs retrieved successfully".to_string(),
        count: handoffs.len(),
        handoffs,
    }))
}

pub async fn list_for_patient(
    State(state): State<AppState>,
    _auth: OptionalAuth,
    Path(patient_id): Path<String>,
) -> ApiResult<Json<HandoffListResponse>> {
    let handoffs = state.records.list_handoffs_for_patient(&patient_id).await?;
    Ok(Json(HandoffListResponse {
        message: "Patient handoffs retrieved successfully".to_string(),
        count: handoffs.len(),
        handoffs,
    }))
}

pub async fn get(
    State(state): State<AppState>,
    _auth: OptionalAuth,
    Path(id): Path<String>,
) -> ApiResult<Json<HandoffResponse>> {
    let handoff = state.records.get_handoff(&id).await?;
    Ok(Json(HandoffResponse {
        message: "Handoff retrieved successfully".to_string(),
        handoff,
    }))
}
