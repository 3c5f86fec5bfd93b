use crate::api::error::{ApiError, ApiResult};
use crate::api::extract::AuthSession;
use crate::api::responses::{CurrentUserResponse, LoginResponse, RegisterResponse};
use crate::api::state::AppState;
use crate::domain::{LoginRequest, RegisterUser, ShiftSyncError};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterUser>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let Json(input) = payload?;
    let user = state.records.create_user(&input).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully. Please log in.".to_string(),
            user,
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(input) = payload?;
    let user = state.records.authenticate(&input).await?;
    let token = state.tokens.issue(&user)?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        user: user.profile(),
    }))
}

pub async fn current_user(
    State(state): State<AppState>,
    session: AuthSession,
) -> ApiResult<Json<CurrentUserResponse>> {
    let user = state
        .records
        .get_user(session.user_id)
        .await
        .map_err(|err| match err {
            ShiftSyncError::NotFound { .. } => ApiError::from(ShiftSyncError::Authentication(
                "Account no longer exists".to_string(),
            )),
            other => ApiError::from(other),
        })?;

    Ok(Json(CurrentUserResponse { user }))
}
