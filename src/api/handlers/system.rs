use crate::api::responses::{HealthResponse, MessageResponse};
use crate::api::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

pub async fn banner() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "ShiftSync API is running".to_string(),
    })
}

/// 200 when the record store answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store = state.records.store();
    let database = store.backend_name().to_string();

    match store.test_connection().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                database,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable".to_string(),
                    database,
                }),
            )
        }
    }
}
