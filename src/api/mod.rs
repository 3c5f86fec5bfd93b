//! REST API
//!
//! axum router over the [`RecordService`](crate::core::records::RecordService).
//!
//! | Route | Methods |
//! |---|---|
//! | `/` | GET banner |
//! | `/health` | GET |
//! | `/api/auth/register`, `/api/auth/login` | POST |
//! | `/api/auth/me` | GET |
//! | `/api/patients` | GET, POST |
//! | `/api/patients/:id` | GET, PUT, DELETE |
//! | `/api/handoffs` | GET, POST |
//! | `/api/handoffs/patient/:id` | GET |
//! | `/api/handoffs/:id` | GET |
//!
//! Patient and handoff routes require a bearer token unless
//! `auth.require_auth` is off.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod responses;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use server::{bind, serve};
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;

/// Builds the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::system::banner))
        .route("/health", get(handlers::system::health))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/me", get(handlers::auth::current_user))
        .route(
            "/api/patients",
            get(handlers::patients::list).post(handlers::patients::create),
        )
        .route(
            "/api/patients/:id",
            get(handlers::patients::get)
                .put(handlers::patients::update)
                .delete(handlers::patients::deactivate),
        )
        .route(
            "/api/handoffs",
            get(handlers::handoffs::list).post(handlers::handoffs::create),
        )
        .route(
            "/api/handoffs/patient/:id",
            get(handlers::handoffs::list_for_patient),
        )
        .route("/api/handoffs/:id", get(handlers::handoffs::get))
        .layer(axum::middleware::from_fn(middleware::request_logging))
        .with_state(state)
}
