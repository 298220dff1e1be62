pub mod files;
pub mod server;
pub mod users;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use csvsearch_backend::config::AppConfig;
use csvsearch_backend::service::ServiceError;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

/// Every failure is reported as 500 with `{"message": ...}`; existing
/// clients depend on that status.
pub fn error_response(err: &ServiceError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MessageResponse::new(err.to_string())),
    )
        .into_response()
}

pub fn router(state: Arc<AppState>, config: &AppConfig) -> Router {
    Router::new()
        .route("/health", get(server::health_check))
        .route(
            "/api/files",
            post(files::upload_file).layer(CatchPanicLayer::custom(files::upload_panic)),
        )
        .route(
            "/api/users",
            get(users::search_users).layer(CatchPanicLayer::custom(users::search_panic)),
        )
        .layer(DefaultBodyLimit::max(config.upload.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
