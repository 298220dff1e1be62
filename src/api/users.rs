use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use csvsearch_backend::service::ServiceError;

use crate::state::AppState;

use super::{error_response, DataResponse};

/// 搜索参数
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Absent and empty are different: empty matches everything.
    pub q: Option<String>,
}

/// GET /api/users?q= - 搜索记录
pub async fn search_users(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Response {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::warn!("Search failed: bad query string: {}", rejection);
            return error_response(&ServiceError::UnexpectedSearchFailure);
        }
    };

    match state.query.search(params.q.as_deref()) {
        Ok(outcome) => {
            (StatusCode::OK, Json(DataResponse { data: outcome.records })).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// Panic fallback for the search route / 搜索路由的 panic 兜底
pub fn search_panic(_: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Search handler panicked");
    error_response(&ServiceError::UnexpectedSearchFailure)
}
