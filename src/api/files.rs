use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use csvsearch_backend::service::{FilePart, ServiceError};

use crate::state::AppState;

use super::{error_response, MessageResponse};

/// POST /api/files - 上传 CSV 文件
///
/// A request that is not multipart at all is treated as carrying no file.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let parts = match multipart {
        Ok(multipart) => match collect_file_parts(multipart).await {
            Ok(parts) => parts,
            Err(e) => {
                tracing::warn!("Upload failed: could not read multipart body: {}", e);
                return error_response(&ServiceError::GenericUploadFailure);
            }
        },
        Err(rejection) => {
            tracing::debug!("Upload without multipart body: {}", rejection);
            Vec::new()
        }
    };

    match state.ingestion.handle_upload(parts) {
        Ok(outcome) => {
            (StatusCode::OK, Json(MessageResponse::new(outcome.message()))).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// 读取所有文件字段，忽略普通表单字段
async fn collect_file_parts(mut multipart: Multipart) -> Result<Vec<FilePart>, MultipartError> {
    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let name = field.name().unwrap_or("").to_string();
        let bytes = field.bytes().await?;
        tracing::debug!(
            "Upload part: field={}, file_name={}, size={}",
            name,
            file_name,
            bytes.len()
        );
        parts.push(FilePart::new(name, file_name, bytes));
    }
    Ok(parts)
}

/// Panic fallback for the upload route / 上传路由的 panic 兜底
pub fn upload_panic(_: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Upload handler panicked");
    error_response(&ServiceError::GenericUploadFailure)
}
