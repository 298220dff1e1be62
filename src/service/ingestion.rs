//! Upload handling / 上传处理

use std::sync::Arc;

use bytes::Bytes;

use crate::ingest::{has_csv_extension, ingest};
use crate::store::RecordStore;

use super::error::{ServiceError, ServiceResult};

/// The only multipart field accepted for uploads / 唯一接受的上传字段
pub const FILE_FIELD: &str = "file";

/// One file-bearing multipart part / 一个携带文件的 multipart 字段
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Form field name / 表单字段名
    pub field: String,
    /// Client-declared file name / 客户端声明的文件名
    pub file_name: String,
    pub bytes: Bytes,
}

impl FilePart {
    pub fn new(
        field: impl Into<String>,
        file_name: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOutcome {
    /// Records added to the store / 新增记录数
    pub inserted: usize,
}

impl UploadOutcome {
    pub fn message(&self) -> &'static str {
        "File successful loaded"
    }
}

/// Ingestion service / 导入服务
#[derive(Debug, Clone)]
pub struct IngestionService {
    store: Arc<RecordStore>,
}

impl IngestionService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Validate the upload, parse it and commit every row / 校验、解析并提交
    ///
    /// The store is only touched after the whole file validated.
    pub fn handle_upload(&self, parts: Vec<FilePart>) -> ServiceResult<UploadOutcome> {
        let file = single_file(parts)?;

        if !has_csv_extension(&file.file_name) {
            tracing::warn!("Upload rejected: not a .csv file, file_name={}", file.file_name);
            return Err(ServiceError::InvalidExtension);
        }

        let records = ingest(&file.bytes, &file.file_name).map_err(|e| {
            tracing::warn!("Upload rejected: file_name={}, error={}", file.file_name, e);
            ServiceError::from(e)
        })?;

        let inserted = self.store.insert_batch(records);
        tracing::info!(
            "File loaded: file_name={}, rows={}, total={}",
            file.file_name,
            inserted,
            self.store.len()
        );
        Ok(UploadOutcome { inserted })
    }
}

/// Exactly one part under [`FILE_FIELD`], and no file parts anywhere else.
fn single_file(parts: Vec<FilePart>) -> ServiceResult<FilePart> {
    if let Some(stray) = parts.iter().find(|p| p.field != FILE_FIELD) {
        tracing::warn!("Upload rejected: unexpected file field '{}'", stray.field);
        return Err(ServiceError::MultipleFiles);
    }

    let count = parts.len();
    let mut parts = parts.into_iter();
    let file = parts.next().ok_or(ServiceError::MissingFile)?;
    if parts.next().is_some() {
        tracing::warn!("Upload rejected: {} files under '{}'", count, FILE_FIELD);
        return Err(ServiceError::MultipleFiles);
    }
    Ok(file)
}
