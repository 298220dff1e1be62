use thiserror::Error;

use crate::ingest::IngestError;

/// Request-level failures / 请求级错误
///
/// `Display` is the exact message returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("The file 'file' is required")]
    MissingFile,
    #[error("There must be only one file")]
    MultipleFiles,
    #[error("The file must be a .csv extension file")]
    InvalidExtension,
    #[error("The file could not be loaded, check the file structure: id, name, email")]
    MalformedStructure,
    #[error("The file could not be loaded")]
    GenericUploadFailure,
    #[error("The parameter 'q' is required")]
    MissingQuery,
    #[error("There were no results for {0}")]
    NoResults(String),
    #[error("Unexpected error while searching for data")]
    UnexpectedSearchFailure,
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<IngestError> for ServiceError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::InvalidExtension(_) => ServiceError::InvalidExtension,
            IngestError::MalformedStructure { .. } => ServiceError::MalformedStructure,
            IngestError::InvalidEncoding(_) | IngestError::Parse(_) => {
                ServiceError::GenericUploadFailure
            }
        }
    }
}
