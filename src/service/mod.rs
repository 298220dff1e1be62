//! Request orchestration / 请求编排
//!
//! Both services share one injected [`RecordStore`](crate::store::RecordStore).

pub mod error;
pub mod ingestion;
pub mod query;

pub use error::{ServiceError, ServiceResult};
pub use ingestion::{FilePart, IngestionService, UploadOutcome, FILE_FIELD};
pub use query::{QueryOutcome, QueryService};
