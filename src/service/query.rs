//! Record search / 记录搜索

use std::sync::Arc;

use crate::models::Record;
use crate::search::SearchEngine;
use crate::store::RecordStore;

use super::error::{ServiceError, ServiceResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub records: Vec<Record>,
}

/// Query service / 查询服务
#[derive(Debug, Clone)]
pub struct QueryService {
    engine: SearchEngine,
}

impl QueryService {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self {
            engine: SearchEngine::new(store),
        }
    }

    /// `None` means the parameter was absent; `Some("")` is a valid query
    /// that matches every record.
    pub fn search(&self, query: Option<&str>) -> ServiceResult<QueryOutcome> {
        let query = query.ok_or(ServiceError::MissingQuery)?;

        if self.engine.document_count() == 0 {
            return Ok(QueryOutcome { records: Vec::new() });
        }

        let records = self.engine.search(query);
        if records.is_empty() {
            tracing::debug!("Search: no results for q={:?}", query);
            return Err(ServiceError::NoResults(query.to_string()));
        }

        tracing::debug!("Search: q={:?}, hits={}", query, records.len());
        Ok(QueryOutcome { records })
    }
}
