use csvsearch_backend::service::{IngestionService, QueryService};
use csvsearch_backend::store::RecordStore;
use std::sync::Arc;

/// Shared application state / 共享应用状态
///
/// Both services hold the same store; nothing else touches it.
pub struct AppState {
    pub ingestion: IngestionService,
    pub query: QueryService,
}

impl AppState {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self {
            ingestion: IngestionService::new(store.clone()),
            query: QueryService::new(store),
        }
    }
}
