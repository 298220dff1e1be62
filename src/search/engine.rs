//! Search engine - linear scan over the record store / 搜索引擎

use std::sync::Arc;

use crate::models::Record;
use crate::store::RecordStore;

/// Search engine / 搜索引擎
///
/// Holds a handle to the shared store and scans it on every query; there is
/// no index to keep in sync.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    store: Arc<RecordStore>,
}

impl SearchEngine {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Search (primitive operation) / 搜索（原语操作）
    ///
    /// Returns every record with a field containing `query`, ignoring case,
    /// in store enumeration order.
    pub fn search(&self, query: &str) -> Vec<Record> {
        let needle = query.to_lowercase();
        self.store.scan(|record| record_matches(record, &needle))
    }

    /// Number of searchable records / 可搜索记录数
    pub fn document_count(&self) -> usize {
        self.store.len()
    }
}

/// `needle` must already be lowercased.
pub fn record_matches(record: &Record, needle: &str) -> bool {
    record
        .searchable_fields()
        .iter()
        .any(|value| value.to_lowercase().contains(needle))
}
