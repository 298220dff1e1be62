//! In-memory record store / 内存记录存储
//!
//! Process-lifetime map from generated id to [`Record`]. Grows only through
//! successful ingestion batches; there is no update or delete.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::models::Record;

/// Record store / 记录存储
#[derive(Debug, Default)]
pub struct RecordStore {
    records: RwLock<HashMap<String, Record>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a single record / 插入单条记录
    pub fn insert(&self, record: Record) {
        self.records.write().insert(record.id.clone(), record);
    }

    /// Commit a whole batch under one write lock / 在同一把写锁下提交整批记录
    ///
    /// Returns the number of records inserted.
    pub fn insert_batch(&self, batch: Vec<Record>) -> usize {
        let count = batch.len();
        let mut records = self.records.write();
        records.reserve(count);
        for record in batch {
            records.insert(record.id.clone(), record);
        }
        count
    }

    /// Snapshot of every stored record, unordered / 所有记录快照（无序）
    pub fn all(&self) -> Vec<Record> {
        self.records.read().values().cloned().collect()
    }

    /// Clone out the records accepted by `predicate` under a single read lock.
    pub fn scan<F>(&self, mut predicate: F) -> Vec<Record>
    where
        F: FnMut(&Record) -> bool,
    {
        self.records
            .read()
            .values()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
