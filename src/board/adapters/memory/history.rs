//! Thread-safe in-memory history store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{HistoryEntry, TaskId},
    ports::{HistoryStore, HistoryStoreError, HistoryStoreResult},
};

/// Thread-safe in-memory history store.
///
/// Entries are held in append order; per-task reads preserve that order,
/// which doubles as the tie-break for entries sharing a timestamp.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    entries: Arc<RwLock<Vec<HistoryEntry>>>,
}

impl InMemoryHistoryStore {
    /// Creates an empty history store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stored entries.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryStoreError::Query`] when the store lock is poisoned.
    pub fn len(&self) -> HistoryStoreResult<usize> {
        let entries = self
            .entries
            .read()
            .map_err(|err| HistoryStoreError::query(std::io::Error::other(err.to_string())))?;
        Ok(entries.len())
    }

    /// Returns `true` when no entries are stored.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryStoreError::Query`] when the store lock is poisoned.
    pub fn is_empty(&self) -> HistoryStoreResult<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, entry: &HistoryEntry) -> HistoryStoreResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|err| HistoryStoreError::write(std::io::Error::other(err.to_string())))?;
        entries.push(entry.clone());
        Ok(())
    }

    async fn append_batch(&self, batch: &[HistoryEntry]) -> HistoryStoreResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|err| HistoryStoreError::write(std::io::Error::other(err.to_string())))?;
        entries.extend_from_slice(batch);
        Ok(())
    }

    async fn entries_for_task(&self, task_id: TaskId) -> HistoryStoreResult<Vec<HistoryEntry>> {
        let entries = self
            .entries
            .read()
            .map_err(|err| HistoryStoreError::query(std::io::Error::other(err.to_string())))?;
        let mut matched: Vec<HistoryEntry> = entries
            .iter()
            .filter(|entry| entry.task_id == task_id)
            .cloned()
            .collect();
        matched.sort_by_key(|entry| entry.timestamp);
        Ok(matched)
    }
}
