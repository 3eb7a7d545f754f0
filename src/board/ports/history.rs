//! History store port for append-only change records.

use crate::board::domain::{HistoryEntry, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for history store operations.
pub type HistoryStoreResult<T> = Result<T, HistoryStoreError>;

/// Append-only persistence contract for history entries.
///
/// Entries are immutable once written and survive the deletion of the task
/// they describe.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Appends one entry.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryStoreError::Write`] when the entry cannot be
    /// persisted.
    async fn append(&self, entry: &HistoryEntry) -> HistoryStoreResult<()>;

    /// Appends a batch of entries, preserving slice order.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryStoreError::Write`] when the batch cannot be
    /// persisted; implementations need not keep a partial batch.
    async fn append_batch(&self, entries: &[HistoryEntry]) -> HistoryStoreResult<()>;

    /// Returns a task's entries, oldest first.
    ///
    /// Entries sharing a timestamp keep their append order.
    async fn entries_for_task(&self, task_id: TaskId) -> HistoryStoreResult<Vec<HistoryEntry>>;
}

/// Errors returned by history store implementations.
#[derive(Debug, Clone, Error)]
pub enum HistoryStoreError {
    /// An entry or batch could not be written.
    #[error("history write failed: {0}")]
    Write(Arc<dyn std::error::Error + Send + Sync>),

    /// A read query failed.
    #[error("history query failed: {0}")]
    Query(Arc<dyn std::error::Error + Send + Sync>),
}

impl HistoryStoreError {
    /// Wraps a write-side error.
    pub fn write(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Write(Arc::new(err))
    }

    /// Wraps a query-side error.
    pub fn query(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Query(Arc::new(err))
    }
}
