//! Store port for task persistence, bucket queries, and filtered listing.

use crate::board::domain::{MemberId, Position, ServiceId, Task, TaskId, TaskStatus};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
///
/// Bucket queries treat `(status, position)` as the ordering key: listings
/// come back in ascending position order with ties resolved by insertion
/// order, so equal positions degrade to a stable sequence rather than an
/// error.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the task identifier
    /// already exists.
    async fn insert(&self, task: &Task) -> TaskStoreResult<()>;

    /// Persists the current state of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskStoreResult<()>;

    /// Deletes a task record. History entries are not touched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskStoreResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Returns every task in one status bucket, in ascending position order.
    async fn list_bucket(&self, status: TaskStatus) -> TaskStoreResult<Vec<Task>>;

    /// Returns the highest position currently used in a status bucket.
    ///
    /// Returns `None` when the bucket is empty. Implementations should
    /// answer this from an ordering query rather than a full scan.
    async fn highest_position(&self, status: TaskStatus) -> TaskStoreResult<Option<Position>>;

    /// Returns tasks matching the filter, newest first.
    async fn list(&self, filter: &TaskFilter) -> TaskStoreResult<Vec<Task>>;

    /// Returns tasks followed by the given member, newest first.
    async fn find_followed_by(&self, member: &MemberId) -> TaskStoreResult<Vec<Task>>;
}

/// Conjunctive filter over task listings.
///
/// Every populated criterion must match; an empty filter matches all tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Match tasks in this workflow status.
    pub status: Option<TaskStatus>,
    /// Match tasks assigned to this member.
    pub assignee_id: Option<MemberId>,
    /// Match tasks owned by this service.
    pub service_id: Option<ServiceId>,
    /// Match tasks due on this calendar day.
    pub due_on: Option<NaiveDate>,
    /// Match tasks whose name contains this text, case-insensitively.
    pub search: Option<String>,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the filter to one workflow status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the filter to one assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee_id: MemberId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Restricts the filter to one owning service.
    #[must_use]
    pub fn with_service(mut self, service_id: ServiceId) -> Self {
        self.service_id = Some(service_id);
        self
    }

    /// Restricts the filter to tasks due on the given calendar day.
    #[must_use]
    pub const fn due_on(mut self, day: NaiveDate) -> Self {
        self.due_on = Some(day);
        self
    }

    /// Restricts the filter to names containing the given text.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Returns `true` when the task satisfies every populated criterion.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        if self.status.is_some_and(|status| status != task.status()) {
            return false;
        }
        if let Some(assignee_id) = &self.assignee_id {
            if task.assignee_id() != Some(assignee_id) {
                return false;
            }
        }
        if let Some(service_id) = &self.service_id {
            if task.service_id() != service_id {
                return false;
            }
        }
        if let Some(day) = self.due_on {
            if task.due_date().map(|date| date.date_naive()) != Some(day) {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let haystack = task.name().as_str().to_lowercase();
            if !haystack.contains(&search.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
