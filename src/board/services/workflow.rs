//! Task workflow service tying ordering and history to the task store.
//!
//! Every task mutation flows through here so the two side concerns stay
//! consistent: positions are allocated before a task is written, and
//! history entries are recorded after. History writes are best effort
//! for mutations; a failed append is logged and the mutation stands.
//! History reads propagate their errors.

use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;

use crate::board::{
    domain::{
        diff_task, Actor, BoardDomainError, FieldChange, HistoryConfig, HistoryEntry, MemberId,
        NewTask, OrderingConfig, Task, TaskId, TaskPatch, TaskStatus,
    },
    ports::{
        HistoryStore, HistoryStoreError, MemberDirectory, ServiceDirectory, TaskFilter, TaskStore,
        TaskStoreError,
    },
};

use super::{
    ordering::{OrderingError, OrderingService},
    recorder::HistoryRecorder,
};

/// Service-level errors for task workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// No task exists with the given identifier.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// Domain validation or ordering arithmetic failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Task store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
    /// History store read failed.
    #[error(transparent)]
    History(#[from] HistoryStoreError),
}

impl From<OrderingError> for WorkflowError {
    fn from(err: OrderingError) -> Self {
        match err {
            OrderingError::Domain(domain) => Self::Domain(domain),
            OrderingError::Store(store) => Self::Store(store),
        }
    }
}

/// Result type for workflow operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Outcome of a recorded task mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMutation {
    /// The task as persisted after the mutation.
    pub task: Task,
    /// History entries recorded for the mutation, in emission order.
    ///
    /// Empty when nothing changed or when the history append failed.
    pub entries: Vec<HistoryEntry>,
}

/// Coordinates task mutations with position allocation and history
/// recording.
#[derive(Clone)]
pub struct TaskWorkflow<S, M, D, H, K>
where
    S: TaskStore,
    M: MemberDirectory,
    D: ServiceDirectory,
    H: HistoryStore,
    K: Clock + Send + Sync,
{
    store: Arc<S>,
    ordering: OrderingService<S, K>,
    recorder: HistoryRecorder<M, D, H, K>,
    clock: Arc<K>,
}

impl<S, M, D, H, K> TaskWorkflow<S, M, D, H, K>
where
    S: TaskStore,
    M: MemberDirectory,
    D: ServiceDirectory,
    H: HistoryStore,
    K: Clock + Send + Sync,
{
    /// Creates a workflow with default ordering and history configuration.
    #[must_use]
    pub fn new(
        store: Arc<S>,
        members: Arc<M>,
        services: Arc<D>,
        history: Arc<H>,
        clock: Arc<K>,
    ) -> Self {
        Self::with_config(
            store,
            members,
            services,
            history,
            clock,
            OrderingConfig::default(),
            HistoryConfig::default(),
        )
    }

    /// Creates a workflow with explicit ordering and history configuration.
    #[must_use]
    pub fn with_config(
        store: Arc<S>,
        members: Arc<M>,
        services: Arc<D>,
        history: Arc<H>,
        clock: Arc<K>,
        ordering_config: OrderingConfig,
        history_config: HistoryConfig,
    ) -> Self {
        let ordering =
            OrderingService::with_config(Arc::clone(&store), Arc::clone(&clock), ordering_config);
        let recorder =
            HistoryRecorder::with_config(members, services, history, Arc::clone(&clock), history_config);
        Self {
            store,
            ordering,
            recorder,
            clock,
        }
    }

    /// Creates a task at the end of its status bucket and records the
    /// creation entry.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Store`] when the position query or the
    /// insert fails.
    pub async fn create_task(
        &self,
        details: NewTask,
        actor: &Actor,
    ) -> WorkflowResult<TaskMutation> {
        let position = self.ordering.next_append_position(details.status()).await?;
        let task = Task::new(details, position, &*self.clock);
        self.store.insert(&task).await?;
        let entries = match self.recorder.record_created(&task, actor).await {
            Ok(entry) => vec![entry],
            Err(err) => {
                tracing::warn!(task_id = %task.id(), error = %err, "history append failed after create");
                Vec::new()
            }
        };
        Ok(TaskMutation { task, entries })
    }

    /// Applies a partial update to a task and records one history entry
    /// per changed field.
    ///
    /// An empty patch leaves the task untouched. Same-value writes are
    /// persisted but produce no history entries.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::TaskNotFound`] when the task does not
    /// exist and [`WorkflowError::Store`] when persistence fails.
    pub async fn update_task(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        actor: &Actor,
    ) -> WorkflowResult<TaskMutation> {
        let mut task = self.find_required(id).await?;
        if patch.is_empty() {
            return Ok(TaskMutation {
                task,
                entries: Vec::new(),
            });
        }
        let changes = diff_task(&task, patch);
        task.apply_patch(patch, &*self.clock);
        self.store.update(&task).await?;
        let entries = self.record_best_effort(task.id(), actor, &changes).await;
        Ok(TaskMutation { task, entries })
    }

    /// Moves a task into another status bucket at the given drop index.
    ///
    /// The target position is derived from the index alone; dense drop
    /// indexes can land several tasks on the same position, which the
    /// bucket ordering resolves by write order until the next reorder.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::TaskNotFound`] when the task does not
    /// exist, [`WorkflowError::Domain`] when the index cannot be
    /// represented, and [`WorkflowError::Store`] when persistence fails.
    pub async fn move_task(
        &self,
        id: TaskId,
        status: TaskStatus,
        dest_index: usize,
        actor: &Actor,
    ) -> WorkflowResult<TaskMutation> {
        let position = self.ordering.move_target_position(dest_index)?;
        let patch = TaskPatch::new().with_status(status).with_position(position);
        self.update_task(id, &patch, actor).await
    }

    /// Renumbers one status bucket into the requested order.
    ///
    /// Reordering is presentational; it records no history.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Domain`] when the order does not exactly
    /// cover the bucket and [`WorkflowError::Store`] when persistence
    /// fails.
    pub async fn reorder_bucket(
        &self,
        status: TaskStatus,
        ordered_ids: &[TaskId],
    ) -> WorkflowResult<Vec<Task>> {
        Ok(self.ordering.reorder_bucket(status, ordered_ids).await?)
    }

    /// Restores uniform position gaps across one status bucket.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Store`] when persistence fails.
    pub async fn rebalance_bucket(&self, status: TaskStatus) -> WorkflowResult<Vec<Task>> {
        Ok(self.ordering.rebalance_bucket(status).await?)
    }

    /// Returns `true` when a bucket has reached the position ceiling.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Store`] when the bucket query fails.
    pub async fn needs_rebalance(&self, status: TaskStatus) -> WorkflowResult<bool> {
        Ok(self.ordering.needs_rebalance(status).await?)
    }

    /// Adds a member to the task's followers.
    ///
    /// Returns `true` when the member was newly added; following an
    /// already-followed task is a no-op and leaves the task unwritten.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::TaskNotFound`] when the task does not
    /// exist and [`WorkflowError::Store`] when persistence fails.
    pub async fn follow(&self, id: TaskId, member: MemberId) -> WorkflowResult<bool> {
        let mut task = self.find_required(id).await?;
        let mut followers = task.followers().clone();
        if !followers.follow(member) {
            return Ok(false);
        }
        task.apply_patch(&TaskPatch::new().with_followers(followers), &*self.clock);
        self.store.update(&task).await?;
        Ok(true)
    }

    /// Removes a member from the task's followers.
    ///
    /// Returns `true` when the member was present; unfollowing a task the
    /// member does not follow is a no-op and leaves the task unwritten.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::TaskNotFound`] when the task does not
    /// exist and [`WorkflowError::Store`] when persistence fails.
    pub async fn unfollow(&self, id: TaskId, member: &MemberId) -> WorkflowResult<bool> {
        let mut task = self.find_required(id).await?;
        let mut followers = task.followers().clone();
        if !followers.unfollow(member) {
            return Ok(false);
        }
        task.apply_patch(&TaskPatch::new().with_followers(followers), &*self.clock);
        self.store.update(&task).await?;
        Ok(true)
    }

    /// Records that the actor viewed the task's attachment.
    ///
    /// The entry carries no field or values. A failed append is logged
    /// and reported as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::TaskNotFound`] when the task does not
    /// exist.
    pub async fn record_attachment_viewed(
        &self,
        id: TaskId,
        actor: &Actor,
    ) -> WorkflowResult<Option<HistoryEntry>> {
        self.find_required(id).await?;
        match self.recorder.record_attachment_viewed(id, actor).await {
            Ok(entry) => Ok(Some(entry)),
            Err(err) => {
                tracing::warn!(task_id = %id, error = %err, "history append failed for attachment view");
                Ok(None)
            }
        }
    }

    /// Returns a task by identifier, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Store`] when the lookup fails.
    pub async fn find_task(&self, id: TaskId) -> WorkflowResult<Option<Task>> {
        Ok(self.store.find_by_id(id).await?)
    }

    /// Returns tasks matching the filter, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Store`] when the query fails.
    pub async fn list_tasks(&self, filter: &TaskFilter) -> WorkflowResult<Vec<Task>> {
        Ok(self.store.list(filter).await?)
    }

    /// Returns tasks followed by the member, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Store`] when the query fails.
    pub async fn followed_tasks(&self, member: &MemberId) -> WorkflowResult<Vec<Task>> {
        Ok(self.store.find_followed_by(member).await?)
    }

    /// Returns the recorded history for a task, oldest first.
    ///
    /// History outlives its task, so entries are returned even after the
    /// task has been deleted.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::History`] when the query fails.
    pub async fn task_history(&self, id: TaskId) -> WorkflowResult<Vec<HistoryEntry>> {
        Ok(self.recorder.entries_for_task(id).await?)
    }

    /// Deletes a task. Its history entries are retained.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::TaskNotFound`] when the task does not
    /// exist and [`WorkflowError::Store`] when the delete fails.
    pub async fn delete_task(&self, id: TaskId) -> WorkflowResult<()> {
        self.store.delete(id).await.map_err(|err| match err {
            TaskStoreError::NotFound(missing) => WorkflowError::TaskNotFound(missing),
            other => WorkflowError::Store(other),
        })
    }

    async fn find_required(&self, id: TaskId) -> WorkflowResult<Task> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or(WorkflowError::TaskNotFound(id))
    }

    async fn record_best_effort(
        &self,
        task_id: TaskId,
        actor: &Actor,
        changes: &[FieldChange],
    ) -> Vec<HistoryEntry> {
        match self.recorder.record_changes(task_id, actor, changes).await {
            Ok(entries) => entries,
            Err(err) => {
                tracing::warn!(task_id = %task_id, error = %err, "history append failed after update");
                Vec::new()
            }
        }
    }
}
