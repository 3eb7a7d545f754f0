//! Position allocation and bucket maintenance service.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::Clock;
use thiserror::Error;

use crate::board::{
    domain::{
        plan_rebalance, plan_reorder, BoardDomainError, OrderingConfig, Placement, Position,
        Task, TaskId, TaskPatch, TaskStatus,
    },
    ports::{TaskStore, TaskStoreError},
};

/// Service-level errors for ordering operations.
#[derive(Debug, Error)]
pub enum OrderingError {
    /// Ordering arithmetic or reorder validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] TaskStoreError),
}

/// Result type for ordering service operations.
pub type OrderingResult<T> = Result<T, OrderingError>;

/// Allocates positions and maintains bucket numbering.
///
/// Wraps the pure planning functions with store access: reads come from
/// bucket queries, computed placements are persisted one task at a time.
#[derive(Clone)]
pub struct OrderingService<S, K>
where
    S: TaskStore,
    K: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<K>,
    config: OrderingConfig,
}

impl<S, K> OrderingService<S, K>
where
    S: TaskStore,
    K: Clock + Send + Sync,
{
    /// Creates an ordering service with default stride and clamp values.
    #[must_use]
    pub fn new(store: Arc<S>, clock: Arc<K>) -> Self {
        Self::with_config(store, clock, OrderingConfig::default())
    }

    /// Creates an ordering service with explicit stride and clamp values.
    #[must_use]
    pub const fn with_config(store: Arc<S>, clock: Arc<K>, config: OrderingConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Returns the position for appending a task to the given bucket.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Store`] when the bucket query fails.
    pub async fn next_append_position(&self, status: TaskStatus) -> OrderingResult<Position> {
        let highest = self.store.highest_position(status).await?;
        Ok(self.config.append_after(highest))
    }

    /// Returns the position for a task dropped at `dest_index` of another
    /// bucket.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Domain`] when the index cannot be
    /// represented as a position.
    pub fn move_target_position(&self, dest_index: usize) -> OrderingResult<Position> {
        Ok(self.config.cross_bucket_position(dest_index)?)
    }

    /// Renumbers one bucket into the requested order and persists every
    /// new position.
    ///
    /// Returns the updated tasks in their new order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Domain`] when the requested order does not
    /// exactly cover the bucket, and [`OrderingError::Store`] when a read
    /// or write fails. Positions already persisted before a write failure
    /// are not rolled back.
    pub async fn reorder_bucket(
        &self,
        status: TaskStatus,
        ordered_ids: &[TaskId],
    ) -> OrderingResult<Vec<Task>> {
        let bucket = self.store.list_bucket(status).await?;
        let placements = plan_reorder(&self.config, &bucket, ordered_ids)?;
        self.apply_placements(bucket, placements).await
    }

    /// Restores uniform stride gaps across one bucket, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Store`] when a read or write fails.
    pub async fn rebalance_bucket(&self, status: TaskStatus) -> OrderingResult<Vec<Task>> {
        let bucket = self.store.list_bucket(status).await?;
        let placements = plan_rebalance(&self.config, &bucket);
        self.apply_placements(bucket, placements).await
    }

    /// Returns `true` when the bucket has grown into the clamp ceiling and
    /// should be rebalanced.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::Store`] when the bucket query fails.
    pub async fn needs_rebalance(&self, status: TaskStatus) -> OrderingResult<bool> {
        let highest = self.store.highest_position(status).await?;
        Ok(self.config.at_clamp(highest))
    }

    /// Persists planned placements, returning the tasks in placement order.
    async fn apply_placements(
        &self,
        bucket: Vec<Task>,
        placements: Vec<Placement>,
    ) -> OrderingResult<Vec<Task>> {
        let mut tasks_by_id: HashMap<TaskId, Task> =
            bucket.into_iter().map(|task| (task.id(), task)).collect();
        let mut updated = Vec::with_capacity(placements.len());
        for placement in placements {
            let Some(mut task) = tasks_by_id.remove(&placement.task_id) else {
                continue;
            };
            task.apply_patch(
                &TaskPatch::new().with_position(placement.position),
                &*self.clock,
            );
            self.store.update(&task).await?;
            updated.push(task);
        }
        Ok(updated)
    }
}
