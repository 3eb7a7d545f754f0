//! Pure planning functions for bucket renumbering.
//!
//! These functions compute placements without touching storage; persisting
//! the result is the ordering service's job. Keeping the arithmetic pure
//! keeps the numbering rules testable against plain task slices.

use super::{BoardDomainError, OrderingConfig, Position, Task, TaskId};
use std::collections::BTreeSet;

/// A computed task-to-position assignment awaiting persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Task receiving the new position.
    pub task_id: TaskId,
    /// Position to persist for the task.
    pub position: Position,
}

/// Plans a full renumber of one bucket into the requested order.
///
/// `bucket` holds the bucket's current tasks and `ordered_ids` names every
/// one of them exactly once, in the desired final order. Each task is
/// assigned `anchor + (index + 1) * stride`, where the anchor is the
/// smallest position currently present in the bucket. Anchoring at the
/// current minimum keeps the renumbered run in the bucket's existing
/// numeric region instead of resetting it.
///
/// # Errors
///
/// Returns [`BoardDomainError::TaskNotInBucket`] when the request names a
/// task outside the bucket, [`BoardDomainError::DuplicateReorderEntry`]
/// when it names a task twice, and [`BoardDomainError::IncompleteReorder`]
/// when it does not cover the whole bucket.
pub fn plan_reorder(
    config: &OrderingConfig,
    bucket: &[Task],
    ordered_ids: &[TaskId],
) -> Result<Vec<Placement>, BoardDomainError> {
    let members: BTreeSet<TaskId> = bucket.iter().map(Task::id).collect();
    let mut seen = BTreeSet::new();
    for task_id in ordered_ids {
        if !members.contains(task_id) {
            return Err(BoardDomainError::TaskNotInBucket(*task_id));
        }
        if !seen.insert(*task_id) {
            return Err(BoardDomainError::DuplicateReorderEntry(*task_id));
        }
    }
    if seen.len() != members.len() {
        return Err(BoardDomainError::IncompleteReorder {
            expected: members.len(),
            supplied: ordered_ids.len(),
        });
    }

    let anchor = bucket
        .iter()
        .map(|task| task.position().value())
        .min()
        .unwrap_or(0);
    Ok(ordered_ids
        .iter()
        .enumerate()
        .map(|(index, task_id)| Placement {
            task_id: *task_id,
            position: Position::new(anchor.saturating_add(config.stride_multiple(index))),
        })
        .collect())
}

/// Plans a rebalance that restores uniform stride gaps across a bucket.
///
/// `bucket` must already be in ascending position order, as returned by the
/// store's bucket listing; relative order is preserved while every task is
/// reseated at `(index + 1) * stride`.
#[must_use]
pub fn plan_rebalance(config: &OrderingConfig, bucket: &[Task]) -> Vec<Placement> {
    bucket
        .iter()
        .enumerate()
        .map(|(index, task)| Placement {
            task_id: task.id(),
            position: Position::new(config.stride_multiple(index)),
        })
        .collect()
}
