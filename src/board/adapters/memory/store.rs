//! Thread-safe in-memory task store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::record::TaskRecord;
use crate::board::{
    domain::{MemberId, Position, Task, TaskId, TaskStatus},
    ports::{TaskFilter, TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
///
/// Documents are held in the same flat record shape a document database
/// would use, so the encode and decode paths run under test exactly as
/// they would against real storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<TaskStoreState>>,
}

#[derive(Debug, Default)]
struct TaskStoreState {
    records: HashMap<TaskId, StoredRecord>,
    next_seq: u64,
}

#[derive(Debug, Clone)]
struct StoredRecord {
    record: TaskRecord,
    /// Write-order tie-break for equal positions.
    seq: u64,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn bump_seq(state: &mut TaskStoreState) -> u64 {
    let seq = state.next_seq;
    state.next_seq += 1;
    seq
}

fn encode(task: &Task) -> TaskStoreResult<TaskRecord> {
    TaskRecord::try_from_domain(task).map_err(TaskStoreError::persistence)
}

fn decode(record: TaskRecord) -> TaskStoreResult<Task> {
    record.try_into_domain().map_err(TaskStoreError::persistence)
}

/// Decodes records into tasks paired with their write sequence.
fn decode_all(state: &TaskStoreState) -> TaskStoreResult<Vec<(Task, u64)>> {
    state
        .records
        .values()
        .map(|stored| decode(stored.record.clone()).map(|task| (task, stored.seq)))
        .collect()
}

/// Sorts decoded tasks newest first, write order breaking ties.
fn newest_first(mut entries: Vec<(Task, u64)>) -> Vec<Task> {
    entries.sort_by_key(|(task, seq)| (task.created_at(), *seq));
    entries.reverse();
    entries.into_iter().map(|(task, _)| task).collect()
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        if state.records.contains_key(&task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }
        let record = encode(task)?;
        let seq = bump_seq(&mut state);
        state.records.insert(task.id(), StoredRecord { record, seq });
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        let previous = state
            .records
            .get(&task.id())
            .ok_or(TaskStoreError::NotFound(task.id()))?
            .clone();
        let record = encode(task)?;

        // A repositioned task moves to the end of the write order so equal
        // positions keep a deterministic sequence.
        let seq = if record.position == previous.record.position {
            previous.seq
        } else {
            bump_seq(&mut state)
        };
        state.records.insert(task.id(), StoredRecord { record, seq });
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskStoreResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        if state.records.remove(&id).is_none() {
            return Err(TaskStoreError::NotFound(id));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        state
            .records
            .get(&id)
            .map(|stored| decode(stored.record.clone()))
            .transpose()
    }

    async fn list_bucket(&self, status: TaskStatus) -> TaskStoreResult<Vec<Task>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        let mut bucket: Vec<StoredRecord> = state
            .records
            .values()
            .filter(|stored| stored.record.status == status.as_str())
            .cloned()
            .collect();
        bucket.sort_by_key(|stored| (stored.record.position, stored.seq));
        bucket
            .into_iter()
            .map(|stored| decode(stored.record))
            .collect()
    }

    async fn highest_position(&self, status: TaskStatus) -> TaskStoreResult<Option<Position>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(state
            .records
            .values()
            .filter(|stored| stored.record.status == status.as_str())
            .map(|stored| stored.record.position)
            .max()
            .map(Position::new))
    }

    async fn list(&self, filter: &TaskFilter) -> TaskStoreResult<Vec<Task>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        let mut entries = decode_all(&state)?;
        entries.retain(|(task, _)| filter.matches(task));
        Ok(newest_first(entries))
    }

    async fn find_followed_by(&self, member: &MemberId) -> TaskStoreResult<Vec<Task>> {
        let state = self
            .state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))?;
        let mut entries = decode_all(&state)?;
        entries.retain(|(task, _)| task.followers().follows(member));
        Ok(newest_first(entries))
    }
}
