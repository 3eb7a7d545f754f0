//! Task aggregate root and the types used to create and reconstruct it.

use super::{
    AttachmentId, BoardDomainError, FollowerSet, MemberId, Position, ServiceId, TaskId, TaskPatch,
    TaskStatus,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated task display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    /// Creates a validated task name.
    ///
    /// Surrounding whitespace is trimmed; interior whitespace is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyTaskName`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(BoardDomainError::EmptyTaskName);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameter object for creating a task.
///
/// Carries the caller-supplied fields only; identifier, position, follower
/// state, and timestamps are assigned at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    name: TaskName,
    status: TaskStatus,
    service_id: ServiceId,
    due_date: DateTime<Utc>,
    assignee_id: Option<MemberId>,
    description: Option<String>,
    attachment_id: Option<AttachmentId>,
}

impl NewTask {
    /// Creates a request with the required fields.
    #[must_use]
    pub const fn new(
        name: TaskName,
        status: TaskStatus,
        service_id: ServiceId,
        due_date: DateTime<Utc>,
    ) -> Self {
        Self {
            name,
            status,
            service_id,
            due_date,
            assignee_id: None,
            description: None,
            attachment_id: None,
        }
    }

    /// Returns the requested workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Assigns the task to a member.
    #[must_use]
    pub fn with_assignee(mut self, assignee_id: MemberId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Attaches a free-text description.
    ///
    /// An empty or whitespace-only value is treated as no description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_empty(description.into());
        self
    }

    /// Records an uploaded attachment reference.
    #[must_use]
    pub fn with_attachment(mut self, attachment_id: AttachmentId) -> Self {
        self.attachment_id = Some(attachment_id);
        self
    }
}

/// Task aggregate root.
///
/// Ordering state (`status`, `position`) and collaboration state
/// (`followers`, history) live alongside the descriptive fields; all
/// mutation flows through [`Task::apply_patch`] so the update timestamp
/// stays coherent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    name: TaskName,
    status: TaskStatus,
    position: Position,
    assignee_id: Option<MemberId>,
    service_id: ServiceId,
    due_date: Option<DateTime<Utc>>,
    description: Option<String>,
    attachment_id: Option<AttachmentId>,
    followers: FollowerSet,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted display name.
    pub name: TaskName,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted sort position.
    pub position: Position,
    /// Persisted assignee, if any.
    pub assignee_id: Option<MemberId>,
    /// Persisted owning service.
    pub service_id: ServiceId,
    /// Persisted due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted attachment reference, if any.
    pub attachment_id: Option<AttachmentId>,
    /// Persisted follower membership.
    pub followers: FollowerSet,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task at the given bucket position.
    #[must_use]
    pub fn new(details: NewTask, position: Position, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            name: details.name,
            status: details.status,
            position,
            assignee_id: details.assignee_id,
            service_id: details.service_id,
            due_date: Some(details.due_date),
            description: details.description,
            attachment_id: details.attachment_id,
            followers: FollowerSet::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            status: data.status,
            position: data.position,
            assignee_id: data.assignee_id,
            service_id: data.service_id,
            due_date: data.due_date,
            description: data.description,
            attachment_id: data.attachment_id,
            followers: data.followers,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the sort position within the status bucket.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the assigned member, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<&MemberId> {
        self.assignee_id.as_ref()
    }

    /// Returns the owning service.
    #[must_use]
    pub const fn service_id(&self) -> &ServiceId {
        &self.service_id
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the attachment reference, if any.
    #[must_use]
    pub const fn attachment_id(&self) -> Option<&AttachmentId> {
        self.attachment_id.as_ref()
    }

    /// Returns the follower membership.
    #[must_use]
    pub const fn followers(&self) -> &FollowerSet {
        &self.followers
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update and refreshes the update timestamp.
    ///
    /// Fields the patch leaves untouched keep their current values; clear
    /// directives reset optional fields to absent.
    pub fn apply_patch(&mut self, patch: &TaskPatch, clock: &impl Clock) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(service_id) = &patch.service_id {
            self.service_id = service_id.clone();
        }
        patch.assignee.apply_to(&mut self.assignee_id);
        patch.due_date.apply_to(&mut self.due_date);
        patch.description.apply_to(&mut self.description);
        patch.attachment.apply_to(&mut self.attachment_id);
        if let Some(followers) = &patch.followers {
            self.followers = followers.clone();
        }
        self.touch(clock);
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}

/// Collapses an empty or whitespace-only string to `None`.
pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
