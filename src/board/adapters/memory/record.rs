//! Document-shaped task record mirroring the backing store's flat schema.
//!
//! The store keeps optional references as empty strings and follower
//! membership as a JSON-encoded string column. Those encodings stop at this
//! boundary: conversions validate on the way in and the domain only ever
//! sees typed identifiers and a real [`FollowerSet`].

use crate::board::domain::{
    AttachmentId, BoardDomainError, FollowerSet, MemberId, ParseTaskStatusError,
    PersistedTaskData, Position, ServiceId, Task, TaskId, TaskName, TaskStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Flat persistence record for one task document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Document identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Workflow status in canonical string form.
    pub status: String,
    /// Sort position within the status bucket.
    pub position: i64,
    /// Assignee identifier; empty means unassigned.
    pub assignee_id: String,
    /// Owning service identifier.
    pub service_id: String,
    /// Due date, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Free-text description, if any.
    pub description: Option<String>,
    /// Attachment identifier; empty means none.
    pub attachment_id: String,
    /// Follower membership as a JSON-encoded array of member identifiers.
    pub followed_ids: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Errors raised while decoding a stored record into the domain model.
#[derive(Debug, Error)]
pub enum RecordDecodeError {
    /// The stored status string is not a known status.
    #[error("invalid stored status: {0}")]
    Status(#[from] ParseTaskStatusError),

    /// A stored identifier or name failed domain validation.
    #[error("invalid stored field: {0}")]
    Domain(#[from] BoardDomainError),

    /// The follower column does not hold a JSON array of strings.
    #[error("invalid follower encoding: {0}")]
    Followers(#[from] serde_json::Error),
}

impl TaskRecord {
    /// Creates a record from a domain task.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when follower membership cannot be
    /// encoded.
    pub fn try_from_domain(task: &Task) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: task.id().into_inner(),
            name: task.name().as_str().to_owned(),
            status: task.status().as_str().to_owned(),
            position: task.position().value(),
            assignee_id: task
                .assignee_id()
                .map(|id| id.as_str().to_owned())
                .unwrap_or_default(),
            service_id: task.service_id().as_str().to_owned(),
            due_date: task.due_date(),
            description: task.description().map(ToOwned::to_owned),
            attachment_id: task
                .attachment_id()
                .map(|id| id.as_str().to_owned())
                .unwrap_or_default(),
            followed_ids: encode_followers(task.followers())?,
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        })
    }

    /// Rebuilds the domain task this record describes.
    ///
    /// # Errors
    ///
    /// Returns [`RecordDecodeError`] when any stored field fails validation
    /// or the follower encoding is malformed.
    pub fn try_into_domain(self) -> Result<Task, RecordDecodeError> {
        let assignee_id = match self.assignee_id.as_str() {
            "" => None,
            raw => Some(MemberId::new(raw)?),
        };
        let attachment_id = match self.attachment_id.as_str() {
            "" => None,
            raw => Some(AttachmentId::new(raw)?),
        };
        Ok(Task::from_persisted(PersistedTaskData {
            id: TaskId::from_uuid(self.id),
            name: TaskName::new(self.name)?,
            status: TaskStatus::try_from(self.status.as_str())?,
            position: Position::new(self.position),
            assignee_id,
            service_id: ServiceId::new(self.service_id)?,
            due_date: self.due_date,
            description: self.description,
            attachment_id,
            followers: decode_followers(&self.followed_ids)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }))
    }
}

/// Encodes follower membership as a JSON array of identifier strings.
pub(crate) fn encode_followers(followers: &FollowerSet) -> Result<String, serde_json::Error> {
    let ids: Vec<&str> = followers.iter().map(MemberId::as_str).collect();
    serde_json::to_string(&ids)
}

/// Decodes the follower column, treating blank content as an empty set.
pub(crate) fn decode_followers(raw: &str) -> Result<FollowerSet, RecordDecodeError> {
    if raw.trim().is_empty() {
        return Ok(FollowerSet::new());
    }
    let ids: Vec<String> = serde_json::from_str(raw)?;
    let followers = ids
        .into_iter()
        .map(MemberId::new)
        .collect::<Result<FollowerSet, BoardDomainError>>()?;
    Ok(followers)
}
