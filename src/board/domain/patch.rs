//! Partial-update types with presence-aware semantics.
//!
//! A patch distinguishes three intents per optional field: leave the field
//! alone, clear it, or set a new value. Collapsing "absent from the
//! request" into "clear the field" is precisely the bug this type exists
//! to prevent.

use super::task::non_empty;
use super::{AttachmentId, FollowerSet, MemberId, Position, ServiceId, TaskName, TaskStatus};
use chrono::{DateTime, Utc};

/// Update intent for one optional field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPatch<T> {
    /// Leave the stored value untouched.
    Keep,
    /// Reset the stored value to absent.
    Clear,
    /// Replace the stored value.
    Set(T),
}

impl<T> Default for FieldPatch<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> FieldPatch<T> {
    /// Returns `true` when the field is left untouched.
    #[must_use]
    pub const fn is_keep(&self) -> bool {
        matches!(self, Self::Keep)
    }

    /// Returns the proposed stored state, or `None` when untouched.
    ///
    /// `Some(None)` means the field is being cleared; `Some(Some(value))`
    /// means it is being replaced.
    #[must_use]
    pub const fn proposed(&self) -> Option<Option<&T>> {
        match self {
            Self::Keep => None,
            Self::Clear => Some(None),
            Self::Set(value) => Some(Some(value)),
        }
    }
}

impl<T: Clone> FieldPatch<T> {
    /// Applies the intent to a stored slot.
    pub fn apply_to(&self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *slot = None,
            Self::Set(value) => *slot = Some(value.clone()),
        }
    }
}

/// Partial update to a task.
///
/// Required fields use `Option` (absent means untouched; they cannot be
/// cleared); optional fields use [`FieldPatch`] to keep the clear intent
/// distinct. Follower membership is replaced wholesale when present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement display name, when present.
    pub name: Option<TaskName>,
    /// Replacement workflow status, when present.
    pub status: Option<TaskStatus>,
    /// Replacement sort position, when present.
    pub position: Option<Position>,
    /// Replacement owning service, when present.
    pub service_id: Option<ServiceId>,
    /// Assignee update intent.
    pub assignee: FieldPatch<MemberId>,
    /// Due date update intent.
    pub due_date: FieldPatch<DateTime<Utc>>,
    /// Description update intent.
    pub description: FieldPatch<String>,
    /// Attachment update intent.
    pub attachment: FieldPatch<AttachmentId>,
    /// Replacement follower membership, when present.
    pub followers: Option<FollowerSet>,
}

impl TaskPatch {
    /// Creates a patch that touches nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the patch touches nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.status.is_none()
            && self.position.is_none()
            && self.service_id.is_none()
            && self.assignee.is_keep()
            && self.due_date.is_keep()
            && self.description.is_keep()
            && self.attachment.is_keep()
            && self.followers.is_none()
    }

    /// Renames the task.
    #[must_use]
    pub fn with_name(mut self, name: TaskName) -> Self {
        self.name = Some(name);
        self
    }

    /// Moves the task to another workflow status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Reseats the task at a new bucket position.
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Moves the task to another service.
    #[must_use]
    pub fn with_service(mut self, service_id: ServiceId) -> Self {
        self.service_id = Some(service_id);
        self
    }

    /// Assigns the task to a member.
    #[must_use]
    pub fn with_assignee(mut self, assignee_id: MemberId) -> Self {
        self.assignee = FieldPatch::Set(assignee_id);
        self
    }

    /// Removes the current assignee.
    #[must_use]
    pub fn clear_assignee(mut self) -> Self {
        self.assignee = FieldPatch::Clear;
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = FieldPatch::Set(due_date);
        self
    }

    /// Removes the due date.
    #[must_use]
    pub const fn clear_due_date(mut self) -> Self {
        self.due_date = FieldPatch::Clear;
        self
    }

    /// Replaces the description.
    ///
    /// An empty or whitespace-only value is treated as a clear.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_empty(description.into()).map_or(FieldPatch::Clear, FieldPatch::Set);
        self
    }

    /// Removes the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = FieldPatch::Clear;
        self
    }

    /// Records a newly uploaded attachment.
    #[must_use]
    pub fn with_attachment(mut self, attachment_id: AttachmentId) -> Self {
        self.attachment = FieldPatch::Set(attachment_id);
        self
    }

    /// Removes the attachment reference.
    #[must_use]
    pub fn clear_attachment(mut self) -> Self {
        self.attachment = FieldPatch::Clear;
        self
    }

    /// Replaces the follower membership.
    #[must_use]
    pub fn with_followers(mut self, followers: FollowerSet) -> Self {
        self.followers = Some(followers);
        self
    }
}
