//! Field-level change detection between a task and a proposed patch.
//!
//! Detection is presence-aware: a field the patch leaves untouched is never
//! reported, and normalisation rules keep cosmetic differences (empty
//! strings, sub-day due-date precision) out of the history stream.

use super::{
    AttachmentId, HistoryAction, MemberId, ServiceId, Task, TaskName, TaskPatch, TaskStatus,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Task field referenced by a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    /// Display name.
    Name,
    /// Workflow status.
    Status,
    /// Assigned member.
    Assignee,
    /// Owning service.
    Service,
    /// Due date.
    DueDate,
    /// Free-text description.
    Description,
    /// Attachment reference.
    Attachment,
}

/// One detected difference with its typed before and after values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// Display name changed.
    Name {
        /// Name before the update.
        old: TaskName,
        /// Name after the update.
        new: TaskName,
    },
    /// Workflow status changed.
    Status {
        /// Status before the update.
        old: TaskStatus,
        /// Status after the update.
        new: TaskStatus,
    },
    /// Assignee changed, including to or from unassigned.
    Assignee {
        /// Assignee before the update.
        old: Option<MemberId>,
        /// Assignee after the update.
        new: Option<MemberId>,
    },
    /// Owning service changed.
    Service {
        /// Service before the update.
        old: ServiceId,
        /// Service after the update.
        new: ServiceId,
    },
    /// Due date changed at calendar-day granularity.
    DueDate {
        /// Due date before the update.
        old: Option<DateTime<Utc>>,
        /// Due date after the update.
        new: Option<DateTime<Utc>>,
    },
    /// Description changed after empty-string normalisation.
    Description {
        /// Description before the update.
        old: Option<String>,
        /// Description after the update.
        new: Option<String>,
    },
    /// Attachment reference changed.
    Attachment {
        /// Attachment before the update.
        old: Option<AttachmentId>,
        /// Attachment after the update.
        new: Option<AttachmentId>,
    },
}

impl FieldChange {
    /// Returns the field this change concerns.
    #[must_use]
    pub const fn field(&self) -> TaskField {
        match self {
            Self::Name { .. } => TaskField::Name,
            Self::Status { .. } => TaskField::Status,
            Self::Assignee { .. } => TaskField::Assignee,
            Self::Service { .. } => TaskField::Service,
            Self::DueDate { .. } => TaskField::DueDate,
            Self::Description { .. } => TaskField::Description,
            Self::Attachment { .. } => TaskField::Attachment,
        }
    }

    /// Returns the history action describing this change.
    ///
    /// Attachment changes split on the after state: a present value is an
    /// addition (covering replacement), an absent value a removal.
    #[must_use]
    pub const fn action(&self) -> HistoryAction {
        match self {
            Self::Name { .. } => HistoryAction::NameChanged,
            Self::Status { .. } => HistoryAction::StatusChanged,
            Self::Assignee { .. } => HistoryAction::AssigneeChanged,
            Self::Service { .. } => HistoryAction::ServiceChanged,
            Self::DueDate { .. } => HistoryAction::DueDateChanged,
            Self::Description { .. } => HistoryAction::DescriptionUpdated,
            Self::Attachment { new, .. } => {
                if new.is_some() {
                    HistoryAction::AttachmentAdded
                } else {
                    HistoryAction::AttachmentRemoved
                }
            }
        }
    }
}

/// Detects the field changes a patch would make to a task.
///
/// Fields are evaluated in a fixed order (name, status, assignee, service,
/// due date, description, attachment) so history entries for one update
/// always appear in the same sequence. Untouched fields are skipped;
/// same-value writes produce no change.
#[must_use]
pub fn diff_task(task: &Task, patch: &TaskPatch) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    if let Some(name) = &patch.name {
        if name != task.name() {
            changes.push(FieldChange::Name {
                old: task.name().clone(),
                new: name.clone(),
            });
        }
    }

    if let Some(status) = patch.status {
        if status != task.status() {
            changes.push(FieldChange::Status {
                old: task.status(),
                new: status,
            });
        }
    }

    if let Some(assignee) = patch.assignee.proposed() {
        if assignee != task.assignee_id() {
            changes.push(FieldChange::Assignee {
                old: task.assignee_id().cloned(),
                new: assignee.cloned(),
            });
        }
    }

    if let Some(service_id) = &patch.service_id {
        if service_id != task.service_id() {
            changes.push(FieldChange::Service {
                old: task.service_id().clone(),
                new: service_id.clone(),
            });
        }
    }

    if let Some(due_date) = patch.due_date.proposed() {
        let proposed_day = due_date.map(|date| date.date_naive());
        let current_day = task.due_date().map(|date| date.date_naive());
        if proposed_day != current_day {
            changes.push(FieldChange::DueDate {
                old: task.due_date(),
                new: due_date.copied(),
            });
        }
    }

    if let Some(description) = patch.description.proposed() {
        let proposed_text = normalized(description.map(String::as_str));
        let current_text = normalized(task.description());
        if proposed_text != current_text {
            changes.push(FieldChange::Description {
                old: current_text.map(ToOwned::to_owned),
                new: proposed_text.map(ToOwned::to_owned),
            });
        }
    }

    if let Some(attachment) = patch.attachment.proposed() {
        if attachment != task.attachment_id() {
            changes.push(FieldChange::Attachment {
                old: task.attachment_id().cloned(),
                new: attachment.cloned(),
            });
        }
    }

    changes
}

/// Collapses empty and whitespace-only text to absent.
fn normalized(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}
