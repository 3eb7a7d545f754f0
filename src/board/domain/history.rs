//! Change-history entries and the pure construction of entry batches.
//!
//! History is an append-only narration of task changes. Entries carry
//! pre-resolved display strings so they stay renderable after the member
//! or service they mention has been renamed or deleted.

use super::{
    EntryId, FieldChange, MemberId, ParseHistoryActionError, ServiceId, TaskField, TaskId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Display value for an absent assignee.
pub const UNASSIGNED: &str = "Unassigned";

/// Display fallback when a member lookup fails.
pub const UNKNOWN_MEMBER: &str = "Unknown User";

/// Display fallback when a service lookup fails.
pub const UNKNOWN_SERVICE: &str = "Unknown Service";

/// Display value for an absent due date.
pub const NO_DUE_DATE: &str = "None";

/// Kind of event a history entry records.
///
/// The set is closed: storage holds the canonical string form, and decoding
/// an unknown string is an error rather than a silent fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    /// Task was created.
    Created,
    /// Display name changed.
    NameChanged,
    /// Workflow status changed.
    StatusChanged,
    /// Assignee changed.
    AssigneeChanged,
    /// Owning service changed.
    ServiceChanged,
    /// Due date changed.
    DueDateChanged,
    /// Description changed.
    DescriptionUpdated,
    /// Attachment was added or replaced.
    AttachmentAdded,
    /// Attachment was removed.
    AttachmentRemoved,
    /// Attachment was viewed.
    AttachmentViewed,
    /// Unspecified update; retained as a rendering fallback.
    Updated,
}

impl HistoryAction {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::NameChanged => "name_changed",
            Self::StatusChanged => "status_changed",
            Self::AssigneeChanged => "assignee_changed",
            Self::ServiceChanged => "service_changed",
            Self::DueDateChanged => "due_date_changed",
            Self::DescriptionUpdated => "description_updated",
            Self::AttachmentAdded => "attachment_added",
            Self::AttachmentRemoved => "attachment_removed",
            Self::AttachmentViewed => "attachment_viewed",
            Self::Updated => "updated",
        }
    }
}

impl TryFrom<&str> for HistoryAction {
    type Error = ParseHistoryActionError;

    /// ```
    /// use aalto::board::domain::HistoryAction;
    ///
    /// let action = HistoryAction::try_from("status_changed")?;
    /// assert_eq!(action, HistoryAction::StatusChanged);
    /// # Ok::<(), aalto::board::domain::ParseHistoryActionError>(())
    /// ```
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "created" => Ok(Self::Created),
            "name_changed" => Ok(Self::NameChanged),
            "status_changed" => Ok(Self::StatusChanged),
            "assignee_changed" => Ok(Self::AssigneeChanged),
            "service_changed" => Ok(Self::ServiceChanged),
            "due_date_changed" => Ok(Self::DueDateChanged),
            "description_updated" => Ok(Self::DescriptionUpdated),
            "attachment_added" => Ok(Self::AttachmentAdded),
            "attachment_removed" => Ok(Self::AttachmentRemoved),
            "attachment_viewed" => Ok(Self::AttachmentViewed),
            "updated" => Ok(Self::Updated),
            _ => Err(ParseHistoryActionError(value.to_owned())),
        }
    }
}

/// The member performing an action, with the display name captured at
/// action time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Identifier of the acting member.
    pub id: MemberId,
    /// Denormalised display name recorded into entries.
    pub display_name: String,
}

impl Actor {
    /// Creates an actor.
    #[must_use]
    pub fn new(id: MemberId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            display_name: display_name.into(),
        }
    }
}

/// Limits applied while building history entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryConfig {
    /// Maximum length, in characters, of a stored before or after value.
    pub max_value_len: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_value_len: 512 }
    }
}

/// Display names resolved ahead of entry construction.
///
/// Lookups that failed are simply absent; entry construction falls back to
/// the sentinel strings rather than aborting the recording flow.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedNames {
    members: BTreeMap<MemberId, String>,
    services: BTreeMap<ServiceId, String>,
}

impl ResolvedNames {
    /// Creates an empty name table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            members: BTreeMap::new(),
            services: BTreeMap::new(),
        }
    }

    /// Records a resolved member display name.
    pub fn insert_member(&mut self, id: MemberId, name: impl Into<String>) {
        self.members.insert(id, name.into());
    }

    /// Records a resolved service display name.
    pub fn insert_service(&mut self, id: ServiceId, name: impl Into<String>) {
        self.services.insert(id, name.into());
    }

    /// Returns the resolved member name, when the lookup succeeded.
    #[must_use]
    pub fn member_name(&self, id: &MemberId) -> Option<&str> {
        self.members.get(id).map(String::as_str)
    }

    /// Returns the resolved service name, when the lookup succeeded.
    #[must_use]
    pub fn service_name(&self, id: &ServiceId) -> Option<&str> {
        self.services.get(id).map(String::as_str)
    }
}

/// One immutable record in a task's change history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Entry identifier.
    pub id: EntryId,
    /// Task the entry belongs to.
    pub task_id: TaskId,
    /// Identifier of the acting member.
    pub actor_id: MemberId,
    /// Display name of the acting member, captured at action time.
    pub actor_name: String,
    /// Kind of event recorded.
    pub action: HistoryAction,
    /// Field the entry concerns, for field-level changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<TaskField>,
    /// Display form of the value before the change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<String>,
    /// Display form of the value after the change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<String>,
    /// When the change happened. Entries built from one update share one
    /// timestamp.
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Creates an action-only entry with no field detail.
    #[must_use]
    pub fn new(
        task_id: TaskId,
        actor: &Actor,
        action: HistoryAction,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: EntryId::new(),
            task_id,
            actor_id: actor.id.clone(),
            actor_name: actor.display_name.clone(),
            action,
            field: None,
            old_value: None,
            new_value: None,
            timestamp,
        }
    }

    /// Attaches field-level before and after detail.
    #[must_use]
    pub fn with_change(
        mut self,
        field: TaskField,
        old_value: Option<String>,
        new_value: Option<String>,
    ) -> Self {
        self.field = Some(field);
        self.old_value = old_value;
        self.new_value = new_value;
        self
    }
}

/// Builds one history entry per detected change.
///
/// Entries come out in the order the changes were detected and all share
/// the supplied timestamp. Identifier-to-name resolution uses `names`;
/// misses fall back to sentinel strings so a deleted member or service can
/// never block recording.
#[must_use]
pub fn build_entries(
    task_id: TaskId,
    actor: &Actor,
    changes: &[FieldChange],
    names: &ResolvedNames,
    config: &HistoryConfig,
    timestamp: DateTime<Utc>,
) -> Vec<HistoryEntry> {
    changes
        .iter()
        .map(|change| {
            let (old_value, new_value) = change_values(change, names);
            HistoryEntry::new(task_id, actor, change.action(), timestamp).with_change(
                change.field(),
                old_value.map(|value| cap_value(value, config.max_value_len)),
                new_value.map(|value| cap_value(value, config.max_value_len)),
            )
        })
        .collect()
}

/// Returns the display form of a change's before and after values.
fn change_values(change: &FieldChange, names: &ResolvedNames) -> (Option<String>, Option<String>) {
    match change {
        FieldChange::Name { old, new } => (
            Some(old.as_str().to_owned()),
            Some(new.as_str().to_owned()),
        ),
        FieldChange::Status { old, new } => (
            Some(old.label().to_owned()),
            Some(new.label().to_owned()),
        ),
        FieldChange::Assignee { old, new } => (
            Some(assignee_display(names, old.as_ref())),
            Some(assignee_display(names, new.as_ref())),
        ),
        FieldChange::Service { old, new } => (
            Some(service_display(names, old)),
            Some(service_display(names, new)),
        ),
        FieldChange::DueDate { old, new } => (Some(due_display(*old)), Some(due_display(*new))),
        FieldChange::Description { old, new } => (old.clone(), new.clone()),
        FieldChange::Attachment { old, new } => (
            old.as_ref().map(|id| id.as_str().to_owned()),
            new.as_ref().map(|id| id.as_str().to_owned()),
        ),
    }
}

fn assignee_display(names: &ResolvedNames, assignee: Option<&MemberId>) -> String {
    assignee.map_or_else(
        || UNASSIGNED.to_owned(),
        |id| names.member_name(id).unwrap_or(UNKNOWN_MEMBER).to_owned(),
    )
}

fn service_display(names: &ResolvedNames, service: &ServiceId) -> String {
    names
        .service_name(service)
        .unwrap_or(UNKNOWN_SERVICE)
        .to_owned()
}

fn due_display(date: Option<DateTime<Utc>>) -> String {
    date.map_or_else(
        || NO_DUE_DATE.to_owned(),
        |value| value.format("%Y-%m-%d").to_string(),
    )
}

/// Truncates a value to the configured length on a character boundary.
fn cap_value(value: String, max_len: usize) -> String {
    match value.char_indices().nth(max_len) {
        Some((cut, _)) => {
            let mut capped = value;
            capped.truncate(cut);
            capped
        }
        None => value,
    }
}
