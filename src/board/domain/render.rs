//! Human-readable rendering of history entries.

use super::{HistoryAction, HistoryEntry};
use std::fmt;

/// Borrowing [`Display`](fmt::Display) adapter for one history entry.
///
/// Renders the entry as a single sentence in the voice the activity feed
/// uses, e.g. `Dana changed status from Todo to Done`. Entries whose
/// before and after detail is missing degrade to the generic update
/// sentence instead of failing.
#[derive(Debug, Clone, Copy)]
pub struct EntrySummary<'a> {
    entry: &'a HistoryEntry,
}

impl HistoryEntry {
    /// Returns a display adapter that renders this entry as a sentence.
    #[must_use]
    pub const fn summary(&self) -> EntrySummary<'_> {
        EntrySummary { entry: self }
    }
}

impl fmt::Display for EntrySummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let actor = self.entry.actor_name.as_str();
        let old_value = self.entry.old_value.as_deref();
        let new_value = self.entry.new_value.as_deref();
        match (self.entry.action, old_value, new_value) {
            (HistoryAction::Created, ..) => write!(f, "{actor} created this task"),
            (HistoryAction::NameChanged, Some(old), Some(new)) => {
                write!(f, "{actor} changed task name from \"{old}\" to \"{new}\"")
            }
            (HistoryAction::StatusChanged, Some(old), Some(new)) => {
                write!(f, "{actor} changed status from {old} to {new}")
            }
            (HistoryAction::AssigneeChanged, Some(old), Some(new)) => {
                write!(f, "{actor} changed assignee from {old} to {new}")
            }
            (HistoryAction::ServiceChanged, _, Some(new)) => {
                write!(f, "{actor} moved task to service {new}")
            }
            (HistoryAction::DueDateChanged, Some(old), Some(new)) => {
                write!(f, "{actor} changed due date from {old} to {new}")
            }
            (HistoryAction::DescriptionUpdated, ..) => {
                write!(f, "{actor} updated the description")
            }
            (HistoryAction::AttachmentAdded, ..) => write!(f, "{actor} added an attachment"),
            (HistoryAction::AttachmentRemoved, ..) => {
                write!(f, "{actor} removed the attachment")
            }
            (HistoryAction::AttachmentViewed, ..) => write!(f, "{actor} viewed the attachment"),
            _ => write!(f, "{actor} updated the task"),
        }
    }
}
