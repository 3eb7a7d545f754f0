//! Domain model for board ordering and change history.
//!
//! This module contains pure domain types with no infrastructure
//! dependencies: position arithmetic, presence-aware patches, field-level
//! change detection, and history entry construction are all expressed as
//! plain data and functions so every ordering and narration rule can be
//! exercised without a store.

mod diff;
mod error;
mod followers;
mod history;
mod ids;
mod ordering;
mod patch;
mod position;
mod render;
mod status;
mod task;

pub use diff::{diff_task, FieldChange, TaskField};
pub use error::{BoardDomainError, ParseHistoryActionError, ParseTaskStatusError};
pub use followers::FollowerSet;
pub use history::{
    build_entries, Actor, HistoryAction, HistoryConfig, HistoryEntry, ResolvedNames, NO_DUE_DATE,
    UNASSIGNED, UNKNOWN_MEMBER, UNKNOWN_SERVICE,
};
pub use ids::{AttachmentId, EntryId, MemberId, ServiceId, TaskId};
pub use ordering::{plan_rebalance, plan_reorder, Placement};
pub use patch::{FieldPatch, TaskPatch};
pub use position::{OrderingConfig, Position};
pub use render::EntrySummary;
pub use status::TaskStatus;
pub use task::{NewTask, PersistedTaskData, Task, TaskName};
