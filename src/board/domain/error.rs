//! Domain error types for board ordering and change tracking.
//!
//! Uses `thiserror` for ergonomic error handling with typed variants
//! that can be inspected by callers.

use super::TaskId;
use thiserror::Error;

/// Errors raised by domain-level validation and ordering arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardDomainError {
    /// A task name was empty or whitespace-only.
    #[error("task name cannot be empty")]
    EmptyTaskName,

    /// A member identifier was empty or whitespace-only.
    #[error("member identifier cannot be empty")]
    EmptyMemberId,

    /// A service identifier was empty or whitespace-only.
    #[error("service identifier cannot be empty")]
    EmptyServiceId,

    /// An attachment identifier was empty or whitespace-only.
    #[error("attachment identifier cannot be empty")]
    EmptyAttachmentId,

    /// A destination index cannot be represented as a position value.
    #[error("destination index {0} is out of the representable position range")]
    DestinationIndexOutOfRange(usize),

    /// A requested ordering referenced a task outside the bucket.
    #[error("task {0} is not part of the bucket being reordered")]
    TaskNotInBucket(TaskId),

    /// A requested ordering listed the same task more than once.
    #[error("task {0} appears more than once in the requested order")]
    DuplicateReorderEntry(TaskId),

    /// A requested ordering did not cover the whole bucket.
    #[error("requested order lists {supplied} tasks but the bucket holds {expected}")]
    IncompleteReorder {
        /// Number of tasks currently in the bucket.
        expected: usize,
        /// Number of tasks named by the request.
        supplied: usize,
    },
}

/// Error returned when parsing a task status from text fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned when parsing a history action from text fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised history action: {0}")]
pub struct ParseHistoryActionError(pub String);
