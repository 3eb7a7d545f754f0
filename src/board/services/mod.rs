//! Application services for the board subsystem.
//!
//! Services orchestrate domain operations and coordinate between ports:
//! the ordering service allocates and repairs bucket positions, the
//! recorder turns field changes into history entries, and the workflow
//! ties both to task persistence.

mod ordering;
mod recorder;
mod workflow;

pub use ordering::{OrderingError, OrderingResult, OrderingService};
pub use recorder::HistoryRecorder;
pub use workflow::{TaskMutation, TaskWorkflow, WorkflowError, WorkflowResult};
