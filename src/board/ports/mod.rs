//! Port contracts for board ordering and change history.
//!
//! Ports define infrastructure-agnostic interfaces used by board services.

pub mod directory;
pub mod history;
pub mod store;

pub use directory::{DirectoryError, DirectoryResult, MemberDirectory, ServiceDirectory};
pub use history::{HistoryStore, HistoryStoreError, HistoryStoreResult};
pub use store::{TaskFilter, TaskStore, TaskStoreError, TaskStoreResult};
