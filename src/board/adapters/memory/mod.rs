//! In-memory adapter implementations for testing.
//!
//! These adapters provide simple, thread-safe implementations suitable for
//! unit and behaviour testing without a document database. The task store
//! keeps documents in their flat record shape so encode and decode paths
//! stay exercised.

mod directory;
mod history;
mod record;
mod store;

pub use directory::{InMemoryMemberDirectory, InMemoryServiceDirectory};
pub use history::InMemoryHistoryStore;
pub use record::{RecordDecodeError, TaskRecord};
pub use store::InMemoryTaskStore;
