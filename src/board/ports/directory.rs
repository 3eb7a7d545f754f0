//! Directory ports resolving identifiers to display names.
//!
//! Member and service records belong to other subsystems; the board only
//! needs their display names while narrating history. Lookups distinguish
//! "unknown identifier" (`Ok(None)`) from "lookup infrastructure failed"
//! (`Err`); the recorder treats both as resolution misses.

use crate::board::domain::{MemberId, ServiceId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory lookups.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Resolves member identifiers to display names.
#[async_trait]
pub trait MemberDirectory: Send + Sync {
    /// Returns the member's display name, or `None` when unknown.
    async fn member_name(&self, id: &MemberId) -> DirectoryResult<Option<String>>;
}

/// Resolves service identifiers to display names.
#[async_trait]
pub trait ServiceDirectory: Send + Sync {
    /// Returns the service's display name, or `None` when unknown.
    async fn service_name(&self, id: &ServiceId) -> DirectoryResult<Option<String>>;
}

/// Failure of the directory lookup infrastructure.
#[derive(Debug, Clone, Error)]
#[error("directory lookup failed: {0}")]
pub struct DirectoryError(Arc<dyn std::error::Error + Send + Sync>);

impl DirectoryError {
    /// Wraps a lookup error.
    pub fn lookup(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self(Arc::new(err))
    }
}
