//! Seedable in-memory directories for member and service names.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{MemberId, ServiceId},
    ports::{DirectoryError, DirectoryResult, MemberDirectory, ServiceDirectory},
};

/// Thread-safe in-memory member directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberDirectory {
    members: Arc<RwLock<HashMap<MemberId, String>>>,
}

impl InMemoryMemberDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one member's display name.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the directory lock is poisoned.
    pub fn insert(&self, id: MemberId, name: impl Into<String>) -> DirectoryResult<()> {
        let mut members = self
            .members
            .write()
            .map_err(|err| DirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        members.insert(id, name.into());
        Ok(())
    }
}

#[async_trait]
impl MemberDirectory for InMemoryMemberDirectory {
    async fn member_name(&self, id: &MemberId) -> DirectoryResult<Option<String>> {
        let members = self
            .members
            .read()
            .map_err(|err| DirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        Ok(members.get(id).cloned())
    }
}

/// Thread-safe in-memory service directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryServiceDirectory {
    services: Arc<RwLock<HashMap<ServiceId, String>>>,
}

impl InMemoryServiceDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one service's display name.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the directory lock is poisoned.
    pub fn insert(&self, id: ServiceId, name: impl Into<String>) -> DirectoryResult<()> {
        let mut services = self
            .services
            .write()
            .map_err(|err| DirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        services.insert(id, name.into());
        Ok(())
    }
}

#[async_trait]
impl ServiceDirectory for InMemoryServiceDirectory {
    async fn service_name(&self, id: &ServiceId) -> DirectoryResult<Option<String>> {
        let services = self
            .services
            .read()
            .map_err(|err| DirectoryError::lookup(std::io::Error::other(err.to_string())))?;
        Ok(services.get(id).cloned())
    }
}
