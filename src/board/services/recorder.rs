//! Change-history recording service.
//!
//! Turns field changes into history entries: the recorder resolves
//! member and service identifiers to display names, stamps each batch
//! with a single timestamp, and appends the entries to the history
//! store. Name resolution failures never block recording; the entry
//! falls back to a fixed placeholder instead.

use std::sync::Arc;

use mockable::Clock;

use crate::board::{
    domain::{
        build_entries, Actor, FieldChange, HistoryAction, HistoryConfig, HistoryEntry, MemberId,
        ResolvedNames, ServiceId, Task, TaskId,
    },
    ports::{HistoryStore, HistoryStoreResult, MemberDirectory, ServiceDirectory},
};

/// Builds and appends history entries for task changes.
#[derive(Clone)]
pub struct HistoryRecorder<M, D, H, K>
where
    M: MemberDirectory,
    D: ServiceDirectory,
    H: HistoryStore,
    K: Clock + Send + Sync,
{
    members: Arc<M>,
    services: Arc<D>,
    history: Arc<H>,
    clock: Arc<K>,
    config: HistoryConfig,
}

impl<M, D, H, K> HistoryRecorder<M, D, H, K>
where
    M: MemberDirectory,
    D: ServiceDirectory,
    H: HistoryStore,
    K: Clock + Send + Sync,
{
    /// Creates a recorder with the default value-length cap.
    #[must_use]
    pub fn new(members: Arc<M>, services: Arc<D>, history: Arc<H>, clock: Arc<K>) -> Self {
        Self::with_config(members, services, history, clock, HistoryConfig::default())
    }

    /// Creates a recorder with an explicit history configuration.
    #[must_use]
    pub const fn with_config(
        members: Arc<M>,
        services: Arc<D>,
        history: Arc<H>,
        clock: Arc<K>,
        config: HistoryConfig,
    ) -> Self {
        Self {
            members,
            services,
            history,
            clock,
            config,
        }
    }

    /// Records the creation entry for a freshly persisted task.
    ///
    /// # Errors
    ///
    /// Returns the history store error when the append fails.
    pub async fn record_created(
        &self,
        task: &Task,
        actor: &Actor,
    ) -> HistoryStoreResult<HistoryEntry> {
        let entry = HistoryEntry::new(task.id(), actor, HistoryAction::Created, self.clock.utc());
        self.history.append(&entry).await?;
        Ok(entry)
    }

    /// Records one history entry per field change, sharing one timestamp
    /// across the batch.
    ///
    /// An empty change set records nothing and returns an empty vector.
    ///
    /// # Errors
    ///
    /// Returns the history store error when the batch append fails.
    pub async fn record_changes(
        &self,
        task_id: TaskId,
        actor: &Actor,
        changes: &[FieldChange],
    ) -> HistoryStoreResult<Vec<HistoryEntry>> {
        if changes.is_empty() {
            return Ok(Vec::new());
        }
        let names = self.resolve_names(changes).await;
        let entries = build_entries(
            task_id,
            actor,
            changes,
            &names,
            &self.config,
            self.clock.utc(),
        );
        self.history.append_batch(&entries).await?;
        Ok(entries)
    }

    /// Records that the actor viewed the task's attachment.
    ///
    /// # Errors
    ///
    /// Returns the history store error when the append fails.
    pub async fn record_attachment_viewed(
        &self,
        task_id: TaskId,
        actor: &Actor,
    ) -> HistoryStoreResult<HistoryEntry> {
        let entry = HistoryEntry::new(
            task_id,
            actor,
            HistoryAction::AttachmentViewed,
            self.clock.utc(),
        );
        self.history.append(&entry).await?;
        Ok(entry)
    }

    /// Returns the recorded history for a task, oldest first.
    ///
    /// # Errors
    ///
    /// Returns the history store error when the query fails.
    pub async fn entries_for_task(&self, task_id: TaskId) -> HistoryStoreResult<Vec<HistoryEntry>> {
        self.history.entries_for_task(task_id).await
    }

    /// Looks up display names for every member and service mentioned in
    /// the changes. Missing or failed lookups are left unresolved.
    async fn resolve_names(&self, changes: &[FieldChange]) -> ResolvedNames {
        let mut names = ResolvedNames::new();
        for change in changes {
            match change {
                FieldChange::Assignee { old, new } => {
                    for member in [old.as_ref(), new.as_ref()].into_iter().flatten() {
                        self.resolve_member(&mut names, member).await;
                    }
                }
                FieldChange::Service { old, new } => {
                    self.resolve_service(&mut names, old).await;
                    self.resolve_service(&mut names, new).await;
                }
                _ => {}
            }
        }
        names
    }

    async fn resolve_member(&self, names: &mut ResolvedNames, member: &MemberId) {
        match self.members.member_name(member).await {
            Ok(Some(name)) => names.insert_member(member.clone(), name),
            Ok(None) => {}
            Err(err) => {
                tracing::debug!(member = %member, error = %err, "member name lookup failed");
            }
        }
    }

    async fn resolve_service(&self, names: &mut ResolvedNames, service: &ServiceId) {
        match self.services.service_name(service).await {
            Ok(Some(name)) => names.insert_service(service.clone(), name),
            Ok(None) => {}
            Err(err) => {
                tracing::debug!(service = %service, error = %err, "service name lookup failed");
            }
        }
    }
}
