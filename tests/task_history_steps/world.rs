//! Shared world state for task change history BDD scenarios.

use std::sync::Arc;

use aalto::board::{
    adapters::memory::{
        InMemoryHistoryStore, InMemoryMemberDirectory, InMemoryServiceDirectory, InMemoryTaskStore,
    },
    domain::{Actor, HistoryEntry, MemberId, TaskId},
    services::TaskWorkflow,
};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;

/// Workflow type used by the BDD world.
pub type TestWorkflow = TaskWorkflow<
    InMemoryTaskStore,
    InMemoryMemberDirectory,
    InMemoryServiceDirectory,
    InMemoryHistoryStore,
    DefaultClock,
>;

/// Scenario world for task change history behaviour tests.
pub struct TaskHistoryWorld {
    pub workflow: TestWorkflow,
    pub members: Arc<InMemoryMemberDirectory>,
    pub current_task: Option<TaskId>,
    pub actor: Actor,
}

impl TaskHistoryWorld {
    /// Creates a world with an empty board and an empty member directory.
    #[must_use]
    pub fn new() -> Self {
        let members = Arc::new(InMemoryMemberDirectory::new());
        let workflow = TaskWorkflow::new(
            Arc::new(InMemoryTaskStore::new()),
            Arc::clone(&members),
            Arc::new(InMemoryServiceDirectory::new()),
            Arc::new(InMemoryHistoryStore::new()),
            Arc::new(DefaultClock),
        );
        let actor = Actor::new(
            MemberId::new("member-actor").expect("valid member id"),
            "Dana Keller",
        );
        Self {
            workflow,
            members,
            current_task: None,
            actor,
        }
    }
}

impl Default for TaskHistoryWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskHistoryWorld {
    TaskHistoryWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Returns the task the scenario is working on.
pub fn current_task(world: &TaskHistoryWorld) -> Result<TaskId, eyre::Report> {
    world
        .current_task
        .ok_or_else(|| eyre::eyre!("no task created in scenario world"))
}

/// Fetches the recorded history for the scenario's task, oldest first.
pub fn task_entries(world: &TaskHistoryWorld) -> Result<Vec<HistoryEntry>, eyre::Report> {
    let id = current_task(world)?;
    run_async(world.workflow.task_history(id)).wrap_err("read task history")
}
