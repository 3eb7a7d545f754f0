//! Shared world state for board column ordering BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use aalto::board::{
    adapters::memory::{
        InMemoryHistoryStore, InMemoryMemberDirectory, InMemoryServiceDirectory, InMemoryTaskStore,
    },
    domain::{Actor, MemberId, NewTask, ServiceId, Task, TaskId, TaskName, TaskStatus},
    services::TaskWorkflow,
};
use chrono::Utc;
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

/// Scenario world for board column ordering behaviour tests.
pub struct BoardOrderingWorld {
    pub workflow: TestWorkflow,
    pub store: Arc<InMemoryTaskStore>,
    pub task_ids: HashMap<String, TaskId>,
    pub actor: Actor,
}

impl BoardOrderingWorld {
    /// Creates a world with an empty board.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(InMemoryTaskStore::new());
        let workflow = TaskWorkflow::new(
            Arc::clone(&store),
            Arc::new(InMemoryMemberDirectory::new()),
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
            store,
            task_ids: HashMap::new(),
            actor,
        }
    }
}

impl Default for BoardOrderingWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> BoardOrderingWorld {
    BoardOrderingWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Parses a feature-file column name into a workflow status.
pub fn parse_column(name: &str) -> Result<TaskStatus, eyre::Report> {
    TaskStatus::try_from(name).wrap_err("parse column name")
}

/// Splits a comma-separated list of task names from a feature file.
pub fn parse_names(list: &str) -> Vec<String> {
    list.split(',').map(|name| name.trim().to_owned()).collect()
}

/// Creates a task in the given column and remembers it by name.
pub fn create_named_task(
    world: &mut BoardOrderingWorld,
    name: &str,
    status: TaskStatus,
) -> Result<Task, eyre::Report> {
    let details = NewTask::new(
        TaskName::new(name).wrap_err("task name")?,
        status,
        ServiceId::new("svc-board").wrap_err("service id")?,
        Utc::now(),
    );
    let actor = world.actor.clone();
    let mutation =
        run_async(world.workflow.create_task(details, &actor)).wrap_err("create task")?;
    world.task_ids.insert(name.to_owned(), mutation.task.id());
    Ok(mutation.task)
}

/// Looks up the identifier remembered for a named task.
pub fn named_task_id(world: &BoardOrderingWorld, name: &str) -> Result<TaskId, eyre::Report> {
    world
        .task_ids
        .get(name)
        .copied()
        .ok_or_else(|| eyre::eyre!("unknown task name in scenario: {name}"))
}
