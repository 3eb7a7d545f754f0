//! Shared test helpers for in-memory adapter integration tests.

use std::sync::Arc;

use aalto::board::{
    adapters::memory::{
        InMemoryHistoryStore, InMemoryMemberDirectory, InMemoryServiceDirectory, InMemoryTaskStore,
    },
    domain::{Actor, MemberId, NewTask, ServiceId, TaskName, TaskStatus},
    services::TaskWorkflow,
};
use chrono::Utc;
use mockable::DefaultClock;
use rstest::fixture;

/// Workflow type assembled from the in-memory adapters.
pub type TestWorkflow = TaskWorkflow<
    InMemoryTaskStore,
    InMemoryMemberDirectory,
    InMemoryServiceDirectory,
    InMemoryHistoryStore,
    DefaultClock,
>;

/// Complete in-memory board wiring with handles to every adapter.
pub struct BoardHarness {
    /// Workflow under test.
    pub workflow: TestWorkflow,
    /// Task store backing the workflow.
    pub store: Arc<InMemoryTaskStore>,
    /// Member directory backing history name resolution.
    pub members: Arc<InMemoryMemberDirectory>,
    /// Service directory backing history name resolution.
    pub services: Arc<InMemoryServiceDirectory>,
    /// History store backing the recorder.
    pub history: Arc<InMemoryHistoryStore>,
}

/// Provides a fully wired in-memory board with seeded directories.
#[fixture]
pub fn board() -> BoardHarness {
    let store = Arc::new(InMemoryTaskStore::new());
    let members = Arc::new(InMemoryMemberDirectory::new());
    let services = Arc::new(InMemoryServiceDirectory::new());
    let history = Arc::new(InMemoryHistoryStore::new());

    members
        .insert(member_id("member-actor"), "Dana Keller")
        .expect("seed actor name");
    members
        .insert(member_id("member-7"), "Priya Nair")
        .expect("seed member name");
    services
        .insert(service_id("svc-board"), "Board")
        .expect("seed service name");
    services
        .insert(service_id("svc-billing"), "Billing")
        .expect("seed service name");

    let workflow = TaskWorkflow::new(
        Arc::clone(&store),
        Arc::clone(&members),
        Arc::clone(&services),
        Arc::clone(&history),
        Arc::new(DefaultClock),
    );
    BoardHarness {
        workflow,
        store,
        members,
        services,
        history,
    }
}

/// Builds a validated member identifier.
pub fn member_id(raw: &str) -> MemberId {
    MemberId::new(raw).expect("valid member id")
}

/// Builds a validated service identifier.
pub fn service_id(raw: &str) -> ServiceId {
    ServiceId::new(raw).expect("valid service id")
}

/// The member performing actions in these tests.
pub fn actor() -> Actor {
    Actor::new(member_id("member-actor"), "Dana Keller")
}

/// Builds a creation request owned by the board service.
pub fn new_task(name: &str, status: TaskStatus) -> NewTask {
    NewTask::new(
        TaskName::new(name).expect("valid task name"),
        status,
        service_id("svc-board"),
        Utc::now(),
    )
}
