//! When steps for task change history BDD scenarios.

use super::world::{current_task, run_async, TaskHistoryWorld};
use aalto::board::domain::{MemberId, NewTask, ServiceId, TaskName, TaskPatch, TaskStatus};
use chrono::Utc;
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"a task named "{name}" is created"#)]
fn create_task(world: &mut TaskHistoryWorld, name: String) -> Result<(), eyre::Report> {
    let details = NewTask::new(
        TaskName::new(name).wrap_err("task name")?,
        TaskStatus::Todo,
        ServiceId::new("svc-board").wrap_err("service id")?,
        Utc::now(),
    );
    let actor = world.actor.clone();
    let mutation =
        run_async(world.workflow.create_task(details, &actor)).wrap_err("create task")?;
    world.current_task = Some(mutation.task.id());
    Ok(())
}

#[when(r#"the task is moved to the "{column}" column"#)]
fn move_task(world: &mut TaskHistoryWorld, column: String) -> Result<(), eyre::Report> {
    let id = current_task(world)?;
    let status = TaskStatus::try_from(column.as_str()).wrap_err("parse column name")?;
    let actor = world.actor.clone();
    run_async(world.workflow.move_task(id, status, 0, &actor)).wrap_err("move task")?;
    Ok(())
}

#[when(r#"the task is assigned to "{member}""#)]
fn assign_task(world: &mut TaskHistoryWorld, member: String) -> Result<(), eyre::Report> {
    let id = current_task(world)?;
    let patch = TaskPatch::new().with_assignee(MemberId::new(member).wrap_err("member id")?);
    let actor = world.actor.clone();
    run_async(world.workflow.update_task(id, &patch, &actor)).wrap_err("assign task")?;
    Ok(())
}

#[when("the task is deleted")]
fn delete_task(world: &mut TaskHistoryWorld) -> Result<(), eyre::Report> {
    let id = current_task(world)?;
    run_async(world.workflow.delete_task(id)).wrap_err("delete task")?;
    Ok(())
}
