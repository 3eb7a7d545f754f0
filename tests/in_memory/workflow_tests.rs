//! End-to-end workflow integration tests over the in-memory adapters.

use aalto::board::{
    domain::{AttachmentId, HistoryAction, TaskPatch, TaskStatus, UNASSIGNED, UNKNOWN_MEMBER},
    ports::TaskFilter,
};
use chrono::{NaiveDate, TimeZone, Utc};
use rstest::rstest;

use super::helpers::{actor, board, member_id, new_task, service_id, BoardHarness};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_lifecycle_records_a_complete_narrative(board: BoardHarness) -> eyre::Result<()> {
    let created = board
        .workflow
        .create_task(new_task("Ship payment flow", TaskStatus::Todo), &actor())
        .await?;
    let id = created.task.id();

    let assigned = board
        .workflow
        .update_task(id, &TaskPatch::new().with_assignee(member_id("member-7")), &actor())
        .await?;
    let assignee_entry = assigned
        .entries
        .first()
        .ok_or_else(|| eyre::eyre!("assignee change recorded"))?;
    eyre::ensure!(assignee_entry.old_value.as_deref() == Some(UNASSIGNED));
    eyre::ensure!(assignee_entry.new_value.as_deref() == Some("Priya Nair"));

    board
        .workflow
        .move_task(id, TaskStatus::InProgress, 0, &actor())
        .await?;

    // Services registered after boot resolve like any other.
    board
        .services
        .insert(service_id("svc-payments"), "Payments")
        .expect("seed service name");
    let moved = board
        .workflow
        .update_task(
            id,
            &TaskPatch::new().with_service(service_id("svc-payments")),
            &actor(),
        )
        .await?;
    let service_entry = moved
        .entries
        .first()
        .ok_or_else(|| eyre::eyre!("service change recorded"))?;
    eyre::ensure!(
        service_entry.summary().to_string() == "Dana Keller moved task to service Payments"
    );

    board
        .workflow
        .update_task(
            id,
            &TaskPatch::new().with_attachment(AttachmentId::new("att-001")?),
            &actor(),
        )
        .await?;
    let viewed = board.workflow.record_attachment_viewed(id, &actor()).await?;
    eyre::ensure!(viewed.is_some(), "attachment view produces an entry");

    board.workflow.delete_task(id).await?;

    // The full narrative survives the task itself.
    let history = board.workflow.task_history(id).await?;
    let actions: Vec<HistoryAction> = history.iter().map(|entry| entry.action).collect();
    eyre::ensure!(
        actions
            == vec![
                HistoryAction::Created,
                HistoryAction::AssigneeChanged,
                HistoryAction::StatusChanged,
                HistoryAction::ServiceChanged,
                HistoryAction::AttachmentAdded,
                HistoryAction::AttachmentViewed,
            ]
    );
    let status_entry = history
        .iter()
        .find(|entry| entry.action == HistoryAction::StatusChanged)
        .ok_or_else(|| eyre::eyre!("status change recorded"))?;
    eyre::ensure!(
        status_entry.summary().to_string()
            == "Dana Keller changed status from Todo to In Progress"
    );
    eyre::ensure!(board.history.len()? == 6);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn member_names_resolve_at_recording_time(board: BoardHarness) -> eyre::Result<()> {
    let created = board
        .workflow
        .create_task(new_task("Resolve names", TaskStatus::Todo), &actor())
        .await?;
    let id = created.task.id();

    // member-9 is not in the directory yet.
    let unresolved = board
        .workflow
        .update_task(id, &TaskPatch::new().with_assignee(member_id("member-9")), &actor())
        .await?;
    let entry = unresolved
        .entries
        .first()
        .ok_or_else(|| eyre::eyre!("assignee change recorded"))?;
    eyre::ensure!(entry.new_value.as_deref() == Some(UNKNOWN_MEMBER));

    board
        .members
        .insert(member_id("member-9"), "Noah Brandt")
        .expect("seed member name");
    let cleared = board
        .workflow
        .update_task(id, &TaskPatch::new().clear_assignee(), &actor())
        .await?;
    let entry = cleared
        .entries
        .first()
        .ok_or_else(|| eyre::eyre!("assignee clear recorded"))?;
    eyre::ensure!(
        entry.old_value.as_deref() == Some("Noah Brandt"),
        "entries resolve against the directory as it stands when recorded"
    );
    eyre::ensure!(entry.new_value.as_deref() == Some(UNASSIGNED));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn followed_tasks_list_newest_first(board: BoardHarness) -> eyre::Result<()> {
    let older = board
        .workflow
        .create_task(new_task("Older", TaskStatus::Todo), &actor())
        .await?;
    let newer = board
        .workflow
        .create_task(new_task("Newer", TaskStatus::Todo), &actor())
        .await?;
    board.workflow.follow(older.task.id(), member_id("member-7")).await?;
    board.workflow.follow(newer.task.id(), member_id("member-7")).await?;

    let followed = board.workflow.followed_tasks(&member_id("member-7")).await?;
    let names: Vec<&str> = followed.iter().map(|task| task.name().as_str()).collect();
    eyre::ensure!(names == vec!["Newer", "Older"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_filters_combine_conjunctively(board: BoardHarness) -> eyre::Result<()> {
    let due_day = NaiveDate::from_ymd_opt(2025, 7, 4).expect("valid date");
    let due_moment = Utc
        .with_ymd_and_hms(2025, 7, 4, 9, 30, 0)
        .single()
        .expect("valid timestamp");

    let matching = board
        .workflow
        .create_task(new_task("Quarterly invoice run", TaskStatus::Todo), &actor())
        .await?;
    board
        .workflow
        .update_task(
            matching.task.id(),
            &TaskPatch::new()
                .with_assignee(member_id("member-7"))
                .with_due_date(due_moment),
            &actor(),
        )
        .await?;

    // Same assignee, different day.
    let off_day = board
        .workflow
        .create_task(new_task("Invoice reconciliation", TaskStatus::Todo), &actor())
        .await?;
    board
        .workflow
        .update_task(
            off_day.task.id(),
            &TaskPatch::new().with_assignee(member_id("member-7")),
            &actor(),
        )
        .await?;

    let filter = TaskFilter::new()
        .with_assignee(member_id("member-7"))
        .due_on(due_day)
        .with_search("invoice");
    let listed = board.workflow.list_tasks(&filter).await?;

    eyre::ensure!(listed.len() == 1);
    let found = listed.first().ok_or_else(|| eyre::eyre!("one match"))?;
    eyre::ensure!(found.id() == matching.task.id());
    Ok(())
}
