//! Integration tests for the flat task record codec.

use aalto::board::{
    adapters::memory::TaskRecord,
    domain::{FollowerSet, Position, Task, TaskPatch, TaskStatus},
    ports::TaskStore,
};
use chrono::Utc;
use mockable::DefaultClock;
use rstest::rstest;
use uuid::Uuid;

use super::helpers::{actor, board, member_id, new_task, BoardHarness};

fn stored_record(status: &str, followed_ids: &str) -> TaskRecord {
    let now = Utc::now();
    TaskRecord {
        id: Uuid::new_v4(),
        name: "Stored task".to_owned(),
        status: status.to_owned(),
        position: 1_000,
        assignee_id: String::new(),
        service_id: "svc-board".to_owned(),
        due_date: None,
        description: None,
        attachment_id: String::new(),
        followed_ids: followed_ids.to_owned(),
        created_at: now,
        updated_at: now,
    }
}

#[rstest]
fn empty_string_columns_decode_to_absent_fields() -> eyre::Result<()> {
    let task = stored_record("todo", "[]").try_into_domain()?;

    eyre::ensure!(task.assignee_id().is_none());
    eyre::ensure!(task.attachment_id().is_none());
    eyre::ensure!(task.followers().is_empty());
    eyre::ensure!(task.status() == TaskStatus::Todo);
    eyre::ensure!(task.position() == Position::new(1_000));
    Ok(())
}

#[rstest]
fn blank_follower_column_reads_as_an_empty_set() -> eyre::Result<()> {
    let task = stored_record("todo", "").try_into_domain()?;
    eyre::ensure!(task.followers().is_empty());
    Ok(())
}

#[rstest]
#[case::unknown_status("archived", "[]")]
#[case::malformed_followers("todo", "{not json")]
#[case::non_member_follower("todo", r#"["  "]"#)]
fn corrupt_records_are_rejected(#[case] status: &str, #[case] followed_ids: &str) {
    let result = stored_record(status, followed_ids).try_into_domain();
    assert!(result.is_err());
}

#[rstest]
fn followers_are_stored_as_a_json_identifier_array() -> eyre::Result<()> {
    let mut task = Task::new(
        new_task("Followed", TaskStatus::Todo),
        Position::new(1_000),
        &DefaultClock,
    );
    let mut followers = FollowerSet::new();
    followers.follow(member_id("member-b"));
    followers.follow(member_id("member-a"));
    task.apply_patch(&TaskPatch::new().with_followers(followers), &DefaultClock);

    let record = TaskRecord::try_from_domain(&task)?;
    eyre::ensure!(
        record.followed_ids == r#"["member-a","member-b"]"#,
        "identifiers serialise in set order"
    );

    let decoded = record.try_into_domain()?;
    eyre::ensure!(decoded.followers().len() == 2);
    eyre::ensure!(decoded.followers().follows(&member_id("member-a")));
    eyre::ensure!(decoded.followers().follows(&member_id("member-b")));
    Ok(())
}

#[rstest]
fn unfollowed_tasks_store_an_empty_array() -> eyre::Result<()> {
    let task = Task::new(
        new_task("Solitary", TaskStatus::Backlog),
        Position::new(1_000),
        &DefaultClock,
    );
    let record = TaskRecord::try_from_domain(&task)?;
    eyre::ensure!(record.followed_ids == "[]");
    eyre::ensure!(record.assignee_id.is_empty());
    eyre::ensure!(record.attachment_id.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn tasks_round_trip_through_the_store_unchanged(board: BoardHarness) -> eyre::Result<()> {
    let created = board
        .workflow
        .create_task(
            new_task("Round trip", TaskStatus::InProgress).with_description("All the details"),
            &actor(),
        )
        .await?;
    board
        .workflow
        .follow(created.task.id(), member_id("member-7"))
        .await?;

    let fetched = board
        .store
        .find_by_id(created.task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task missing after round trip"))?;

    eyre::ensure!(fetched.name().as_str() == "Round trip");
    eyre::ensure!(fetched.description() == Some("All the details"));
    eyre::ensure!(fetched.followers().follows(&member_id("member-7")));
    eyre::ensure!(fetched.status() == TaskStatus::InProgress);
    Ok(())
}
