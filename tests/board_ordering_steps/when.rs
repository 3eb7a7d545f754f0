//! When steps for board column ordering BDD scenarios.

use super::world::{
    create_named_task, named_task_id, parse_column, parse_names, run_async, BoardOrderingWorld,
};
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when(r#"a task named "{name}" is created in the "{column}" column"#)]
fn create_in_column(
    world: &mut BoardOrderingWorld,
    name: String,
    column: String,
) -> Result<(), eyre::Report> {
    let status = parse_column(&column)?;
    create_named_task(world, &name, status)?;
    Ok(())
}

#[when(r#"the task named "{name}" is dropped into the "{column}" column at slot {slot:u64}"#)]
fn drop_into_column(
    world: &mut BoardOrderingWorld,
    name: String,
    column: String,
    slot: u64,
) -> Result<(), eyre::Report> {
    let status = parse_column(&column)?;
    let id = named_task_id(world, &name)?;
    let dest_index = usize::try_from(slot).wrap_err("slot index fits usize")?;
    let actor = world.actor.clone();
    run_async(world.workflow.move_task(id, status, dest_index, &actor)).wrap_err("move task")?;
    Ok(())
}

#[when(r#"the "{column}" column is reordered to "{names}""#)]
fn reorder_column(
    world: &mut BoardOrderingWorld,
    column: String,
    names: String,
) -> Result<(), eyre::Report> {
    let status = parse_column(&column)?;
    let ordered = parse_names(&names)
        .iter()
        .map(|name| named_task_id(world, name))
        .collect::<Result<Vec<_>, _>>()?;
    run_async(world.workflow.reorder_bucket(status, &ordered)).wrap_err("reorder column")?;
    Ok(())
}

#[when(r#"the "{column}" column is rebalanced"#)]
fn rebalance_column(world: &mut BoardOrderingWorld, column: String) -> Result<(), eyre::Report> {
    let status = parse_column(&column)?;
    run_async(world.workflow.rebalance_bucket(status)).wrap_err("rebalance column")?;
    Ok(())
}
