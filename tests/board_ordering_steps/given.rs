//! Given steps for board column ordering BDD scenarios.

use super::world::{create_named_task, parse_column, parse_names, BoardOrderingWorld};
use rstest_bdd_macros::given;

#[given(r#"the "{column}" column holds "{names}""#)]
fn column_holds(
    world: &mut BoardOrderingWorld,
    column: String,
    names: String,
) -> Result<(), eyre::Report> {
    let status = parse_column(&column)?;
    for name in parse_names(&names) {
        create_named_task(world, &name, status)?;
    }
    Ok(())
}
