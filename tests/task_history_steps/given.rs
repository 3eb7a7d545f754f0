//! Given steps for task change history BDD scenarios.

use super::world::TaskHistoryWorld;
use aalto::board::domain::MemberId;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a member "{member}" named "{name}" is registered"#)]
fn member_registered(
    world: &mut TaskHistoryWorld,
    member: String,
    name: String,
) -> Result<(), eyre::Report> {
    world
        .members
        .insert(MemberId::new(member).wrap_err("member id")?, name)
        .wrap_err("seed member name")?;
    Ok(())
}
