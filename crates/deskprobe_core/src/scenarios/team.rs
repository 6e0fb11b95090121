//! Team and department user lookup.

use crate::config::Role;
use crate::error::Result;
use crate::scenario::ScenarioContext;
use crate::transport::Method;

pub(super) fn run(ctx: &mut ScenarioContext<'_>) -> Result<()> {
    let team = ctx.probe_as(Role::Admin, Method::Get, "/teams/my-team", None)?;
    ctx.expect_ok("GET /teams/my-team", &team, "Get team successful");

    let department = ctx.config().roles.lookup_department.clone();
    let path = format!("/users/department/{}", department);
    let users = ctx.probe_as(Role::Admin, Method::Get, &path, None)?;
    let found = users.array_len().unwrap_or(0);
    ctx.expect_ok(
        &format!("GET {}", path),
        &users,
        format!(
            "Get users by department successful - Found {} {} users",
            found, department
        ),
    );
    Ok(())
}
