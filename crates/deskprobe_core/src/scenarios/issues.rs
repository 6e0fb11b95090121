//! Issue lifecycle: create as the reporter, list and update as the handler.

use crate::config::Role;
use crate::error::Result;
use crate::scenario::ScenarioContext;
use crate::transport::Method;
use serde_json::{json, Value};

pub(super) fn run(ctx: &mut ScenarioContext<'_>) -> Result<()> {
    let reporter = ctx.department(Role::Reporter);
    let issue = json!({
        "title": "Test Issue - API Test",
        "description": "This is a test issue created by API testing",
        "category": "Software",
        "priority": "Medium",
        "reportedByDepartment": reporter,
    });

    let created = ctx.probe_as(Role::Reporter, Method::Post, "/issues", Some(&issue))?;
    if !ctx.expect_ok("POST /issues", &created, "Issue creation successful") {
        return Ok(());
    }
    let id = record_id(&created.data);
    let step = match &id {
        Some(id) => ctx.step("issue id", true, format!("Created issue {}", id)),
        None => ctx.step("issue id", false, "Created issue carries no identifier"),
    };
    ctx.record(step);

    let listed = ctx.probe_as(Role::Handler, Method::Get, "/issues", None)?;
    let step = match (listed.ok, listed.data.as_array()) {
        (true, Some(issues)) => {
            let listed_created = match &id {
                Some(id) => issues.iter().any(|i| record_id(i).as_ref() == Some(id)),
                None => true,
            };
            if listed_created {
                ctx.step(
                    "GET /issues",
                    true,
                    format!("Get all issues successful - Found {} issues", issues.len()),
                )
            } else {
                ctx.step(
                    "GET /issues",
                    false,
                    format!(
                        "Get all issues omits created issue {} ({} issues listed)",
                        id.as_deref().unwrap_or_default(),
                        issues.len()
                    ),
                )
            }
        }
        (true, None) => ctx.step("GET /issues", false, "Get all issues returned no list"),
        (false, _) => ctx.step(
            "GET /issues",
            false,
            format!("Get all issues failed: {}", listed.failure_reason()),
        ),
    };
    ctx.record(step);

    if let Some(id) = id {
        let path = format!("/issues/{}", id);
        let updated = ctx.probe_as(
            Role::Handler,
            Method::Put,
            &path,
            Some(&json!({ "status": "working" })),
        )?;
        ctx.expect_ok(&format!("PUT {}", path), &updated, "Issue status update successful");
    }
    Ok(())
}

/// Identifier of a record: `_id`, or `id` as a fallback.
fn record_id(record: &Value) -> Option<String> {
    ["_id", "id"]
        .iter()
        .filter_map(|key| record.get(key))
        .find_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}
