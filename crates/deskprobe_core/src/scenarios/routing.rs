//! Routing suggestions and auto-routing.

use crate::config::Role;
use crate::error::Result;
use crate::scenario::ScenarioContext;
use crate::transport::Method;
use serde_json::json;

pub(super) fn run(ctx: &mut ScenarioContext<'_>) -> Result<()> {
    let suggestions = ctx.probe_as(Role::Admin, Method::Get, "/issues/routing-suggestions", None)?;
    let found = suggestions.array_len().unwrap_or(0);
    ctx.expect_ok(
        "GET /issues/routing-suggestions",
        &suggestions,
        format!("Routing suggestions successful - Found {} suggestions", found),
    );

    let routed = ctx.probe_as(Role::Admin, Method::Post, "/issues/auto-route", Some(&json!({})))?;
    let count = routed
        .field("routedCount")
        .map(|v| v.to_string())
        .unwrap_or_else(|| "0".into());
    ctx.expect_ok(
        "POST /issues/auto-route",
        &routed,
        format!("Auto-routing successful - Routed {} issues", count),
    );
    Ok(())
}
