//! Expense filing and listing.

use crate::config::Role;
use crate::error::Result;
use crate::scenario::ScenarioContext;
use crate::transport::Method;
use chrono::Utc;
use serde_json::json;

pub(super) fn run(ctx: &mut ScenarioContext<'_>) -> Result<()> {
    let expense = json!({
        "description": "Test Expense - API Test",
        "amount": 100.50,
        "category": "Office Supplies",
        "date": Utc::now().format("%Y-%m-%d").to_string(),
    });

    let created = ctx.probe_as(Role::Finance, Method::Post, "/expenses", Some(&expense))?;
    if !ctx.expect_ok("POST /expenses", &created, "Expense creation successful") {
        return Ok(());
    }

    let listed = ctx.probe_as(Role::Finance, Method::Get, "/expenses", None)?;
    let found = listed.array_len().unwrap_or(0);
    ctx.expect_ok(
        "GET /expenses",
        &listed,
        format!("Get all expenses successful - Found {} expenses", found),
    );
    Ok(())
}
