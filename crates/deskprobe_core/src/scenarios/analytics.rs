//! Analytics summary.

use crate::config::Role;
use crate::error::Result;
use crate::scenario::ScenarioContext;
use crate::transport::Method;

/// Counters printed from the summary, with their labels.
const COUNTERS: [(&str, &str); 4] = [
    ("totalUsers", "Total Users"),
    ("totalIssues", "Total Issues"),
    ("totalExpenses", "Total Expenses"),
    ("pendingIssues", "Pending Issues"),
];

pub(super) fn run(ctx: &mut ScenarioContext<'_>) -> Result<()> {
    let summary = ctx.probe_as(Role::Admin, Method::Get, "/analytics/summary", None)?;
    if !summary.ok {
        let step = ctx.step(
            "GET /analytics/summary",
            false,
            format!("Analytics summary failed: {}", summary.failure_reason()),
        );
        ctx.record(step);
        return Ok(());
    }

    let mut step = ctx.step("GET /analytics/summary", true, "Analytics summary successful");
    for (field, label) in COUNTERS {
        let value = summary
            .field(field)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "n/a".into());
        step = step.with_detail(format!("{}: {}", label, value));
    }
    ctx.record(step);

    // at least the accounts that just authenticated exist
    let users = summary.field("totalUsers").and_then(|v| v.as_f64());
    let step = match users {
        Some(n) if n >= 1.0 => ctx.step("totalUsers", true, format!("Summary reports {} users", n)),
        Some(n) => ctx.step("totalUsers", false, format!("Summary reports {} users", n)),
        None => ctx.step("totalUsers", false, "Summary has no numeric totalUsers"),
    };
    ctx.record(step);
    Ok(())
}
