//! Health check.

use crate::error::Result;
use crate::scenario::ScenarioContext;
use crate::transport::Method;

pub(super) fn run(ctx: &mut ScenarioContext<'_>) -> Result<()> {
    let result = ctx.probe(Method::Get, "/health", None);
    let step = if result.ok {
        let step = ctx.step("GET /health", true, "Health check passed");
        match result.str_field("message") {
            Some(message) => step.with_detail(format!("Response: {}", message)),
            None => step,
        }
    } else {
        ctx.step(
            "GET /health",
            false,
            format!("Health check failed: {}", result.failure_reason()),
        )
    };
    ctx.record(step);
    Ok(())
}
