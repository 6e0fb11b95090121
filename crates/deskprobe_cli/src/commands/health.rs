//! Single health probe.

use crate::commands::{load_config, with_suggestion};
use crate::TargetArgs;
use anyhow::Result;
use console::style;
use deskprobe_core::{Method, Runner};

pub fn run(target: &TargetArgs) -> Result<()> {
    let config = load_config(target)?;
    let runner = Runner::new(config).map_err(with_suggestion)?;
    let result = runner.prober().probe(Method::Get, "/health", None, None);

    if result.ok {
        println!("{} Health check passed ({})", style("✓").green(), result.status);
        if let Some(message) = result.str_field("message") {
            println!("  Response: {}", message);
        }
        Ok(())
    } else {
        anyhow::bail!(
            "Health check failed against {}: {}",
            runner.prober().base_url(),
            result.failure_reason()
        )
    }
}
