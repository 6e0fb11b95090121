//! List scenarios.

use anyhow::Result;
use console::style;
use deskprobe_core::scenarios;

pub fn run() -> Result<()> {
    println!("{}", style("Scenarios (in execution order):").bold());
    for (i, spec) in scenarios::catalog().iter().enumerate() {
        let requires = if spec.requires.is_empty() {
            "no token".to_string()
        } else {
            spec.requires
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "  {}. {:<10} {:<22} {}",
            i + 1,
            style(spec.key).cyan(),
            spec.name,
            style(format!("requires: {}", requires)).dim()
        );
    }
    Ok(())
}
