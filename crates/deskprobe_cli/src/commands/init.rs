//! Write a default config file.

use crate::commands::with_suggestion;
use anyhow::Result;
use deskprobe_core::Config;
use std::path::Path;

pub fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    let config = Config::default();
    config.save(path).map_err(with_suggestion)?;

    println!("Wrote {}", path.display());
    println!();
    println!("  Base URL:  {}", config.target.base_url);
    println!(
        "  Accounts:  {}",
        config
            .accounts
            .iter()
            .map(|a| a.department.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!(
        "  Roles:     reporter={} handler={} admin={} finance={}",
        config.roles.reporter, config.roles.handler, config.roles.admin, config.roles.finance
    );

    Ok(())
}
