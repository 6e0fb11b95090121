//! CLI commands.

pub mod health;
pub mod init;
pub mod list;
pub mod run;

use crate::TargetArgs;
use anyhow::{Context, Result};
use deskprobe_core::{Config, DeskprobeError};

/// Load the config file and apply command-line overrides.
pub(crate) fn load_config(target: &TargetArgs) -> Result<Config> {
    let mut config = Config::load(&target.config)
        .map_err(with_suggestion)
        .with_context(|| format!("Failed to load {}", target.config.display()))?;
    if let Some(base_url) = &target.base_url {
        config.target.base_url = base_url.clone();
        config.validate().map_err(with_suggestion)?;
    }
    Ok(config)
}

/// Attach the recovery hint, if there is one, to a core error.
pub(crate) fn with_suggestion(err: DeskprobeError) -> anyhow::Error {
    match err.recovery_suggestion() {
        Some(hint) => anyhow::anyhow!("{}\n  hint: {}", err, hint),
        None => anyhow::Error::new(err),
    }
}
