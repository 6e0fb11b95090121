//! Built-in scenarios, in execution order.

mod analytics;
mod auth;
mod expenses;
mod health;
mod issues;
mod routing;
mod team;

use crate::config::Role;
use crate::error::{DeskprobeError, Result};
use crate::scenario::ScenarioSpec;

/// The full suite in its fixed order.
pub fn catalog() -> Vec<ScenarioSpec> {
    vec![
        ScenarioSpec {
            key: "health",
            name: "Health Check",
            requires: &[],
            action: health::run,
        },
        ScenarioSpec {
            key: "auth",
            name: "Authentication",
            requires: &[],
            action: auth::run,
        },
        ScenarioSpec {
            key: "issues",
            name: "Issues API",
            requires: &[Role::Reporter, Role::Handler],
            action: issues::run,
        },
        ScenarioSpec {
            key: "routing",
            name: "Routing API",
            requires: &[Role::Admin],
            action: routing::run,
        },
        ScenarioSpec {
            key: "expenses",
            name: "Expenses API",
            requires: &[Role::Finance],
            action: expenses::run,
        },
        ScenarioSpec {
            key: "team",
            name: "Team Management API",
            requires: &[Role::Admin],
            action: team::run,
        },
        ScenarioSpec {
            key: "analytics",
            name: "Analytics API",
            requires: &[Role::Admin],
            action: analytics::run,
        },
    ]
}

/// Scenarios whose keys appear in `keys`, still in catalog order.
///
/// An empty `keys` selects everything. Matching is case-insensitive.
pub fn select<S: AsRef<str>>(keys: &[S]) -> Result<Vec<ScenarioSpec>> {
    let all = catalog();
    if keys.is_empty() {
        return Ok(all);
    }

    let wanted: Vec<String> = keys
        .iter()
        .map(|k| k.as_ref().trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    if let Some(unknown) = wanted.iter().find(|k| !all.iter().any(|s| s.key == k.as_str())) {
        return Err(DeskprobeError::UnknownScenario(unknown.clone()));
    }

    Ok(all
        .into_iter()
        .filter(|s| wanted.iter().any(|k| k == s.key))
        .collect())
}
