//! Per-scenario and per-run results.

use crate::journal::TestStep;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Final state of one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ScenarioStatus {
    /// Every required step passed.
    Passed,
    /// A required step failed or the scenario errored.
    Failed,
    /// Prerequisite tokens were missing; nothing was sent.
    Skipped {
        /// Departments without a token.
        missing: Vec<String>,
    },
}

impl ScenarioStatus {
    pub fn is_passed(&self) -> bool {
        matches!(self, ScenarioStatus::Passed)
    }
}

/// What happened in one scenario.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    /// Stable key, as accepted by `--only`.
    pub key: String,
    /// Display name.
    pub name: String,
    pub status: ScenarioStatus,
    /// Steps in the order they were recorded.
    pub steps: Vec<TestStep>,
    /// Error that aborted the scenario, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        self.status.is_passed()
    }

    /// Steps whose failure failed the scenario.
    pub fn blocking_failures(&self) -> impl Iterator<Item = &TestStep> {
        self.steps.iter().filter(|s| s.is_blocking_failure())
    }
}

/// Everything a run produced.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Base URL the run targeted.
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Scenario reports in execution order.
    pub scenarios: Vec<ScenarioReport>,
}

impl RunReport {
    /// Number of passed scenarios.
    pub fn passed(&self) -> usize {
        self.scenarios.iter().filter(|s| s.passed()).count()
    }

    /// Number of scenarios run (skipped ones included).
    pub fn total(&self) -> usize {
        self.scenarios.len()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    /// Scenarios that did not pass.
    pub fn failed(&self) -> impl Iterator<Item = &ScenarioReport> {
        self.scenarios.iter().filter(|s| !s.passed())
    }

    /// Returns a summary message.
    pub fn summary(&self) -> String {
        format!(
            "Overall Results: {}/{} tests passed",
            self.passed(),
            self.total()
        )
    }
}
