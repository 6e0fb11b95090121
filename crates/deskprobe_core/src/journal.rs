//! Recorded steps of a run.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One verified probe or derived check.
///
/// Built with [`TestStep::new`] and the `with_*` adapters, then handed to the
/// run context. Immutable once recorded.
#[derive(Debug, Clone, Serialize)]
pub struct TestStep {
    scenario: String,
    name: String,
    outcome: bool,
    required: bool,
    message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    details: Vec<String>,
    timestamp: DateTime<Utc>,
}

impl TestStep {
    /// A required step, timestamped now.
    pub fn new(
        scenario: impl Into<String>,
        name: impl Into<String>,
        outcome: bool,
        message: impl Into<String>,
    ) -> Self {
        Self {
            scenario: scenario.into(),
            name: name.into(),
            outcome,
            required: true,
            message: message.into(),
            details: Vec::new(),
            timestamp: Utc::now(),
        }
    }

    /// Mark the step as advisory: its failure does not fail the scenario.
    pub fn advisory(mut self) -> Self {
        self.required = false;
        self
    }

    /// Append a follow-up line.
    pub fn with_detail(mut self, line: impl Into<String>) -> Self {
        self.details.push(line.into());
        self
    }

    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the check passed.
    pub fn outcome(&self) -> bool {
        self.outcome
    }

    /// Whether a failure fails the scenario.
    pub fn required(&self) -> bool {
        self.required
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> &[String] {
        &self.details
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// True if this step fails its scenario.
    pub fn is_blocking_failure(&self) -> bool {
        self.required && !self.outcome
    }
}
