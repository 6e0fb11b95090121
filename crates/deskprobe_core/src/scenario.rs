//! Declarative scenario descriptors and the context their actions run in.

use crate::config::{Config, Role};
use crate::error::{DeskprobeError, Result};
use crate::journal::TestStep;
use crate::probe::{ProbeResult, Prober};
use crate::report::ScenarioReport;
use crate::tokens::TokenSet;
use crate::transport::Method;
use serde_json::Value;
use std::fmt;
use tracing::{info, warn};

/// Body of a scenario.
///
/// Sub-step failures are recorded on the context, not returned. An `Err`
/// means the scenario could not carry on at all.
pub type ScenarioAction = fn(&mut ScenarioContext<'_>) -> Result<()>;

/// A named, ordered unit of the suite.
#[derive(Clone, Copy)]
pub struct ScenarioSpec {
    /// Stable lowercase key.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Roles whose department tokens must exist before the action runs.
    pub requires: &'static [Role],
    pub action: ScenarioAction,
}

impl fmt::Debug for ScenarioSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScenarioSpec")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("requires", &self.requires)
            .finish()
    }
}

/// Something that happened during a run.
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// A scenario is about to run.
    ScenarioStarted {
        key: &'a str,
        name: &'a str,
    },
    /// A step was recorded.
    Step(&'a TestStep),
    /// A scenario finished, passed or not.
    ScenarioFinished(&'a ScenarioReport),
}

/// Receives run events as they happen.
pub trait RunObserver {
    fn on_event(&mut self, event: &RunEvent<'_>);
}

impl<F> RunObserver for F
where
    F: FnMut(&RunEvent<'_>),
{
    fn on_event(&mut self, event: &RunEvent<'_>) {
        self(event)
    }
}

/// Observer that ignores everything.
pub struct NoopObserver;

impl RunObserver for NoopObserver {
    fn on_event(&mut self, _event: &RunEvent<'_>) {}
}

/// Everything a scenario action may touch.
pub struct ScenarioContext<'a> {
    name: &'static str,
    prober: &'a Prober,
    config: &'a Config,
    tokens: &'a mut TokenSet,
    observer: &'a mut dyn RunObserver,
    steps: Vec<TestStep>,
}

impl<'a> ScenarioContext<'a> {
    pub(crate) fn new(
        name: &'static str,
        prober: &'a Prober,
        config: &'a Config,
        tokens: &'a mut TokenSet,
        observer: &'a mut dyn RunObserver,
    ) -> Self {
        Self {
            name,
            prober,
            config,
            tokens,
            observer,
            steps: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    pub fn tokens(&self) -> &TokenSet {
        self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut TokenSet {
        self.tokens
    }

    /// Department label configured for a role.
    pub fn department(&self, role: Role) -> &'a str {
        self.config.roles.department(role)
    }

    /// Probe without authentication.
    pub fn probe(&self, method: Method, path: &str, body: Option<&Value>) -> ProbeResult {
        self.prober.probe(method, path, body, None)
    }

    /// Probe with the token of the department configured for `role`.
    pub fn probe_as(
        &self,
        role: Role,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<ProbeResult> {
        let department = self.department(role);
        let token = self
            .tokens
            .get(department)
            .ok_or_else(|| DeskprobeError::MissingToken {
                role,
                department: department.to_string(),
            })?;
        Ok(self.prober.probe(method, path, body, Some(token)))
    }

    /// Start a required step attributed to this scenario.
    pub fn step(&self, name: impl Into<String>, outcome: bool, message: impl Into<String>) -> TestStep {
        TestStep::new(self.name, name, outcome, message)
    }

    /// Record a finished step and announce it.
    pub fn record(&mut self, step: TestStep) {
        if step.outcome() {
            info!(scenario = self.name, step = step.name(), "{}", step.message());
        } else {
            warn!(
                scenario = self.name,
                step = step.name(),
                required = step.required(),
                "{}",
                step.message()
            );
        }
        self.steps.push(step);
        if let Some(step) = self.steps.last() {
            self.observer.on_event(&RunEvent::Step(step));
        }
    }

    /// Record a required step for a probe, passing iff the probe was ok.
    ///
    /// Returns the probe's `ok` so callers can chain dependent probes.
    pub fn expect_ok(
        &mut self,
        label: &str,
        result: &ProbeResult,
        success: impl Into<String>,
    ) -> bool {
        let step = if result.ok {
            self.step(label, true, success)
        } else {
            self.step(
                label,
                false,
                format!("{} failed: {}", label, result.failure_reason()),
            )
        };
        self.record(step);
        result.ok
    }

    pub(crate) fn into_steps(self) -> Vec<TestStep> {
        self.steps
    }
}
