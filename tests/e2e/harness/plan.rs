use super::assertions::Expectation;
use super::tracker::{FakeTracker, FAKE_BASE_URL};
use anyhow::Context;
use deskprobe_core::{scenarios, Config, NoopObserver, RunReport, Runner};

/// Fluent DSL for a full run against a [`FakeTracker`]
pub struct RunPlan {
    name: String,
    tracker: FakeTracker,
    config: Config,
    only: Vec<String>,
    expectations: Vec<Expectation>,
}

impl RunPlan {
    /// Create a plan against a fresh, healthy tracker
    pub fn new(name: &str) -> Self {
        let mut config = Config::default();
        config.target.base_url = FAKE_BASE_URL.to_string();
        Self {
            name: name.to_string(),
            tracker: FakeTracker::new(),
            config,
            only: Vec::new(),
            expectations: Vec::new(),
        }
    }

    // ===== Setup =====

    /// Run against a prepared tracker
    pub fn against(mut self, tracker: FakeTracker) -> Self {
        self.tracker = tracker;
        self
    }

    /// Adjust the config before the run
    pub fn configure(mut self, f: impl FnOnce(&mut Config)) -> Self {
        f(&mut self.config);
        self
    }

    /// Restrict the run to these scenario keys
    pub fn only(mut self, keys: &[&str]) -> Self {
        self.only = keys.iter().map(|k| k.to_string()).collect();
        self
    }

    // ===== Expectations =====

    pub fn expect(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    pub fn expect_passed(self, key: &str) -> Self {
        self.expect(Expectation::Passed(key.to_string()))
    }

    pub fn expect_failed(self, key: &str) -> Self {
        self.expect(Expectation::Failed(key.to_string()))
    }

    pub fn expect_skipped(self, key: &str, missing: &[&str]) -> Self {
        self.expect(Expectation::Skipped {
            key: key.to_string(),
            missing: missing.iter().map(|m| m.to_string()).collect(),
        })
    }

    pub fn expect_all_passed(self) -> Self {
        self.expect(Expectation::AllPassed)
    }

    pub fn expect_tally(self, passed: usize, total: usize) -> Self {
        self.expect(Expectation::Tally { passed, total })
    }

    pub fn expect_step(self, key: &str, message: &str) -> Self {
        self.expect(Expectation::StepMessage {
            key: key.to_string(),
            message: message.to_string(),
        })
    }

    pub fn expect_sent(self, route: &str) -> Self {
        self.expect(Expectation::RequestSent(route.to_string()))
    }

    pub fn expect_not_sent(self, route: &str) -> Self {
        self.expect(Expectation::RequestNotSent(route.to_string()))
    }

    // ===== Execution =====

    /// Run the suite, then check every expectation in order
    pub fn run(self) -> PlanResult {
        let selected = match scenarios::select(self.only.as_slice()).context("selecting scenarios") {
            Ok(s) => s,
            Err(e) => {
                return PlanResult {
                    name: self.name,
                    report: None,
                    failure: Some((0, format!("{:?}", e))),
                }
            }
        };

        let runner = Runner::with_transport(self.config, self.tracker.clone());
        let report = runner.run(&selected, &mut NoopObserver);

        let failure = self
            .expectations
            .iter()
            .enumerate()
            .find_map(|(i, expectation)| {
                expectation
                    .check(&report, &self.tracker)
                    .err()
                    .map(|e| (i, format!("{:?}: {}", expectation, e)))
            });

        PlanResult {
            name: self.name,
            report: Some(report),
            failure,
        }
    }
}

/// Result of running a plan
#[derive(Debug)]
pub struct PlanResult {
    pub name: String,
    pub report: Option<RunReport>,
    /// Index and description of the first unmet expectation
    pub failure: Option<(usize, String)>,
}

impl PlanResult {
    /// Unwrap the result, panicking if it failed
    pub fn unwrap(self) -> RunReport {
        self.expect("plan should pass")
    }

    /// Expect the result to be successful
    pub fn expect(self, msg: &str) -> RunReport {
        match (self.failure, self.report) {
            (None, Some(report)) => report,
            (Some((index, error)), _) => panic!(
                "{}: plan '{}' failed at expectation {}: {}",
                msg, self.name, index, error
            ),
            (None, None) => panic!("{}: plan '{}' produced no report", msg, self.name),
        }
    }
}
