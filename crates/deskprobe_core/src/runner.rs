//! Fixed-order scenario dispatcher.

use crate::config::Config;
use crate::error::Result;
use crate::journal::TestStep;
use crate::probe::Prober;
use crate::report::{RunReport, ScenarioReport, ScenarioStatus};
use crate::scenario::{RunEvent, RunObserver, ScenarioContext, ScenarioSpec};
use crate::tokens::TokenSet;
use crate::transport::{HttpTransport, Transport};
use chrono::Utc;
use tracing::{debug, warn};

/// Runs scenarios in order against one backend.
///
/// Each call to [`Runner::run`] starts from an empty [`TokenSet`], so runs
/// never share credentials.
pub struct Runner {
    prober: Prober,
    config: Config,
}

impl Runner {
    /// Runner that talks HTTP to `config.target`.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.target.timeout())?;
        Ok(Self::with_transport(config, transport))
    }

    /// Runner over any transport. The config is taken as given.
    pub fn with_transport(config: Config, transport: impl Transport + 'static) -> Self {
        let prober = Prober::new(&config.target.base_url, Box::new(transport));
        Self { prober, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn prober(&self) -> &Prober {
        &self.prober
    }

    /// Run `scenarios` in the given order and collect the report.
    pub fn run(&self, scenarios: &[ScenarioSpec], observer: &mut dyn RunObserver) -> RunReport {
        let started_at = Utc::now();
        let mut tokens = TokenSet::new();
        let mut reports = Vec::with_capacity(scenarios.len());

        for spec in scenarios {
            observer.on_event(&RunEvent::ScenarioStarted {
                key: spec.key,
                name: spec.name,
            });
            let report = self.run_one(spec, &mut tokens, observer);
            observer.on_event(&RunEvent::ScenarioFinished(&report));
            reports.push(report);
        }

        RunReport {
            base_url: self.prober.base_url().to_string(),
            started_at,
            finished_at: Utc::now(),
            scenarios: reports,
        }
    }

    fn run_one(
        &self,
        spec: &ScenarioSpec,
        tokens: &mut TokenSet,
        observer: &mut dyn RunObserver,
    ) -> ScenarioReport {
        let missing = self.missing_departments(spec, tokens);
        if !missing.is_empty() {
            warn!(scenario = spec.name, ?missing, "skipping, prerequisite tokens missing");
            let step = TestStep::new(
                spec.name,
                "prerequisites",
                false,
                format!("Missing token for {} ({})", missing.join(", "), spec.name),
            );
            observer.on_event(&RunEvent::Step(&step));
            return ScenarioReport {
                key: spec.key.to_string(),
                name: spec.name.to_string(),
                status: ScenarioStatus::Skipped { missing },
                steps: vec![step],
                error: None,
            };
        }

        let mut ctx = ScenarioContext::new(spec.name, &self.prober, &self.config, tokens, observer);
        let outcome = (spec.action)(&mut ctx);
        let steps = ctx.into_steps();

        let (status, error) = match outcome {
            Err(e) => {
                warn!(scenario = spec.name, error = %e, "scenario aborted");
                (ScenarioStatus::Failed, Some(e.to_string()))
            }
            Ok(()) if steps.iter().any(TestStep::is_blocking_failure) => {
                (ScenarioStatus::Failed, None)
            }
            Ok(()) => (ScenarioStatus::Passed, None),
        };
        debug!(scenario = spec.name, ?status, steps = steps.len(), "scenario finished");

        ScenarioReport {
            key: spec.key.to_string(),
            name: spec.name.to_string(),
            status,
            steps,
            error,
        }
    }

    /// Departments required by `spec` that hold no token, deduplicated.
    fn missing_departments(&self, spec: &ScenarioSpec, tokens: &TokenSet) -> Vec<String> {
        let mut missing: Vec<String> = Vec::new();
        for role in spec.requires {
            let department = self.config.roles.department(*role);
            if !tokens.contains(department) && !missing.iter().any(|d| d == department) {
                missing.push(department.to_string());
            }
        }
        missing
    }
}
