//! Run the probe suite.

use crate::commands::{load_config, with_suggestion};
use crate::{OutputFormat, TargetArgs};
use anyhow::{Context, Result};
use console::style;
use deskprobe_core::{scenarios, RunEvent, RunObserver, RunReport, Runner, ScenarioStatus, TestStep};
use indicatif::{ProgressBar, ProgressStyle};

/// Run the selected scenarios. Returns whether every scenario passed.
pub fn run(target: &TargetArgs, only: &[String], format: OutputFormat) -> Result<bool> {
    let config = load_config(target)?;
    let selected = scenarios::select(only).map_err(with_suggestion)?;
    let runner = Runner::new(config).map_err(with_suggestion)?;

    let report = match format {
        OutputFormat::Text => {
            println!(
                "{} Starting API tests against {}",
                style("→").cyan(),
                style(runner.prober().base_url()).bold()
            );
            let mut observer = ConsoleObserver::new();
            let report = runner.run(&selected, &mut observer);
            observer.finish();
            print_summary(&report);
            report
        }
        OutputFormat::Json => {
            let report = runner.run(&selected, &mut deskprobe_core::NoopObserver);
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
            println!("{}", json);
            report
        }
    };

    Ok(report.all_passed())
}

/// Prints steps as they are recorded, with a spinner while probes are in flight.
struct ConsoleObserver {
    spinner: ProgressBar,
}

impl ConsoleObserver {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { spinner }
    }

    fn finish(self) {
        self.spinner.finish_and_clear();
    }

    fn print_step(&self, step: &TestStep) {
        let marker = match (step.outcome(), step.required()) {
            (true, _) => style("✓").green(),
            (false, true) => style("×").red(),
            (false, false) => style("⚠").yellow(),
        };
        let time = step.timestamp().format("%H:%M:%S");
        self.spinner.println(format!(
            "  {} {} {}",
            style(time).dim(),
            marker,
            step.message()
        ));
        for detail in step.details() {
            self.spinner.println(format!("       - {}", detail));
        }
    }
}

impl RunObserver for ConsoleObserver {
    fn on_event(&mut self, event: &RunEvent<'_>) {
        match event {
            RunEvent::ScenarioStarted { name, .. } => {
                self.spinner.println("");
                self.spinner
                    .println(format!("{}", style(format!("Running {} tests...", name)).bold()));
                self.spinner.set_message(format!("{}...", name));
            }
            RunEvent::Step(step) => self.print_step(step),
            RunEvent::ScenarioFinished(_) => self.spinner.set_message(""),
        }
    }
}

fn print_summary(report: &RunReport) {
    println!();
    println!("{}", style("TEST SUMMARY").bold());
    println!("{}", "=".repeat(50));

    for scenario in &report.scenarios {
        match &scenario.status {
            ScenarioStatus::Passed => {
                println!("  {} {}: PASSED", style("✓").green(), scenario.name)
            }
            ScenarioStatus::Failed => {
                println!("  {} {}: FAILED", style("×").red(), scenario.name);
                if let Some(error) = &scenario.error {
                    println!("      {}", style(error).red());
                }
                for step in scenario.blocking_failures() {
                    println!("      {} {}", style("→").cyan(), step.message());
                }
            }
            ScenarioStatus::Skipped { missing } => println!(
                "  {} {}: SKIPPED (missing token for {})",
                style("×").red(),
                scenario.name,
                missing.join(", ")
            ),
        }
    }

    println!();
    let elapsed = report.finished_at - report.started_at;
    let line = format!(
        "{} in {:.1}s",
        report.summary(),
        elapsed.num_milliseconds() as f64 / 1000.0
    );
    if report.all_passed() {
        println!("{} {}", style("✓").green(), style(line).green().bold());
        println!("All API tests passed.");
    } else {
        println!("{} {}", style("⚠").yellow(), style(line).yellow().bold());
        println!("Some tests failed. Check the lines above for details.");
    }
}
