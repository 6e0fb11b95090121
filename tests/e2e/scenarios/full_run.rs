use crate::harness::{Expectation, FakeTracker, RunPlan, FAKE_BASE_URL};
use anyhow::{anyhow, ensure};
use deskprobe_core::{scenarios, Account, Config, NoopObserver, Runner, ScenarioStatus};

#[test]
fn test_fresh_backend_passes_every_scenario() {
    let report = RunPlan::new("fresh_backend")
        .expect_all_passed()
        .expect_tally(7, 7)
        .expect_step("health", "Health check passed")
        .expect_step("auth", "Acquired tokens for Finance, HR, IT, Tech")
        .expect_step("issues", "Get all issues successful - Found 1 issues")
        .expect_step("team", "Found 1 Tech users")
        .run()
        .expect("full run should pass");

    assert_eq!(report.summary(), "Overall Results: 7/7 tests passed");
    let keys: Vec<_> = report.scenarios.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["health", "auth", "issues", "routing", "expenses", "team", "analytics"]
    );
}

#[test]
fn test_existing_users_fall_back_to_signin() {
    let tracker = FakeTracker::new()
        .with_existing_user(&Account::for_department("HR"))
        .with_existing_user(&Account::for_department("Finance"));

    RunPlan::new("existing_users")
        .against(tracker.clone())
        .expect_passed("auth")
        .expect_step("auth", "Signin successful for HR user")
        .expect_step("auth", "Signin successful for Finance user")
        .expect_step("auth", "Signup successful for Tech user")
        .expect_sent("POST /auth/signin")
        .expect_all_passed()
        .run()
        .unwrap();

    assert_eq!(tracker.user_count(), 4);
}

#[test]
fn test_issue_lifecycle_reaches_backend() {
    let tracker = FakeTracker::new();

    RunPlan::new("issue_lifecycle")
        .against(tracker.clone())
        .only(&["auth", "issues"])
        .expect_passed("issues")
        .expect_sent("PUT /issues/issue-1")
        .expect(Expectation::Custom(Box::new(|_, tracker| {
            let issues = tracker.issues();
            ensure!(issues.len() == 1, "expected one issue, got {}", issues.len());
            ensure!(
                issues[0]["status"] == "working",
                "status is {}",
                issues[0]["status"]
            );
            ensure!(issues[0]["reportedByDepartment"] == "Tech");
            Ok(())
        })))
        .run()
        .unwrap();
}

#[test]
fn test_expense_is_recorded_with_todays_date() {
    let tracker = FakeTracker::new();

    RunPlan::new("expense_recorded")
        .against(tracker.clone())
        .only(&["auth", "expenses"])
        .expect_passed("expenses")
        .expect_step("expenses", "Found 1 expenses")
        .run()
        .unwrap();

    let expenses = tracker.expenses();
    assert_eq!(expenses.len(), 1);
    assert_eq!(expenses[0]["amount"], 100.5);
    assert_eq!(expenses[0]["submittedBy"], "Finance");
    let date = expenses[0]["date"].as_str().unwrap();
    assert_eq!(date.len(), "2024-01-31".len());
}

#[test]
fn test_analytics_counts_registered_users() {
    RunPlan::new("analytics_counts")
        .expect_passed("analytics")
        .expect_step("analytics", "Summary reports 4 users")
        .expect(Expectation::Custom(Box::new(|report, _| {
            let analytics = report
                .scenarios
                .iter()
                .find(|s| s.key == "analytics")
                .ok_or_else(|| anyhow!("analytics did not run"))?;
            let summary = analytics
                .steps
                .iter()
                .find(|s| s.name() == "GET /analytics/summary")
                .ok_or_else(|| anyhow!("no summary step"))?;
            ensure!(
                summary.details().iter().any(|d| d == "Total Issues: 1"),
                "details were {:?}",
                summary.details()
            );
            Ok(())
        })))
        .run()
        .unwrap();
}

#[test]
fn test_runs_do_not_share_tokens() {
    let tracker = FakeTracker::new();
    let mut config = Config::default();
    config.target.base_url = FAKE_BASE_URL.to_string();
    let runner = Runner::with_transport(config, tracker.clone());

    let first = runner.run(&scenarios::catalog(), &mut NoopObserver);
    assert!(first.all_passed());
    let sent_after_first = tracker.requests().len();

    // No auth in the second run, so nothing may reuse the first run's tokens.
    let rest = scenarios::select(&["issues", "analytics"]).unwrap();
    let second = runner.run(&rest, &mut NoopObserver);
    assert_eq!(second.passed(), 0);
    assert!(second
        .scenarios
        .iter()
        .all(|s| matches!(s.status, ScenarioStatus::Skipped { .. })));
    assert_eq!(tracker.requests().len(), sent_after_first);
}

#[test]
fn test_only_filter_keeps_catalog_order() {
    let report = RunPlan::new("only_filter")
        .only(&["ANALYTICS", "auth", "health"])
        .expect_tally(3, 3)
        .run()
        .unwrap();

    let keys: Vec<_> = report.scenarios.iter().map(|s| s.key.as_str()).collect();
    assert_eq!(keys, vec!["health", "auth", "analytics"]);
}

#[test]
fn test_unknown_scenario_key_is_rejected() {
    let result = RunPlan::new("unknown_key").only(&["billing"]).run();
    assert!(result.report.is_none());
    let (_, error) = result.failure.unwrap();
    assert!(error.contains("billing"), "{}", error);
}

#[test]
fn test_config_file_drives_the_run() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("deskprobe.toml");
    std::fs::write(
        &path,
        format!(
            "[target]\nbase_url = \"{}\"\n\n[roles]\nlookup_department = \"Finance\"\n",
            FAKE_BASE_URL
        ),
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.roles.admin, "HR");
    assert_eq!(config.accounts.len(), 4);

    let tracker = FakeTracker::new();
    let report = Runner::with_transport(config, tracker.clone())
        .run(&scenarios::catalog(), &mut NoopObserver);
    assert!(report.all_passed());
    assert_eq!(report.base_url, FAKE_BASE_URL);
    assert!(tracker
        .requests()
        .contains(&"GET /users/department/Finance".to_string()));
}
