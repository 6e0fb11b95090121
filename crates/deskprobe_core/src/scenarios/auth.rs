//! Authentication: acquire one token per configured department account.
//!
//! Each account first tries to sign up. A rejected signup (typically because
//! the user already exists) or one that returns no token falls back to
//! signing in with the same credentials. Per-account outcomes are advisory;
//! the scenario passes as long as at least one token was acquired.

use crate::config::Account;
use crate::error::Result;
use crate::journal::TestStep;
use crate::probe::ProbeResult;
use crate::scenario::ScenarioContext;
use crate::transport::Method;
use serde_json::json;
use tracing::debug;

pub(super) fn run(ctx: &mut ScenarioContext<'_>) -> Result<()> {
    let accounts = ctx.config().accounts.clone();

    for account in &accounts {
        let signup = ctx.probe(
            Method::Post,
            "/auth/signup",
            Some(&json!({
                "name": account.name,
                "email": account.email,
                "password": account.password,
                "department": account.department,
            })),
        );
        if let Some(token) = token_of(&signup) {
            let step = store(ctx, account, token, "Signup");
            ctx.record(step.advisory());
            continue;
        }
        debug!(
            department = %account.department,
            reason = %signup.failure_reason(),
            "signup did not yield a token, trying signin"
        );

        let signin = ctx.probe(
            Method::Post,
            "/auth/signin",
            Some(&json!({
                "email": account.email,
                "password": account.password,
            })),
        );
        let step = match token_of(&signin) {
            Some(token) => store(ctx, account, token, "Signin"),
            None => ctx.step(
                &account.department,
                false,
                failure_message(account, &signin),
            ),
        };
        ctx.record(step.advisory());
    }

    let acquired: Vec<String> = ctx.tokens().departments().map(String::from).collect();
    let step = if acquired.is_empty() {
        ctx.step("tokens", false, "No department token acquired")
    } else {
        ctx.step(
            "tokens",
            true,
            format!("Acquired tokens for {}", acquired.join(", ")),
        )
    };
    ctx.record(step);
    Ok(())
}

/// The bearer token of a successful auth response. Blank tokens count as none.
fn token_of(result: &ProbeResult) -> Option<&str> {
    if result.ok {
        result.str_field("token").filter(|t| !t.trim().is_empty())
    } else {
        None
    }
}

/// Keep the token for the account's department. A rejected token fails only
/// this account.
fn store(ctx: &mut ScenarioContext<'_>, account: &Account, token: &str, via: &str) -> TestStep {
    match ctx.tokens_mut().insert(&account.department, token) {
        Ok(()) => ctx.step(
            &account.department,
            true,
            format!("{} successful for {} user", via, account.department),
        ),
        Err(e) => ctx.step(
            &account.department,
            false,
            format!("Authentication failed for {} user: {}", account.department, e),
        ),
    }
}

fn failure_message(account: &Account, signin: &ProbeResult) -> String {
    let reason = if signin.ok {
        "response carried no token".to_string()
    } else {
        signin.failure_reason()
    };
    format!(
        "Authentication failed for {} user: {}",
        account.department, reason
    )
}
