//! Configuration for a probe run.

use crate::error::{DeskprobeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default file name looked up by the CLI.
pub const DEFAULT_CONFIG_FILE: &str = "deskprobe.toml";

/// Base URL of the tracker API when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3002/api";

/// Complete configuration for a probe run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Where the backend lives.
    #[serde(default)]
    pub target: TargetConfig,

    /// Which department plays which part in the scenarios.
    #[serde(default)]
    pub roles: RolesConfig,

    /// Accounts used by the authentication scenario, in order.
    #[serde(default = "default_accounts")]
    pub accounts: Vec<Account>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            target: TargetConfig::default(),
            roles: RolesConfig::default(),
            accounts: default_accounts(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(|source| DeskprobeError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config =
            toml::from_str(&content).map_err(|e| DeskprobeError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| DeskprobeError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check values serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        self.target.parsed_base_url()?;

        if self.target.timeout_secs == Some(0) {
            return Err(DeskprobeError::ConfigInvalid(
                "target.timeout_secs must be greater than zero".into(),
            ));
        }

        for (i, account) in self.accounts.iter().enumerate() {
            if account.email.trim().is_empty() || account.department.trim().is_empty() {
                return Err(DeskprobeError::ConfigInvalid(format!(
                    "accounts[{}] needs an email and a department",
                    i
                )));
            }
        }

        for (role, department) in self.roles.named() {
            if department.trim().is_empty() {
                return Err(DeskprobeError::ConfigInvalid(format!(
                    "roles.{} must name a department",
                    role
                )));
            }
        }

        Ok(())
    }
}

/// Connection settings for the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TargetConfig {
    /// Base URL every probe path is appended to.
    pub base_url: String,

    /// Optional whole-request timeout in seconds.
    /// When unset, requests wait as long as the socket does.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
        }
    }
}

impl TargetConfig {
    /// Returns the timeout as a Duration.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Parse the base URL, rejecting anything that is not absolute http(s).
    pub fn parsed_base_url(&self) -> Result<reqwest::Url> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            DeskprobeError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: e.to_string(),
            }
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(DeskprobeError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: format!("unsupported scheme '{}'", other),
            }),
        }
    }
}

/// Department assignment for each part a scenario needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RolesConfig {
    /// Department that files issues.
    pub reporter: String,
    /// Department that lists and updates issues.
    pub handler: String,
    /// Department with access to routing, team and analytics endpoints.
    pub admin: String,
    /// Department that files expenses.
    pub finance: String,
    /// Department looked up by the team scenario.
    pub lookup_department: String,
}

impl Default for RolesConfig {
    fn default() -> Self {
        Self {
            reporter: "Tech".into(),
            handler: "HR".into(),
            admin: "HR".into(),
            finance: "Finance".into(),
            lookup_department: "Tech".into(),
        }
    }
}

impl RolesConfig {
    /// Resolve a role to the configured department label.
    pub fn department(&self, role: Role) -> &str {
        match role {
            Role::Reporter => &self.reporter,
            Role::Handler => &self.handler,
            Role::Admin => &self.admin,
            Role::Finance => &self.finance,
        }
    }

    fn named(&self) -> [(&'static str, &str); 5] {
        [
            ("reporter", &self.reporter),
            ("handler", &self.handler),
            ("admin", &self.admin),
            ("finance", &self.finance),
            ("lookup_department", &self.lookup_department),
        ]
    }
}

/// A part a scenario needs a token for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Files issues.
    Reporter,
    /// Lists and updates issues.
    Handler,
    /// Routing, team and analytics.
    Admin,
    /// Files expenses.
    Finance,
}

impl Role {
    /// Lowercase name, as used in config.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Reporter => "reporter",
            Role::Handler => "handler",
            Role::Admin => "admin",
            Role::Finance => "finance",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credentials for one department user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Account {
    /// Display name sent on signup.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Login password.
    pub password: String,
    /// Department label the token is stored under.
    pub department: String,
}

impl Account {
    /// Build the conventional test account for a department.
    pub fn for_department(department: &str) -> Self {
        Self {
            name: format!("{} Test User", department),
            email: format!("{}@test.com", department.to_lowercase()),
            password: "test123".into(),
            department: department.into(),
        }
    }
}

fn default_accounts() -> Vec<Account> {
    ["HR", "Tech", "Finance", "IT"]
        .into_iter()
        .map(Account::for_department)
        .collect()
}
