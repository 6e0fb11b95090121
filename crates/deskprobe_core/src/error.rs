//! Error types for deskprobe_core operations.

use crate::config::Role;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for deskprobe_core operations.
///
/// Transport failures are deliberately absent: a probe converts them into a
/// failed [`ProbeResult`](crate::ProbeResult) instead of an error.
#[derive(Error, Debug)]
pub enum DeskprobeError {
    /// Configuration file could not be read or written.
    #[error("config I/O error at {}: {}", path.display(), source)]
    ConfigIo {
        /// Path of the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for [`Config`](crate::Config).
    #[error("failed to parse config: {0}")]
    ConfigParse(String),

    /// Configuration parsed but holds an unusable value.
    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    /// The base URL cannot be used to build request URLs.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// A scenario key passed to a filter does not name a known scenario.
    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),

    /// A scenario asked for a token that was never acquired.
    #[error("no token for {role} (department {department})")]
    MissingToken {
        /// Role the scenario asked for
        role: Role,
        /// Department configured for that role
        department: String,
    },

    /// Attempted to store an empty bearer token.
    #[error("empty token for department {0}")]
    EmptyToken(String),

    /// Configuration could not be written out as TOML.
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

impl DeskprobeError {
    /// Returns a user-friendly recovery suggestion for the error, if available.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            Self::ConfigParse(_) | Self::ConfigInvalid(_) => {
                Some("Run 'deskprobe init --force' to write a fresh default config.")
            }
            Self::InvalidBaseUrl { .. } => {
                Some("Use an absolute URL such as http://localhost:3002/api.")
            }
            Self::UnknownScenario(_) => Some("Run 'deskprobe list' to see scenario keys."),
            Self::MissingToken { .. } => {
                Some("Check that an account for that department is listed under [[accounts]].")
            }
            _ => None,
        }
    }
}

/// Convenience Result type for deskprobe_core operations.
pub type Result<T> = std::result::Result<T, DeskprobeError>;
