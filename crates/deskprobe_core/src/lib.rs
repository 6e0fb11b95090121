//! deskprobe core library
//!
//! Sequential HTTP probes against the multi-department issue tracker API:
//! - A probe runner that never fails, only classifies
//! - A transport seam so every scenario runs against a scripted backend
//! - Declarative scenarios executed by a fixed-order dispatcher
//! - Reports with a pass/fail tally
//!
//! # Quick Start
//!
//! ```
//! use deskprobe_core::{Config, Method, Prober, ProbeRequest, RawResponse, TransportError};
//!
//! let transport = |_: &ProbeRequest| -> Result<RawResponse, TransportError> {
//!     Ok(RawResponse::text(200, r#"{"message":"ok"}"#))
//! };
//! let prober = Prober::new(&Config::default().target.base_url, Box::new(transport));
//!
//! let result = prober.probe(Method::Get, "/health", None, None);
//! assert!(result.ok);
//! assert_eq!(result.str_field("message"), Some("ok"));
//! ```
//!
//! # Running the suite
//!
//! ```no_run
//! use deskprobe_core::{scenarios, Config, NoopObserver, Runner};
//!
//! let runner = Runner::new(Config::default()).unwrap();
//! let report = runner.run(&scenarios::catalog(), &mut NoopObserver);
//! println!("{}", report.summary());
//! ```

mod config;
mod error;
mod journal;
mod probe;
mod report;
mod runner;
mod scenario;
pub mod scenarios;
mod tokens;
mod transport;

pub use config::{
    Account, Config, RolesConfig, Role, TargetConfig, DEFAULT_BASE_URL, DEFAULT_CONFIG_FILE,
};
pub use error::{DeskprobeError, Result};
pub use journal::TestStep;
pub use probe::{ProbeResult, Prober};
pub use report::{RunReport, ScenarioReport, ScenarioStatus};
pub use runner::Runner;
pub use scenario::{
    NoopObserver, RunEvent, RunObserver, ScenarioAction, ScenarioContext, ScenarioSpec,
};
pub use tokens::TokenSet;
pub use transport::{HttpTransport, Method, ProbeRequest, RawResponse, Transport, TransportError};
