//! deskprobe CLI - probe the issue tracker API and report what works.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "deskprobe")]
#[command(about = "Integration probes for the multi-department issue tracker API", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the probe suite
    Run {
        #[command(flatten)]
        target: TargetArgs,
        /// Only run these scenarios (comma-separated keys)
        #[arg(long, value_delimiter = ',')]
        only: Vec<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List scenarios in execution order
    List,
    /// Probe the health endpoint once
    Health {
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Write a default config file
    Init {
        /// Config file to write
        #[arg(short, long, default_value = deskprobe_core::DEFAULT_CONFIG_FILE)]
        config: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Where the config comes from and what to override.
#[derive(clap::Args)]
pub struct TargetArgs {
    /// Config file (defaults apply when it does not exist)
    #[arg(short, long, default_value = deskprobe_core::DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Override target.base_url
    #[arg(long)]
    pub base_url: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Live colored lines and a summary
    Text,
    /// The run report as JSON on stdout
    Json,
}

fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Respects RUST_LOG environment variable (e.g., RUST_LOG=debug)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            target,
            only,
            format,
        } => {
            let all_passed = commands::run::run(&target, &only, format)?;
            if !all_passed {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::List => commands::list::run(),
        Commands::Health { target } => commands::health::run(&target),
        Commands::Init { config, force } => commands::init::run(&config, force),
    }
}
