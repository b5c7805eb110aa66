use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use cosmivity_probe::config::ProbeConfig;
use cosmivity_probe::probe::{self, Target};
use cosmivity_probe::{build_info, logging};

/// Runs the comprehensive Cosmivity backend probe suite
#[derive(Debug, Parser)]
#[command(
    name = "cosmivity-probe",
    version,
    long_version = build_info::LONG_VERSION
)]
struct Cli {
    /// Configuration profile (loads config/<profile>.toml)
    #[arg(long, env = "PROBE_PROFILE", default_value = "default")]
    profile: String,

    /// Override the backend base URL, e.g. http://localhost:8001
    #[arg(long)]
    base_url: Option<String>,

    /// Attach the mock bearer token to auth-gated probes
    #[arg(long)]
    send_mock_token: bool,

    /// Print a results table after the summary
    #[arg(long)]
    table: bool,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = ProbeConfig::load(&cli.profile)
        .with_context(|| format!("failed to load profile '{}'", cli.profile))?;
    if let Some(base_url) = cli.base_url {
        config.target.base_url = base_url;
    }
    if cli.send_mock_token {
        config.auth.send_mock_token = true;
    }
    info!(
        build = %build_info::version_string(),
        profile = %config.profile,
        base_url = %config.target.base_url,
        "Loaded probe configuration"
    );

    let target = Target::new(config).context("failed to prepare HTTP client")?;

    println!("🚀 Starting Cosmivity Backend API Tests");
    println!("{}", "=".repeat(50));

    let ledger = probe::comprehensive_suite().run(&target);
    ledger.summarize();
    if cli.table {
        probe::print_table(&ledger);
    }

    Ok(ExitCode::from(ledger.exit_code()))
}
