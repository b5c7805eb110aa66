use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use cosmivity_probe::config::ProbeConfig;
use cosmivity_probe::probe::Target;
use cosmivity_probe::{build_info, logging, quick};

/// Runs the quick Cosmivity backend probes and prints each verdict
#[derive(Debug, Parser)]
#[command(
    name = "cosmivity-quick-probe",
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
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let mut config = ProbeConfig::load(&cli.profile)
        .with_context(|| format!("failed to load profile '{}'", cli.profile))?;
    if let Some(base_url) = cli.base_url {
        config.target.base_url = base_url;
    }
    info!(
        profile = %config.profile,
        base_url = %config.target.base_url,
        "Quick probe run"
    );

    let target = Target::new(config).context("failed to prepare HTTP client")?;

    println!("🚀 Simple Backend API Tests");
    println!("{}", "=".repeat(40));

    let verdicts = quick::run_quick(&target);
    let succeeded = verdicts.iter().filter(|(_, v)| v.is_success()).count();
    info!(
        succeeded,
        total = verdicts.len(),
        "Quick probe run finished"
    );

    println!("\n✅ Simple tests completed!");
    Ok(())
}
