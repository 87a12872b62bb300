mod config;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// Core Seed - prepares a store with reference data, a first site and an administrator
#[derive(Parser)]
#[command(name = "core-seed")]
#[command(about = "Seed geography reference data and the first site, roles and administrator")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Database DSN override (selects the relational backend)
    #[arg(long)]
    dsn: Option<String>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the configured store
    Seed,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.config
        && !path.is_file()
    {
        anyhow::bail!("config file does not exist: {}", path.display());
    }

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (CORE_SEED__*) -> 4) CLI overrides
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_dsn_override(cli.dsn.as_deref());

    logging::init(&config.logging, cli.verbose);

    if cli.print_config {
        println!("Effective configuration:\n{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Seed) {
        Commands::Seed => seed(&config).await,
        Commands::Check => check_config(&config),
    }
}

async fn seed(config: &AppConfig) -> Result<()> {
    tracing::info!("Core seed starting");

    let report = core_seed::bootstrap::initialize_data(&config.core_seed).await?;
    if report.is_noop() {
        tracing::info!("Store already seeded, nothing to do");
    } else {
        tracing::info!(
            countries = report.countries_added,
            zones = report.zones_added,
            languages = report.languages_added,
            currencies = report.currencies_added,
            site = ?report.site_created,
            roles = report.roles_created,
            admin = ?report.admin_created,
            memberships = report.memberships_added,
            "Core data seeded"
        );
    }
    Ok(())
}

fn check_config(config: &AppConfig) -> Result<()> {
    tracing::info!("Checking configuration...");
    config.core_seed.validate()?;
    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}
