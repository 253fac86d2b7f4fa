//! RTFM Bot - Main Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use rtfm_bot::RtfmBot;
use rtfm_common::init_logging;
use rtfm_config::{ConfigLoader, ConfigValidator};
use std::path::PathBuf;
use tracing::info;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overriding the configuration file
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let dotenv = ConfigLoader::load_dotenv();
    let args = Args::parse();

    let config_path = ConfigLoader::locate(args.config.as_deref());
    let mut config =
        ConfigLoader::read(config_path.as_deref()).context("failed to load configuration")?;

    if let Some(level) = args.log_level {
        config.logging.level = level;
    }
    init_logging(&config.logging).context("failed to initialise logging")?;

    info!("Starting RTFM Bot v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = dotenv {
        info!("Environment loaded from {}", path.display());
    }
    match &config_path {
        Some(path) => info!("Configuration loaded from {}", path.display()),
        None => info!("No configuration file found, using defaults"),
    }

    ConfigValidator::validate(&config).context("invalid configuration")?;
    info!(
        database = %config.database.path.display(),
        plugins = %config.plugins.directory.display(),
        "Configuration validated"
    );

    RtfmBot::new(config).run().await?;

    info!("RTFM Bot stopped");
    Ok(())
}
