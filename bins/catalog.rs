use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use client::app::{self, Outcome};
use configs::{AppConfig, ClientConfig};
use dotenvy::dotenv;
use tracing::error;

#[derive(Parser)]
#[command(name = "catalog")]
#[command(about = "Interactive client for the product catalog service", long_about = None)]
struct Cli {
    /// Configuration file (defaults to CONFIG_PATH or config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Base URL of the catalog service, overrides the configuration
    #[arg(short, long)]
    url: Option<String>,
}

fn load_client_config(cli: &Cli) -> Result<ClientConfig> {
    let cfg = match &cli.config {
        Some(path) => AppConfig::load_path_and_validate(path)?,
        None => AppConfig::load_and_validate()?,
    };
    let mut client = cfg.client;
    if let Some(url) = &cli.url {
        client.base_url = url.clone();
        client.normalize();
        client.validate()?;
    }
    Ok(client)
}

fn main() -> ExitCode {
    dotenv().ok();
    // Console logs go to stderr; the menu owns stdout
    common::utils::logging::init_logging_with_default("warn");

    let cli = Cli::parse();
    let cfg = match load_client_config(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "catalog", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let rt = match tokio::runtime::Builder::new_current_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "catalog", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(app::run(&cfg)) {
        Ok(Outcome::Finished) => ExitCode::SUCCESS,
        Ok(Outcome::Unavailable) => ExitCode::FAILURE,
        Err(e) => {
            error!(service = "catalog", event = "run_failed", error = %e, "catalog client failed");
            ExitCode::FAILURE
        }
    }
}
