mod cli;
mod commands;
mod progress;

use anyhow::{anyhow, Result};
use argus_client::ApiClient;
use argus_config::{load_config, Overrides};
use argus_core::RiskLevel;
use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process::exit;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(found_vulnerabilities) => {
            if found_vulnerabilities {
                exit(1);
            } else {
                exit(0);
            }
        }
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let mut config = load_config(cli.config.as_deref())?;
    config.apply(Overrides {
        access_token: cli.access_token.clone(),
        region: cli.region.clone(),
        host: cli.host.clone(),
        insecure: cli.insecure,
    });
    let resolved = config.resolve()?;
    let api = ApiClient::new(&resolved)?;

    match &cli.command {
        Commands::Cicheck {
            file_id,
            risk_threshold,
            timeout,
        } => commands::cicheck::cicheck(
            &api,
            parse_file_id(file_id)?,
            parse_threshold(risk_threshold)?,
            *timeout,
        ),
        Commands::Dastcheck {
            file_id,
            risk_threshold,
            timeout,
        } => commands::dastcheck::dastcheck(
            &api,
            parse_file_id(file_id)?,
            parse_threshold(risk_threshold)?,
            *timeout,
        ),
        Commands::Sarif {
            file_id,
            risk_threshold,
            timeout,
            output,
        } => commands::sarif::sarif(
            &api,
            parse_file_id(file_id)?,
            parse_threshold(risk_threshold)?,
            *timeout,
            output,
        ),
        Commands::ScheduleDastAutomation { file_id } => {
            commands::schedule::schedule(&api, parse_file_id(file_id)?)
        }
    }
}

// Positional arguments stay strings in clap so that validation failures
// share the single fatal-error exit path instead of clap's usage-error
// exit code.
fn parse_file_id(raw: &str) -> Result<u64> {
    raw.parse().map_err(|_| anyhow!("valid file id is required"))
}

fn parse_threshold(raw: &str) -> Result<RiskLevel> {
    Ok(raw.parse::<RiskLevel>()?)
}
