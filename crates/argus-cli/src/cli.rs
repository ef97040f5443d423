use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "argus", version)]
#[command(about = "Command-line client for the Argus mobile app security scanner", long_about = None)]
pub struct Cli {
    /// Path to config file (default: ./argus.toml)
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// API host URL (takes precedence over --region)
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Hosted region name (global, saudi)
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// API access token
    #[arg(long, global = true, env = "ARGUS_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    pub insecure: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Gate a CI pipeline on static findings at or above a risk threshold
    Cicheck {
        /// File id of the uploaded app
        file_id: String,
        /// Minimum risk to report (low, medium, high, critical)
        #[arg(short = 'r', long, default_value = "low")]
        risk_threshold: String,
        /// Minutes to wait for the static scan to finish
        #[arg(short = 't', long, default_value_t = 30)]
        timeout: u64,
    },
    /// Report the status and findings of the latest dynamic scan
    Dastcheck {
        /// File id of the uploaded app
        file_id: String,
        /// Minimum risk to report (low, medium, high, critical)
        #[arg(short = 'r', long, default_value = "low")]
        risk_threshold: String,
        /// Minutes to wait for an in-progress scan to finish
        #[arg(short = 't', long, default_value_t = 60)]
        timeout: u64,
    },
    /// Export static findings as a SARIF report
    Sarif {
        /// File id of the uploaded app
        file_id: String,
        /// Minimum risk to report (low, medium, high, critical)
        #[arg(short = 'r', long, default_value = "low")]
        risk_threshold: String,
        /// Minutes to wait for the static scan to finish
        #[arg(short = 't', long, default_value_t = 30)]
        timeout: u64,
        /// Where to write the report
        #[arg(short = 'o', long, default_value = "report.sarif")]
        output: PathBuf,
    },
    /// Queue a new automated dynamic scan for a file
    ScheduleDastAutomation {
        /// File id of the uploaded app
        file_id: String,
    },
}
