//! Command-line entry point for the booth.

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Context;
use ballot_booth::Election;
use ballot_rest::RestDirectory;
use ballot_store_lmdb::environment::DEFAULT_MAP_SIZE;
use ballot_store_lmdb::LmdbEnvironment;
use ballot_utils::LogFormat;
use clap::Parser;

use crate::commands::Command;
use crate::config::{Backend, BoothConfig};

#[derive(Parser)]
#[command(name = "ballot", about = "Register, vote and verify ballots", version)]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "BALLOT_CONFIG")]
    config: Option<PathBuf>,

    /// Voter directory backend.
    #[arg(long, value_enum, env = "BALLOT_BACKEND")]
    backend: Option<Backend>,

    /// Data directory for the LMDB backend.
    #[arg(long, env = "BALLOT_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Directory for exported results and certificates.
    #[arg(long, env = "BALLOT_EXPORT_DIR")]
    export_dir: Option<PathBuf>,

    /// Log format: "human" or "json".
    #[arg(long, env = "BALLOT_LOG_FORMAT")]
    log_format: Option<String>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "BALLOT_LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Merge flags over the file config (or defaults).
    fn resolve(&self) -> anyhow::Result<BoothConfig> {
        let base = match &self.config {
            Some(path) => BoothConfig::from_toml_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => BoothConfig::default(),
        };
        Ok(BoothConfig {
            backend: self.backend.unwrap_or(base.backend),
            data_dir: self.data_dir.clone().unwrap_or(base.data_dir),
            export_dir: self.export_dir.clone().unwrap_or(base.export_dir),
            log_format: self.log_format.clone().unwrap_or(base.log_format),
            log_level: self.log_level.clone().unwrap_or(base.log_level),
            ..base
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve()?;

    let format: LogFormat = config
        .log_format
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    ballot_utils::init_logging(format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    let election = match &config.election_file {
        Some(path) => Election::from_toml_file(path)
            .with_context(|| format!("loading election from {}", path.display()))?,
        None => Election::default(),
    };

    // Results and help never touch the voter directory.
    if !cli.command.needs_directory() {
        return commands::run_offline(cli.command, &config);
    }

    match config.backend {
        Backend::Lmdb => {
            let env = LmdbEnvironment::open(&config.data_dir, DEFAULT_MAP_SIZE)
                .with_context(|| format!("opening {}", config.data_dir.display()))?;
            tracing::debug!(data_dir = %config.data_dir.display(), "using LMDB directory");
            commands::run(cli.command, &env.voter_directory(), &election, &config).await
        }
        Backend::Rest => {
            let directory = RestDirectory::new(config.rest.clone())?;
            tracing::debug!(url = %directory.table_url(), "using REST directory");
            commands::run(cli.command, &directory, &election, &config).await
        }
    }
}
