//! Booth configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use ballot_rest::RestConfig;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Where voter records live.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Local LMDB directory under `data_dir`.
    Lmdb,
    /// Hosted table reached over HTTP.
    Rest,
}

/// Configuration for the `ballot` binary.
///
/// Loaded from a TOML file via [`BoothConfig::from_toml_file`]; command-line
/// flags and `BALLOT_*` environment variables override file values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BoothConfig {
    #[serde(default = "default_backend")]
    pub backend: Backend,

    /// LMDB directory for the local backend.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Settings for the REST backend.
    #[serde(default)]
    pub rest: RestConfig,

    /// Ballot definition. The built-in demo election is used when unset.
    #[serde(default)]
    pub election_file: Option<PathBuf>,

    /// Where CSV results and certificates are written.
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_backend() -> Backend {
    Backend::Lmdb
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./ballot_data")
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl BoothConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            data_dir: default_data_dir(),
            rest: RestConfig::default(),
            election_file: None,
            export_dir: default_export_dir(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
