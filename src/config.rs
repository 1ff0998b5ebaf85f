use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::query::QueryService;

pub struct AppState {
    pub service: QueryService,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: usize,
    /// path to the JSON document holding the nurse records
    pub data_path: PathBuf,

    /// request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Config {
    /// Whether the data file is currently present as a regular file.
    pub async fn data_file_exists(&self) -> bool {
        tokio::fs::metadata(&self.data_path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }
}

fn default_timeout() -> u64 {
    10
}

/// Parse the config file into Config struct.
pub async fn parse_config(filepath: &str) -> Result<Config> {
    let content = tokio::fs::read_to_string(filepath)
        .await
        .context("failed to read config file")?;

    from_toml(&content)
}

/// Parse and validate a config from toml text. The data file itself is not
/// checked, a missing file is served as an empty directory.
pub fn from_toml(content: &str) -> Result<Config> {
    let c: Config = toml::from_str(content).context("failed to convert toml config data")?;

    if !hostname_validator::is_valid(&c.host) {
        return Err(anyhow::Error::msg(format!("host '{}' is invalid", c.host)));
    }

    if c.port > 65535 {
        return Err(anyhow::Error::msg(format!(
            "port '{}' is invalid, must be between [0, 65535]",
            c.port
        )));
    }

    if c.timeout_secs < 1 || c.timeout_secs > 300 {
        return Err(anyhow::Error::msg(format!(
            "timeout in seconds '{}' is invalid, must be between [1, 300]",
            c.timeout_secs
        )));
    }

    Ok(c)
}
