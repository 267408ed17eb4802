//! CLI configuration.
//!
//! Loaded from `schoolmark.toml` with serde defaults for every field, so a
//! missing file or an empty one both work out of the box.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use schoolmark_core::aggregate::DEFAULT_TOP_LIMIT;

/// Top-level schoolmark configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchoolmarkConfig {
    /// Where the snapshot data file lives.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// Append-only session log file.
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    /// Directory for exported reports.
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
    /// Default leaderboard size per level.
    #[serde(default = "default_top_limit")]
    pub top_limit: usize,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("schoolmark.json")
}
fn default_log_path() -> PathBuf {
    PathBuf::from("schoolmark.log")
}
fn default_report_dir() -> PathBuf {
    PathBuf::from("./reports")
}
fn default_top_limit() -> usize {
    DEFAULT_TOP_LIMIT
}

impl Default for SchoolmarkConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            log_path: default_log_path(),
            report_dir: default_report_dir(),
            top_limit: default_top_limit(),
        }
    }
}

/// Load config from an explicit path, or `schoolmark.toml` in the current
/// directory, or fall back to defaults. The `SCHOOLMARK_DATA` environment
/// variable overrides the data file path from any source.
pub fn load_config_from(path: Option<&Path>) -> Result<SchoolmarkConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("schoolmark.toml");
        local.exists().then_some(local)
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<SchoolmarkConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => SchoolmarkConfig::default(),
    };

    if let Ok(data) = std::env::var("SCHOOLMARK_DATA") {
        if !data.is_empty() {
            config.data_path = PathBuf::from(data);
        }
    }

    Ok(config)
}
