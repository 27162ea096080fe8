//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level handout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoutConfig {
    /// JSON file holding the learner's last answers.
    #[serde(default = "default_answers_path")]
    pub answers_path: PathBuf,
    /// JSON-lines file receiving flushed telemetry records.
    #[serde(default = "default_telemetry_log")]
    pub telemetry_log: PathBuf,
    /// Name attached to telemetry records.
    #[serde(default)]
    pub user: Option<String>,
}

fn default_answers_path() -> PathBuf {
    PathBuf::from("./handout-data/answers.json")
}
fn default_telemetry_log() -> PathBuf {
    PathBuf::from("./handout-data/telemetry.jsonl")
}

impl Default for HandoutConfig {
    fn default() -> Self {
        Self {
            answers_path: default_answers_path(),
            telemetry_log: default_telemetry_log(),
            user: None,
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(p: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&p.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `handout.toml` in the current directory
/// 2. `~/.config/handout/config.toml`
///
/// Environment variable overrides: `HANDOUT_ANSWERS`, `HANDOUT_TELEMETRY_LOG`,
/// `HANDOUT_USER`.
pub fn load_config() -> Result<HandoutConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<HandoutConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("handout.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => HandoutConfig::default(),
    };

    if let Ok(answers) = std::env::var("HANDOUT_ANSWERS") {
        config.answers_path = PathBuf::from(answers);
    }
    if let Ok(log) = std::env::var("HANDOUT_TELEMETRY_LOG") {
        config.telemetry_log = PathBuf::from(log);
    }
    if let Ok(user) = std::env::var("HANDOUT_USER") {
        config.user = Some(user);
    }

    config.answers_path = resolve_path(&config.answers_path);
    config.telemetry_log = resolve_path(&config.telemetry_log);
    config.user = config.user.as_deref().map(resolve_env_vars);

    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}

/// Parse a config file's contents.
pub fn parse_config_str(content: &str) -> Result<HandoutConfig> {
    Ok(toml::from_str::<HandoutConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("handout"))
}
