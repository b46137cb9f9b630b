use crate::config::types::{ConfigFile, LoggingConfig, ResolvedConfig};
use shellexpand::full;
use std::path::{Path, PathBuf};
use std::{env, fs};

use dirs::home_dir;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    NotFound(String),

    #[error("failed to read config file {0}: {1}")]
    ReadError(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    ParseError(String, #[source] toml::de::Error),

    #[error("version {0} is unsupported (expected 1)")]
    BadVersion(u32),

    #[error("home directory not available to expand '~'")]
    NoHome,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load settings from `config_path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file means defaults.
    pub fn load(config_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = default_config_path();
                if !default.exists() {
                    tracing::debug!(path = %default.display(), "no config file, using defaults");
                    return Ok(ResolvedConfig::default());
                }
                default
            }
        };

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::ReadError(path.display().to_string(), e))?;

        Self::from_toml(&s, &path)
    }

    /// Parse and resolve a config document read from `path`.
    pub fn from_toml(s: &str, path: &Path) -> Result<ResolvedConfig, ConfigError> {
        let cf: ConfigFile = toml::from_str(s)
            .map_err(|e| ConfigError::ParseError(path.display().to_string(), e))?;

        if cf.version != 1 {
            return Err(ConfigError::BadVersion(cf.version));
        }

        Ok(ResolvedConfig {
            source: Some(path.to_path_buf()),
            index: cf.index,
            export: cf.export,
            logging: resolve_logging(&cf.logging)?,
        })
    }
}

fn resolve_logging(log_cfg: &LoggingConfig) -> Result<LoggingConfig, ConfigError> {
    let Some(ref file) = log_cfg.file else {
        return Ok(log_cfg.clone());
    };

    Ok(LoggingConfig {
        level: log_cfg.level.clone(),
        file_level: log_cfg.file_level.clone(),
        file: Some(expand_path(&file.to_string_lossy())?),
    })
}

pub fn default_config_path() -> PathBuf {
    if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
        return Path::new(&xdg).join("mdrefactor").join("config.toml");
    }
    let home = home_dir().unwrap_or_else(|| PathBuf::from("~"));
    home.join(".config").join("mdrefactor").join("config.toml")
}

fn expand_path(input: &str) -> Result<PathBuf, ConfigError> {
    let expanded = full(input).map_err(|_| ConfigError::NoHome)?;
    Ok(PathBuf::from(expanded.to_string()))
}
