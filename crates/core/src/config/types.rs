use std::path::PathBuf;

use serde::Deserialize;

use crate::notes::ExportOptions;
use crate::refactor::{FormatOptions, IndexFrom, ListNumbering};

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    #[serde(default)]
    pub index: IndexConfig,
    #[serde(default)]
    pub export: ExportOptions,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Numbering applied after every transform.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// Heading depth from which index prefixes are written; 7 disables them.
    #[serde(default)]
    pub add_heading_index_from: IndexFrom,
    /// `"Increase from 1"`, `"Disabled"`, or a method name this version ignores.
    #[serde(default = "default_list_method")]
    pub list_index_handle_method: ListNumbering,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self { add_heading_index_from: IndexFrom::default(), list_index_handle_method: default_list_method() }
    }
}

impl From<&IndexConfig> for FormatOptions {
    fn from(cfg: &IndexConfig) -> Self {
        FormatOptions {
            add_heading_index_from: cfg.add_heading_index_from,
            list_index_handle_method: cfg.list_index_handle_method.clone(),
        }
    }
}

fn default_list_method() -> ListNumbering {
    ListNumbering::IncreaseFromOne
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// File the settings came from; `None` when running on defaults.
    pub source: Option<PathBuf>,
    pub index: IndexConfig,
    pub export: ExportOptions,
    pub logging: LoggingConfig,
}

impl ResolvedConfig {
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions::from(&self.index)
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            source: None,
            index: IndexConfig::default(),
            export: ExportOptions::default(),
            logging: LoggingConfig::default(),
        }
    }
}
