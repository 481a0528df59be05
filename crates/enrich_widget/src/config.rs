//! Host configuration, stored as RON.
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use enrich_channel::{ChannelSettings, DEFAULT_CHANNEL_NAME};
use enrich_logging::{enrich_info, enrich_warn, LogDestination};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::TemplateRecordLinks;

pub const DEFAULT_RECORD_LINK_TEMPLATE: &str = "https://app.talentis.example/persons/{id}";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub channel_name: String,
    /// Full-record URL; `{id}` is replaced by the matched record id.
    pub record_link_template: String,
    pub log_destination: LogDestination,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            channel_name: DEFAULT_CHANNEL_NAME.to_string(),
            record_link_template: DEFAULT_RECORD_LINK_TEMPLATE.to_string(),
            log_destination: LogDestination::Terminal,
            log_file: PathBuf::from("./enrich.log"),
            log_level: "info".to_string(),
        }
    }
}

impl WidgetConfig {
    pub fn channel_settings(&self) -> ChannelSettings {
        ChannelSettings {
            name: self.channel_name.clone(),
        }
    }

    pub fn record_links(&self) -> TemplateRecordLinks {
        TemplateRecordLinks::new(self.record_link_template.clone())
    }

    /// Parsed `log_level`; unknown names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(self.log_level.trim()).unwrap_or(LevelFilter::Info)
    }

    pub fn init_logging(&self) -> bool {
        enrich_logging::initialize(self.log_destination, self.level_filter(), &self.log_file)
    }
}

/// Loads configuration from `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<WidgetConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            enrich_info!("No config at {:?}; using defaults", path);
            return Ok(WidgetConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config: WidgetConfig = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    if config.channel_name.trim().is_empty() {
        enrich_warn!("Config {:?} has a blank channel name; using default", path);
        return Ok(WidgetConfig {
            channel_name: DEFAULT_CHANNEL_NAME.to_string(),
            ..config
        });
    }
    Ok(config)
}
