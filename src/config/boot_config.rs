use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{BootError, BootResult};

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct BootSetting {
    /// Name of the template to bootstrap.
    #[serde(default = "default_template")]
    pub template: String,
    #[serde(default = "default_template_dir")]
    pub template_dir: String,
    /// Loaded right after the bootstrap, if set.
    #[serde(default)]
    pub first_scene: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct LogSetting {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct BootConfig {
    #[serde(default)]
    pub boot: BootSetting,
    #[serde(default)]
    pub log: LogSetting,
}

fn default_template() -> String {
    "PersistentObjects".to_owned()
}

fn default_template_dir() -> String {
    "assets/templates".to_owned()
}

fn default_level() -> String {
    "info".to_owned()
}

impl Default for BootSetting {
    fn default() -> Self {
        Self {
            template: default_template(),
            template_dir: default_template_dir(),
            first_scene: None,
        }
    }
}

impl Default for LogSetting {
    fn default() -> Self {
        Self {
            level: default_level(),
            file: None,
        }
    }
}

impl LogSetting {
    /// Unknown level names fall back to `Info`.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

impl BootConfig {
    pub fn parse(s: &str) -> BootResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> BootResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| BootError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content)
    }

    /// 讀不到設定檔時使用預設值
    ///
    /// Runs before the logger exists, so the reason for falling back is
    /// handed to the caller instead of being logged here.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> (Self, Option<BootError>) {
        match Self::from_file(path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}
