//! Configuration handling for gyp-to-pri
//!
//! Configuration is read from the file given with `--config`, or else from
//! `~/.config/gyp-to-pri/config.toml` (platform equivalent) when present.
//! Both are optional; defaults reproduce the classic behaviour.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::pri::LocalConfig;
use crate::domain::ExcludePatterns;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Which targets are left out of the output
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExcludeConfig {
    /// Substrings that exclude a target when found in its name
    pub patterns: Vec<String>,
}

impl Default for ExcludeConfig {
    fn default() -> Self {
        Self {
            patterns: vec!["test".to_string()],
        }
    }
}

/// Lines written to a freshly created `config.pri`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LocalConfigDefaults {
    /// Value of `TEMPLATE`
    pub template: String,

    /// Value appended to `CONFIG`
    pub config: String,
}

impl Default for LocalConfigDefaults {
    fn default() -> Self {
        let defaults = LocalConfig::default();
        Self {
            template: defaults.template,
            config: defaults.config,
        }
    }
}

/// Tool configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub exclude: ExcludeConfig,
    pub local_config: LocalConfigDefaults,
}

impl Config {
    /// Loads the explicit config file if given, otherwise the user config
    ///
    /// An explicit path must exist. A missing user config means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_file(path),
            None => match Self::user_config_path() {
                Some(path) if path.is_file() => Self::load_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Loads configuration from a specific file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Returns the user config file location
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "gyp-to-pri")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Builds the target exclusion filter
    pub fn exclude_patterns(&self) -> ExcludePatterns {
        ExcludePatterns::new(self.exclude.patterns.iter().cloned())
    }

    /// Builds the `config.pri` defaults
    pub fn local_config(&self) -> LocalConfig {
        LocalConfig {
            template: self.local_config.template.clone(),
            config: self.local_config.config.clone(),
        }
    }
}
