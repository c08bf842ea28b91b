//! `config.toml` settings

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

// Default value functions for serde
fn default_language() -> String {
    inilens::description::FALLBACK_LANGUAGE.to_string()
}
fn default_label_extensions() -> Vec<String> {
    inilens::labels::DEFAULT_LABEL_EXTENSIONS
        .iter()
        .map(|ext| (*ext).to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Language used for description lookups
    #[serde(default = "default_language")]
    pub language: String,
    /// Dictionary root file listing one description file per language
    #[serde(default)]
    pub dictionary: Option<PathBuf>,
    /// Extensions treated as label files, without the dot
    #[serde(default = "default_label_extensions")]
    pub label_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: default_language(),
            dictionary: None,
            label_extensions: default_label_extensions(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("inilens").join("config.toml"))
    }

    /// Load `explicit`, or the default file if it exists, or built-in defaults
    ///
    /// An explicitly named file must exist.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
