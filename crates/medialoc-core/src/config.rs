use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{MedialocError, MedialocResult};

/// Top-level configuration (loaded from medialoc.toml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedialocConfig {
    pub keys: KeyConfig,
    pub log: LogConfig,
}

/// Cache-key derivation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Suffix used for stripped previews under a web page with no full-size sibling
    pub stripped_fallback: StrippedFallback,
}

/// How a stripped preview is keyed when nothing stable identifies it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrippedFallback {
    /// BLAKE3 of the inline bytes; stable across processes
    #[default]
    ContentHash,
    /// Address of the inline bytes; only stable within one process
    Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log level (default: info)
    pub level: String,
    /// Log format: "json" or "text"
    pub format: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

/// Where a loaded [`MedialocConfig`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    File,
    /// The file did not exist
    Defaults,
}

impl MedialocConfig {
    /// Load configuration from `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> MedialocResult<Self> {
        let (config, source) = Self::load_or_default(path)?;
        if source == ConfigSource::Defaults {
            tracing::warn!(
                "config file not found: {}  (using defaults)",
                path.display()
            );
        }
        Ok(config)
    }

    /// Like [`MedialocConfig::load`] but silent; the caller reports the fallback once
    /// logging is up.
    pub fn load_or_default(path: &Path) -> MedialocResult<(Self, ConfigSource)> {
        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Defaults));
        }
        let content = std::fs::read_to_string(path)?;
        let config: MedialocConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok((config, ConfigSource::File))
    }

    pub fn validate(&self) -> MedialocResult<()> {
        match self.log.format.as_str() {
            "json" | "text" => Ok(()),
            other => Err(MedialocError::Config(format!(
                "log.format must be \"json\" or \"text\", got {other:?}"
            ))),
        }
    }

    pub fn to_toml(&self) -> MedialocResult<String> {
        toml::to_string(self).map_err(|e| MedialocError::Config(format!("serializing config: {e}")))
    }
}
