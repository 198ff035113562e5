use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::Result;

/// Top-level configuration for the VoicePad application.
///
/// Loaded from `~/.voicepad/config.toml` by default. Each section covers one
/// concern; every field has a serde default so partial files parse.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoicepadConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl VoicepadConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: VoicepadConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration, falling back to defaults if the file does not
    /// exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Data directory for the SQLite reminder store.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.voicepad/data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Recognizer options handed to the speech capability at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// BCP 47 language tag for recognition.
    pub language: String,
    /// Whether the capability should report interim (not yet final) results.
    pub interim_results: bool,
    /// Maximum alternatives per fragment. The session consumes only the first.
    pub max_alternatives: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            interim_results: true,
            max_alternatives: 1,
        }
    }
}
