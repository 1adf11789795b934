use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, TrainerError};

/// Top-level configuration for the PitchDrill application.
///
/// Loaded from `~/.pitchdrill/config.toml` by default. Each section
/// corresponds to one subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainerConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub dictation: DictationConfig,
}

impl TrainerConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: TrainerConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
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
        let content =
            toml::to_string_pretty(self).map_err(|e| TrainerError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Reasoning-service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL of the reasoning service, without the `/api` prefix.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Dictation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DictationConfig {
    /// Human-readable language name used for objection capture.
    /// Unknown names fall back to English (en-US).
    pub language: String,
}

impl Default for DictationConfig {
    fn default() -> Self {
        Self {
            language: "English".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrainerConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert_eq!(config.service.base_url, "http://localhost:8000");
        assert_eq!(config.service.timeout_secs, 30);
        assert_eq!(config.dictation.language, "English");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let toml_str = r#"
            [service]
            base_url = "https://trainer.internal"
        "#;
        let config: TrainerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.service.base_url, "https://trainer.internal");
        assert_eq!(config.service.timeout_secs, 30);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = TrainerConfig::default();
        config.service.base_url = "http://10.0.0.5:8000".to_string();
        config.dictation.language = "Hindi".to_string();
        config.save(&path).unwrap();

        let loaded = TrainerConfig::load(&path).unwrap();
        assert_eq!(loaded.service.base_url, "http://10.0.0.5:8000");
        assert_eq!(loaded.dictation.language, "Hindi");
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = TrainerConfig::load(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = TrainerConfig::load_or_default(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.general.log_level, "info");
    }
}
