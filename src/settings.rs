//! Evaluator settings with persistence
//!
//! Settings are saved to `~/.config/gemforge/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// All evaluator settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GemforgeSettings {
    pub logging: LoggingSettings,
    pub evaluation: EvaluationSettings,
}

impl GemforgeSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gemforge"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Read the settings file. `Ok(None)` means there is no file yet.
    ///
    /// Nothing is logged here: this runs before the subscriber exists, so
    /// the outcome is reported later by [`or_defaults`](Self::or_defaults).
    pub fn read() -> anyhow::Result<Option<Self>> {
        let path = Self::settings_path().context("Could not determine config directory")?;
        Self::read_from(&path)
    }

    /// Read settings from a specific file
    pub fn read_from(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {:?}", path))?;
        let settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings {:?}", path))?;
        Ok(Some(settings))
    }

    /// Log how reading went and fall back to defaults where it did not work out
    pub fn or_defaults(loaded: anyhow::Result<Option<Self>>) -> Self {
        match loaded {
            Ok(Some(settings)) => {
                info!("Loaded settings");
                settings
            }
            Ok(None) => {
                info!("No settings file found, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!("{:#}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk, returning where they went
    pub fn save(&self) -> anyhow::Result<PathBuf> {
        let path = Self::settings_path().context("Could not determine config directory")?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save settings to a specific file, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset (e.g. "info", "gemforge_combine=debug")
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Recipe evaluation settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationSettings {
    /// Recipes evaluated when none are given on the command line
    pub recipes: Vec<String>,
    /// Pretty-print JSON output
    pub pretty: bool,
}
