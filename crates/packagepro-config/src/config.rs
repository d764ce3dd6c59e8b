/// Application configuration: load, save, and sanitize.
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use packagepro_mod_history::config::{DEFAULT_CAPACITY, DEFAULT_DEBOUNCE_MS};
use packagepro_mod_history::HistoryConfig;

use crate::color::HexColor;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "PACKAGEPRO_CONFIG";

const CONFIG_FILE_NAME: &str = "packagepro.json";

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Max snapshots kept in the undo history (minimum 1).
    pub history_capacity: usize,
    /// Quiet period in milliseconds before an edit is recorded.
    pub debounce_ms: u64,
    /// Background color of a fresh project with no template.
    pub default_background: HexColor,
    /// Project name used before a template is chosen.
    pub default_project_name: String,
    /// Step used by the position and rotation nudge buttons.
    pub nudge_step: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_CAPACITY,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            default_background: HexColor::WHITE,
            default_project_name: String::new(),
            nudge_step: 0.1,
        }
    }
}

impl AppConfig {
    /// Returns the config file path.
    ///
    /// Resolution order:
    /// 1. `PACKAGEPRO_CONFIG` environment variable
    /// 2. `packagepro/packagepro.json` under the user's config directory
    /// 3. `packagepro.json` in the working directory
    pub fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .map(|d| d.join("packagepro").join(CONFIG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME))
    }

    /// Loads config from `path`, creating a default file if it doesn't exist.
    /// Returns defaults on any error (unreadable file, parse error, etc.).
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match Self::load(path) {
                Ok(config) => return config,
                Err(e) => tracing::warn!("{e:#}"),
            }
            // Don't overwrite a broken file.
            Self::default()
        } else {
            let config = Self::default();
            if let Err(e) = config.save(path) {
                tracing::warn!("Failed to create default config: {e:#}");
            }
            config
        }
    }

    /// Reads and sanitizes the config at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let mut config: AppConfig = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        config.sanitize();
        Ok(config)
    }

    /// Saves config to `path` as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    /// Clamps values to valid ranges.
    pub fn sanitize(&mut self) {
        self.history_capacity = self.history_capacity.max(1);
        if !self.nudge_step.is_finite() || self.nudge_step <= 0.0 {
            self.nudge_step = 0.1;
        }
    }

    /// History settings derived from this config.
    pub fn history_config(&self) -> HistoryConfig {
        HistoryConfig::new(self.history_capacity, self.debounce_ms)
    }
}
