use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app::infrastructure::error::{AppError, Result};
use crate::app::infrastructure::fs::atomic_write;
use crate::app::services::i18n::{Lang, normalize_lang_code};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Last language picked in the selector, as a language code.
    #[serde(rename = "app-lang", default)]
    pub app_lang: Option<String>,
}

impl AppSettings {
    /// Load settings from disk, or fall back to defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::get_config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(settings) => settings,
                Err(e) => {
                    log::warn!("Failed to parse settings: {}. Using defaults.", e);
                    Self::default()
                }
            },
            // File doesn't exist yet
            Err(_) => Self::default(),
        }
    }

    /// Save settings to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AppError::Settings(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;
        atomic_write(path, json.as_bytes())?;
        Ok(())
    }

    /// Get config file path (cross-platform)
    pub fn get_config_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("excalidraw-desktop");
        path.push("settings.json");
        path
    }

    /// The stored language, normalized, or the default one.
    pub fn language(&self) -> Lang {
        self.app_lang
            .as_deref()
            .and_then(normalize_lang_code)
            .unwrap_or(Lang::DEFAULT)
    }

    pub fn set_language(&mut self, lang: Lang) {
        self.app_lang = Some(lang.code().to_string());
    }
}
