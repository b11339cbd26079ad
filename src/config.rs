use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{DdayError, DisplayLocale, Result};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding the event slot file
    pub data_dir: PathBuf,

    /// Language for dates and labels
    pub locale: DisplayLocale,

    /// Whether the past events section starts expanded
    pub show_past: bool,

    /// Editor used for memos
    pub editor_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".dday"));

        Self {
            data_dir,
            locale: DisplayLocale::default(),
            show_past: false,
            editor_command: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "dday")
}

impl Config {
    /// Default config file location (`config.json` in the platform config dir).
    pub fn default_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from(".dday").join("config.json"))
    }

    /// Reads the config file; a missing file means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| DdayError::ConfigError {
            message: format!("Failed to parse {}: {}", path.display(), e),
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|_| DdayError::DirectoryError {
                    path: parent.to_path_buf(),
                })?;
            }
        }

        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Applies a `key=value` assignment.
    pub fn set(&mut self, assignment: &str) -> Result<()> {
        let Some((key, value)) = assignment.split_once('=') else {
            return Err(DdayError::ConfigError {
                message: format!("Expected key=value, got '{}'", assignment),
            });
        };
        let (key, value) = (key.trim(), value.trim());

        match key {
            "data_dir" => self.data_dir = PathBuf::from(value),
            "locale" => {
                self.locale = match value {
                    "en" => DisplayLocale::En,
                    "ko" => DisplayLocale::Ko,
                    other => {
                        return Err(DdayError::ConfigError {
                            message: format!("Unknown locale '{}': use en or ko", other),
                        })
                    }
                }
            }
            "show_past" => {
                self.show_past = value.parse().map_err(|_| DdayError::ConfigError {
                    message: format!("show_past must be true or false, got '{}'", value),
                })?
            }
            "editor_command" => {
                self.editor_command = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            }
            other => {
                return Err(DdayError::ConfigError {
                    message: format!("Unknown setting '{}'", other),
                })
            }
        }
        Ok(())
    }

    // Configured editor, then $EDITOR, then a platform default
    pub fn get_editor_command(&self) -> String {
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -W -t".to_string()
        } else {
            for editor in &["nano", "vim", "vi"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}
