//! Persistent CLI configuration and directory resolution.
//!
//! Each setting is taken from the first source that provides it: command-line
//! flag, environment variable, config file, platform default.

use std::env;
use std::path::{Path, PathBuf};

use notes_core::NotesConfig;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

const CONFIG_FILE_NAME: &str = "config.json";
const APP_DIR_NAME: &str = "notes";

pub const NOTES_DIR_ENV: &str = "NOTES_DIR";
pub const OUTPUT_DIR_ENV: &str = "NOTES_OUTPUT_DIR";
pub const CONFIG_PATH_ENV: &str = "NOTES_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub notes_dir: Option<PathBuf>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub editor: Option<String>,
}

const fn default_config_version() -> u32 {
    1
}

/// Fully resolved settings for one invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub notes: NotesConfig,
    pub editor: Option<String>,
}

pub fn default_config_path() -> Result<PathBuf, CliError> {
    if let Some(path) = env::var_os(CONFIG_PATH_ENV) {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
        .ok_or_else(|| CliError::Config("Failed to resolve config directory".to_string()))
}

pub fn default_notes_dir() -> Result<PathBuf, CliError> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| CliError::Config("Failed to resolve data directory".to_string()))
}

pub fn default_output_dir() -> Result<PathBuf, CliError> {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .ok_or_else(|| CliError::Config("Failed to resolve output directory".to_string()))
}

pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn non_empty_path(value: Option<PathBuf>) -> Option<PathBuf> {
    value.filter(|path| !path.as_os_str().is_empty())
}

/// Pick the first configured directory
pub fn resolve_dir(
    flag: Option<PathBuf>,
    env_value: Option<PathBuf>,
    file_value: Option<PathBuf>,
    default: impl FnOnce() -> Result<PathBuf, CliError>,
) -> Result<PathBuf, CliError> {
    match non_empty_path(flag)
        .or_else(|| non_empty_path(env_value))
        .or_else(|| non_empty_path(file_value))
    {
        Some(path) => Ok(path),
        None => default(),
    }
}

impl CliConfig {
    pub fn load_from_path(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            CliError::Config(format!(
                "Failed to read config at {}: {}",
                path.display(),
                error
            ))
        })?;
        let mut config = serde_json::from_str::<Self>(&raw).map_err(|error| {
            CliError::Config(format!(
                "Failed to parse config at {}: {}",
                path.display(),
                error
            ))
        })?;
        config.normalize();
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                CliError::Config(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                ))
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)?;
        std::fs::write(path, serialized).map_err(|error| {
            CliError::Config(format!(
                "Failed to write config at {}: {}",
                path.display(),
                error
            ))
        })
    }

    /// Resolve settings, reading overrides from the process environment
    pub fn resolve(
        &self,
        notes_dir_flag: Option<PathBuf>,
        output_dir_flag: Option<PathBuf>,
    ) -> Result<Settings, CliError> {
        self.resolve_with_env(notes_dir_flag, output_dir_flag, |key| {
            env::var_os(key).map(PathBuf::from)
        })
    }

    pub fn resolve_with_env(
        &self,
        notes_dir_flag: Option<PathBuf>,
        output_dir_flag: Option<PathBuf>,
        env_lookup: impl Fn(&str) -> Option<PathBuf>,
    ) -> Result<Settings, CliError> {
        let notes_dir = resolve_dir(
            notes_dir_flag,
            env_lookup(NOTES_DIR_ENV),
            self.notes_dir.clone(),
            default_notes_dir,
        )?;
        let output_dir = resolve_dir(
            output_dir_flag,
            env_lookup(OUTPUT_DIR_ENV),
            self.output_dir.clone(),
            default_output_dir,
        )?;

        let notes = NotesConfig::new(notes_dir, output_dir);
        notes.validate()?;
        Ok(Settings {
            notes,
            editor: self.editor.clone(),
        })
    }

    fn normalize(&mut self) {
        self.notes_dir = non_empty_path(self.notes_dir.take());
        self.output_dir = non_empty_path(self.output_dir.take());
        self.editor = normalize_text_option(self.editor.take());
    }
}
