//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including the server URL, user token, quality gate, display strings and
//! theme preferences.

mod error;
pub mod hotkeys;

pub use error::ConfigError;
pub use hotkeys::{HotkeyAction, ViewHotkeys};

use crate::error::AppError;
use crate::select_list::{Labels, Tooltips, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/qualitygate-tui";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub gate_id: Option<String>,
    pub read_only: bool,
    pub page_size: usize,
    pub theme_name: String,
    pub labels: Labels,
    pub tooltips: Tooltips,
    pub hotkeys: ViewHotkeys,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate_id: Option<String>,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default)]
    pub labels: Labels,
    #[serde(default)]
    pub tooltips: Tooltips,
    #[serde(default)]
    pub hotkeys: ViewHotkeys,
}

fn default_theme_name() -> String {
    "tokyo-night".to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new empty instance.
    ///
    pub fn new() -> Config {
        Config {
            base_url: None,
            token: None,
            gate_id: None,
            read_only: false,
            page_size: default_page_size(),
            theme_name: default_theme_name(),
            labels: Labels::default(),
            tooltips: Tooltips::default(),
            hotkeys: ViewHotkeys::default(),
            file_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided. A missing file leaves the defaults in place;
    /// the file is written the first time the configuration is saved.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;

        if file_path.exists() {
            let contents = fs::read_to_string(file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.base_url = data.base_url;
            self.token = data.token;
            self.gate_id = data.gate_id;
            self.read_only = data.read_only;
            self.page_size = data.page_size;
            self.theme_name = data.theme_name;
            self.labels = data.labels;
            self.tooltips = data.tooltips;
            self.hotkeys = data.hotkeys;
        }

        Ok(())
    }

    /// Returns the server URL or an error if none was configured.
    ///
    pub fn require_base_url(&self) -> Result<&str, ConfigError> {
        self.base_url.as_deref().ok_or(ConfigError::BaseUrlNotSet)
    }

    /// Returns the quality gate id or an error if none was configured.
    ///
    pub fn require_gate_id(&self) -> Result<&str, ConfigError> {
        self.gate_id.as_deref().ok_or(ConfigError::GateNotSet)
    }

    /// Attempt to serialize the configuration data and write it to the disk,
    /// creating the directory if needed.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            base_url: self.base_url.clone(),
            token: self.token.clone(),
            gate_id: self.gate_id.clone(),
            read_only: self.read_only,
            page_size: self.page_size,
            theme_name: self.theme_name.clone(),
            labels: self.labels.clone(),
            tooltips: self.tooltips.clone(),
            hotkeys: self.hotkeys.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(Path::new(DEFAULT_DIRECTORY_PATH))),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}
