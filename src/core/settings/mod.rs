//! core::settings
//!
//! Persisted settings and their loading.
//!
//! # Overview
//!
//! Settings have two scopes:
//! - **Global**: User-level settings
//! - **Project**: Overrides stored inside the project
//!
//! # Precedence
//!
//! Later overrides earlier:
//! 1. Default values
//! 2. Global settings file
//! 3. Project settings file
//!
//! # Global Settings Locations
//!
//! Searched in order:
//! 1. `$HEARTH_SETTINGS` if set
//! 2. `$XDG_CONFIG_HOME/hearth/settings.toml`
//! 3. `~/.hearth/settings.toml`
//!
//! # Project Settings Location
//!
//! `<project root>/.hearth/settings.toml`
//!
//! # Example
//!
//! ```no_run
//! use hearthwork::core::settings::Settings;
//! use std::path::Path;
//!
//! let settings = Settings::load(Some(Path::new("/path/to/project"))).unwrap();
//! println!("update check enabled: {}", settings.update_check_enabled());
//! println!("channel: {}", settings.update_channel());
//! ```

pub mod schema;

pub use schema::SettingsFile;

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::platform::{Version, MIN_RUNTIME_VERSION};

/// Errors from settings operations.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid settings value: {0}")]
    InvalidValue(String),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Merged settings from all scopes.
///
/// Accessor methods apply precedence and defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    /// Global scope
    pub global: SettingsFile,
    /// Project scope (if a project file exists)
    pub project: Option<SettingsFile>,
    global_path: Option<PathBuf>,
    project_path: Option<PathBuf>,
}

impl Settings {
    /// Build settings from already-parsed files.
    pub fn from_files(global: SettingsFile, project: Option<SettingsFile>) -> Self {
        Self {
            global,
            project,
            global_path: None,
            project_path: None,
        }
    }

    /// Load settings from the standard locations.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file exists but cannot be read, parsed,
    /// or validated. Missing files are not an error.
    pub fn load(project_root: Option<&Path>) -> Result<Settings, SettingsError> {
        let global_path = Self::find_global();
        Self::load_from(global_path.as_deref(), project_root)
    }

    /// Load settings from an explicit global path and project root.
    pub fn load_from(
        global_path: Option<&Path>,
        project_root: Option<&Path>,
    ) -> Result<Settings, SettingsError> {
        let (global, global_path) = match global_path {
            Some(path) if path.exists() => (Self::read_file(path)?, Some(path.to_path_buf())),
            _ => (SettingsFile::default(), None),
        };

        let (project, project_path) = match project_root.map(Self::project_settings_path) {
            Some(path) if path.exists() => (Some(Self::read_file(&path)?), Some(path)),
            _ => (None, None),
        };

        global.validate()?;
        if let Some(ref p) = project {
            p.validate()?;
        }

        Ok(Settings {
            global,
            project,
            global_path,
            project_path,
        })
    }

    /// Locate the global settings file, if any exists.
    fn find_global() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("HEARTH_SETTINGS") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("hearth/settings.toml");
            if path.exists() {
                return Some(path);
            }
        }

        dirs::home_dir()
            .map(|home| home.join(".hearth/settings.toml"))
            .filter(|path| path.exists())
    }

    fn read_file(path: &Path) -> Result<SettingsFile, SettingsError> {
        let contents = fs::read_to_string(path).map_err(|e| SettingsError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| SettingsError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Directory holding user-level state: `~/.hearth`.
    pub fn global_dir() -> Result<PathBuf, SettingsError> {
        let home = dirs::home_dir().ok_or(SettingsError::NoHomeDir)?;
        Ok(home.join(".hearth"))
    }

    /// Path of the project settings file for a project root.
    pub fn project_settings_path(project_root: &Path) -> PathBuf {
        project_root.join(".hearth/settings.toml")
    }

    // =========================================================================
    // Accessor methods with precedence
    // =========================================================================

    fn effective(&self) -> SettingsFile {
        match &self.project {
            Some(project) => self.global.merged_with(project),
            None => self.global.clone(),
        }
    }

    /// Whether the background update check should run.
    ///
    /// Defaults to `true`.
    pub fn update_check_enabled(&self) -> bool {
        !self.effective().disable_update_check.unwrap_or(false)
    }

    /// Release channel for update checks.
    ///
    /// Defaults to `"stable"`.
    pub fn update_channel(&self) -> String {
        self.effective()
            .update_channel
            .unwrap_or_else(|| "stable".to_string())
    }

    /// Whether analytics are enabled.
    ///
    /// Defaults to `true`.
    pub fn analytics_enabled(&self) -> bool {
        self.effective().analytics.unwrap_or(true)
    }

    /// Minimum supported runtime version.
    ///
    /// Values were validated at load time; an unparseable override falls back
    /// to the built-in minimum.
    pub fn minimum_runtime(&self) -> Version {
        self.effective()
            .minimum_rustc
            .and_then(|v| v.parse().ok())
            .unwrap_or(MIN_RUNTIME_VERSION)
    }

    /// Path the global settings were loaded from.
    pub fn global_loaded_from(&self) -> Option<&Path> {
        self.global_path.as_deref()
    }

    /// Path the project settings were loaded from.
    pub fn project_loaded_from(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }
}
