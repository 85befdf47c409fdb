//! update::release
//!
//! Offline update checker.
//!
//! # Design
//!
//! The latest known release is cached at `~/.hearth/latest-release.toml`
//! by whatever fetches release information. This checker only reads that
//! record; it never touches the network.
//!
//! ```toml
//! version = "0.4.0"
//! channel = "stable"
//! ```
//!
//! A notice is printed when the cached release is on the configured channel
//! and newer than the running version. A missing cache file is not an error.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::UpdateChecker;
use crate::build_info;
use crate::core::settings::Settings;
use crate::platform::Version;
use crate::ui::Ui;

/// File name of the cached release record inside `~/.hearth`.
pub const RELEASE_CACHE_FILE: &str = "latest-release.toml";

/// Cached record of the newest published release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LatestRelease {
    /// Release version.
    pub version: String,
    /// Channel it was published on.
    #[serde(default = "default_channel")]
    pub channel: String,
}

fn default_channel() -> String {
    "stable".to_string()
}

/// [`UpdateChecker`] backed by the cached release record.
pub struct ReleaseCacheChecker {
    ui: Arc<dyn Ui>,
    settings: Arc<Settings>,
    cache_path: Option<PathBuf>,
    current: String,
}

impl ReleaseCacheChecker {
    /// Checker using the default cache location and the running version.
    pub fn new(ui: Arc<dyn Ui>, settings: Arc<Settings>) -> Self {
        let cache_path = Settings::global_dir()
            .ok()
            .map(|dir| dir.join(RELEASE_CACHE_FILE));
        Self {
            ui,
            settings,
            cache_path,
            current: build_info::VERSION.to_string(),
        }
    }

    /// Read the cache from `path` instead of the default location.
    pub fn with_cache_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.cache_path = Some(path.into());
        self
    }

    /// Compare against `version` instead of the running version.
    pub fn with_current_version(mut self, version: impl Into<String>) -> Self {
        self.current = version.into();
        self
    }

    async fn read_cache(path: &Path) -> Result<Option<LatestRelease>> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read release cache '{}'", path.display()))
            }
        };

        let release = toml::from_str(&contents)
            .with_context(|| format!("failed to parse release cache '{}'", path.display()))?;
        Ok(Some(release))
    }
}

#[async_trait]
impl UpdateChecker for ReleaseCacheChecker {
    async fn check_for_updates(&self) -> Result<()> {
        if !self.settings.update_check_enabled() {
            debug!("update check disabled by settings");
            return Ok(());
        }

        let Some(path) = &self.cache_path else {
            debug!("no home directory, skipping update check");
            return Ok(());
        };

        let Some(release) = Self::read_cache(path).await? else {
            debug!(path = %path.display(), "no cached release record");
            return Ok(());
        };

        let channel = self.settings.update_channel();
        if release.channel != channel {
            debug!(cached = %release.channel, configured = %channel, "release channel mismatch");
            return Ok(());
        }

        let latest: Version = release
            .version
            .parse()
            .with_context(|| format!("invalid version in release cache '{}'", path.display()))?;
        let current: Version = self
            .current
            .parse()
            .context("invalid running version")?;

        if latest > current {
            self.ui.write_line(&format!(
                "A new version of hearth is available: {} (you have {}).",
                latest, current
            ));
        }
        Ok(())
    }
}
