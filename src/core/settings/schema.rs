//! core::settings::schema
//!
//! Settings file schema.
//!
//! The same schema is used for both scopes. Every field is optional so that
//! a project file only overrides what it names.
//!
//! # Validation
//!
//! Values are validated after parsing: the update channel must be a known
//! channel and `minimum_rustc` must parse as a version.

use serde::{Deserialize, Serialize};

use super::SettingsError;
use crate::platform::Version;

/// One settings file (global or project scope).
///
/// # Example
///
/// ```toml
/// disable_update_check = false
/// update_channel = "stable"
/// analytics = true
/// minimum_rustc = "1.74"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    /// Skip the background update check entirely
    pub disable_update_check: Option<bool>,

    /// Release channel compared against by the update check
    pub update_channel: Option<String>,

    /// Send usage analytics
    pub analytics: Option<bool>,

    /// Override the minimum supported rustc version
    pub minimum_rustc: Option<String>,
}

impl SettingsFile {
    /// Valid update channels.
    pub const VALID_CHANNELS: &'static [&'static str] = &["stable", "beta"];

    /// Validate the settings values.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(channel) = &self.update_channel {
            if !Self::VALID_CHANNELS.contains(&channel.as_str()) {
                return Err(SettingsError::InvalidValue(format!(
                    "invalid update channel '{}', must be one of: {}",
                    channel,
                    Self::VALID_CHANNELS.join(", ")
                )));
            }
        }

        if let Some(minimum) = &self.minimum_rustc {
            minimum.parse::<Version>().map_err(|e| {
                SettingsError::InvalidValue(format!("invalid minimum_rustc: {}", e))
            })?;
        }

        Ok(())
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merged_with(&self, other: &SettingsFile) -> SettingsFile {
        SettingsFile {
            disable_update_check: other.disable_update_check.or(self.disable_update_check),
            update_channel: other
                .update_channel
                .clone()
                .or_else(|| self.update_channel.clone()),
            analytics: other.analytics.or(self.analytics),
            minimum_rustc: other
                .minimum_rustc
                .clone()
                .or_else(|| self.minimum_rustc.clone()),
        }
    }
}
