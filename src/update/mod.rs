//! update
//!
//! Background check for a newer release of this tool.
//!
//! # Design
//!
//! The check is async and runs concurrently with command preparation. The
//! orchestrator builds a checker through an [`UpdateCheckerFactory`] from the
//! shared UI and the settings, and awaits it before the command runs.
//!
//! # Modules
//!
//! - [`release`] - Offline checker reading a cached release record
//! - [`mock`] - Counting checker for tests

pub mod mock;
pub mod release;

pub use release::{LatestRelease, ReleaseCacheChecker};

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use crate::core::settings::Settings;
use crate::ui::Ui;

/// Command name that performs the self-update; never triggers a check.
pub const UPDATE_COMMAND: &str = "update";

/// Determines whether a newer tool version exists.
#[async_trait]
pub trait UpdateChecker: Send + Sync {
    /// Run the check. Any notice is written to the UI by the checker itself.
    async fn check_for_updates(&self) -> Result<()>;
}

type BuildFn = dyn Fn(Arc<dyn Ui>, Arc<Settings>) -> Box<dyn UpdateChecker> + Send + Sync;

/// Constructs an update checker from the UI and settings.
#[derive(Clone)]
pub struct UpdateCheckerFactory(Arc<BuildFn>);

impl UpdateCheckerFactory {
    /// Wrap a constructor.
    pub fn new<F>(build: F) -> Self
    where
        F: Fn(Arc<dyn Ui>, Arc<Settings>) -> Box<dyn UpdateChecker> + Send + Sync + 'static,
    {
        Self(Arc::new(build))
    }

    /// Build a checker.
    pub fn build(&self, ui: Arc<dyn Ui>, settings: Arc<Settings>) -> Box<dyn UpdateChecker> {
        (self.0)(ui, settings)
    }
}

impl Default for UpdateCheckerFactory {
    fn default() -> Self {
        Self::new(|ui, settings| Box::new(ReleaseCacheChecker::new(ui, settings)))
    }
}

impl std::fmt::Debug for UpdateCheckerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("UpdateCheckerFactory")
    }
}
