//! cli::commands::version
//!
//! `hearth version`

use anyhow::{bail, Result};
use async_trait::async_trait;

use crate::analytics::AnalyticsEvent;
use crate::build_info;
use crate::engine::{help_requested, Command, CommandOptions, Outcome};

/// Prints version and build metadata.
pub struct VersionCommand {
    options: CommandOptions,
}

impl VersionCommand {
    /// Build the command.
    pub fn new(options: CommandOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl Command for VersionCommand {
    async fn validate_and_run(&mut self, args: &[String]) -> Result<Outcome> {
        if help_requested(args) {
            return Ok(Outcome::ShowHelp);
        }
        if let Some(extra) = args.first() {
            bail!("version takes no arguments, got '{}'", extra);
        }

        for line in build_info::version_text().lines() {
            self.options.ui.write_line(line);
        }
        self.options.ui.write_line(&format!(
            "project: {}",
            self.options.project.root.display()
        ));

        self.options.analytics.track(AnalyticsEvent::Command {
            name: "version".to_string(),
        });
        Ok(Outcome::SUCCESS)
    }
}
