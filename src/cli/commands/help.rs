//! cli::commands::help
//!
//! `hearth help [command]`

use anyhow::Result;
use async_trait::async_trait;

use crate::analytics::AnalyticsEvent;
use crate::engine::{Command, CommandOptions, Outcome};

/// Lists commands and tasks, or describes the command named by the first
/// argument. The topic resolves the same way a command name does.
pub struct HelpCommand {
    options: CommandOptions,
}

impl HelpCommand {
    /// Build the command.
    pub fn new(options: CommandOptions) -> Self {
        Self { options }
    }

    fn list(&self) {
        let ui = &self.options.ui;
        ui.write_line("Usage: hearth <command> [options]");
        ui.write_line("");
        ui.write_line("Available commands:");

        let width = self
            .options
            .commands
            .iter()
            .map(|spec| spec.name.len())
            .max()
            .unwrap_or(0);
        for spec in self.options.commands.iter() {
            let aliases = if spec.aliases.is_empty() {
                String::new()
            } else {
                format!(" (aliases: {})", spec.aliases.join(", "))
            };
            ui.write_line(&format!(
                "  {:width$}  {}{}",
                spec.name,
                spec.description,
                aliases,
                width = width
            ));
        }

        if !self.options.tasks.is_empty() {
            ui.write_line("");
            ui.write_line("Available tasks:");
            for task in self.options.tasks.names() {
                ui.write_line(&format!("  {}", task));
            }
        }
    }

    fn describe(&self, name: &str) -> Result<()> {
        let spec = self.options.commands.lookup(name)?;

        let ui = &self.options.ui;
        ui.write_line(&format!("hearth {}", spec.name));
        ui.write_line(&format!("  {}", spec.description));
        if !spec.aliases.is_empty() {
            ui.write_line(&format!("  aliases: {}", spec.aliases.join(", ")));
        }
        Ok(())
    }
}

#[async_trait]
impl Command for HelpCommand {
    async fn validate_and_run(&mut self, args: &[String]) -> Result<Outcome> {
        let topic = args.iter().find(|arg| !arg.starts_with('-'));

        match topic {
            Some(name) => self.describe(name)?,
            None => self.list(),
        }

        self.options.analytics.track(AnalyticsEvent::Help {
            topic: topic.cloned(),
        });
        Ok(Outcome::SUCCESS)
    }
}
