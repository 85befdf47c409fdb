//! engine::command
//!
//! Command trait and the collaborators every command is built with.
//!
//! # Architecture
//!
//! Commands are trait objects produced by a [`CommandFactory`]. The
//! orchestrator only knows this trait; it never wires anything per command.
//! Every command receives the same [`CommandOptions`].
//!
//! # Lifecycle
//!
//! 1. `before_run(args)` - synchronous preparation, may fail
//! 2. `validate_and_run(args)` - validates arguments and runs, producing an [`Outcome`]
//!
//! # Example
//!
//! ```
//! use hearthwork::engine::command::{help_requested, Command, CommandOptions, Outcome};
//! use async_trait::async_trait;
//!
//! struct Lint {
//!     options: CommandOptions,
//! }
//!
//! #[async_trait]
//! impl Command for Lint {
//!     async fn validate_and_run(&mut self, args: &[String]) -> anyhow::Result<Outcome> {
//!         if help_requested(args) {
//!             return Ok(Outcome::ShowHelp);
//!         }
//!         self.options.ui.write_line("lint: ok");
//!         Ok(Outcome::SUCCESS)
//!     }
//! }
//! ```

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use super::registry::CommandRegistry;
use crate::analytics::{Analytics, NoopAnalytics};
use crate::core::environment::Environment;
use crate::core::project::Project;
use crate::core::settings::Settings;
use crate::tasks::TaskRegistry;
use crate::ui::Ui;

/// Tokens that ask a command for its help text.
pub const HELP_FLAGS: &[&str] = &["--help", "-h"];

/// Result of running a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Finished with this process exit code.
    Exit(i32),
    /// Re-dispatch to the help command for this command.
    ShowHelp,
}

impl Outcome {
    /// Successful completion.
    pub const SUCCESS: Outcome = Outcome::Exit(0);

    /// Check if this outcome asks for help.
    pub fn is_show_help(&self) -> bool {
        matches!(self, Outcome::ShowHelp)
    }
}

impl From<()> for Outcome {
    fn from(_: ()) -> Self {
        Outcome::SUCCESS
    }
}

impl From<i32> for Outcome {
    fn from(code: i32) -> Self {
        Outcome::Exit(code)
    }
}

/// Whether `args` contain `--help` or `-h`.
pub fn help_requested(args: &[String]) -> bool {
    args.iter().any(|arg| HELP_FLAGS.contains(&arg.as_str()))
}

/// A unit of work with a two-phase lifecycle.
#[async_trait]
pub trait Command: Send {
    /// Prepare to run. Called once, before the update check is awaited.
    fn before_run(&mut self, _args: &[String]) -> Result<()> {
        Ok(())
    }

    /// Validate arguments and run.
    async fn validate_and_run(&mut self, args: &[String]) -> Result<Outcome>;
}

/// Collaborators shared by every command the orchestrator builds.
///
/// Held by the orchestrator for its lifetime; commands get clones of the
/// same handles.
#[derive(Clone)]
pub struct SharedContext {
    pub ui: Arc<dyn Ui>,
    pub analytics: Arc<dyn Analytics>,
    pub testing: bool,
}

impl SharedContext {
    /// Full option set for a command built from `env`.
    ///
    /// With analytics disabled in settings, commands get a sink that drops
    /// every event.
    pub fn command_options(&self, env: &Environment) -> CommandOptions {
        let analytics: Arc<dyn Analytics> = if env.settings.analytics_enabled() {
            Arc::clone(&self.analytics)
        } else {
            Arc::new(NoopAnalytics)
        };
        CommandOptions {
            ui: Arc::clone(&self.ui),
            analytics,
            commands: Arc::clone(&env.commands),
            tasks: Arc::clone(&env.tasks),
            project: Arc::clone(&env.project),
            settings: Arc::clone(&env.settings),
            testing: self.testing,
        }
    }
}

/// Everything a command is constructed with.
#[derive(Clone)]
pub struct CommandOptions {
    pub ui: Arc<dyn Ui>,
    pub analytics: Arc<dyn Analytics>,
    pub commands: Arc<CommandRegistry>,
    pub tasks: Arc<TaskRegistry>,
    pub project: Arc<Project>,
    pub settings: Arc<Settings>,
    pub testing: bool,
}

type BuildFn = dyn Fn(CommandOptions) -> Box<dyn Command> + Send + Sync;

/// Constructs a command from its options.
#[derive(Clone)]
pub struct CommandFactory(Arc<BuildFn>);

impl CommandFactory {
    /// Wrap a constructor.
    pub fn new<F>(build: F) -> Self
    where
        F: Fn(CommandOptions) -> Box<dyn Command> + Send + Sync + 'static,
    {
        Self(Arc::new(build))
    }

    /// Build a command instance.
    pub fn build(&self, options: CommandOptions) -> Box<dyn Command> {
        (self.0)(options)
    }
}

impl std::fmt::Debug for CommandFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CommandFactory")
    }
}
