//! engine::orchestrator
//!
//! The single entry point for dispatching one command.
//!
//! # Pipeline
//!
//! ```text
//! Resolve env -> Lookup -> Construct -> Flags -> Banner -> [Update check starts]
//!   -> chdir -> before_run -> [Update check awaited] -> validate_and_run
//!   -> [Help fallback] -> Flush -> exit code
//! ```
//!
//! Every step may fail. All failures go to one [`ErrorBoundary`], which
//! reports them and yields exit code 1.
//!
//! # Invariants
//!
//! - The banner is written before `before_run`
//! - `before_run` finishes before the update check is awaited
//! - The update check is awaited before `validate_and_run` starts; it is
//!   never cancelled, even when an earlier step fails
//! - Process state is written only through [`ProcessEnvironment`]

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::boundary::ErrorBoundary;
use super::command::{Outcome, SharedContext};
use super::errors::DispatchError;
use super::lookup::{CommandResolver, RegistryResolver, ResolveContext};
use crate::analytics::Analytics;
use crate::build_info;
use crate::core::environment::{Environment, EnvironmentSources};
use crate::core::invocation::CommandInvocation;
use crate::platform::{FlushStrategy, Platform};
use crate::process::{verbose_flag_name, verbose_topics, ProcessEnvironment, SystemProcess};
use crate::ui::Ui;
use crate::update::{UpdateCheckerFactory, UPDATE_COMMAND};

/// Dispatches one command per process invocation.
pub struct Orchestrator {
    pub(super) shared: SharedContext,
    pub(super) resolver: Arc<dyn CommandResolver>,
    process: Arc<dyn ProcessEnvironment>,
    update_checker: UpdateCheckerFactory,
    platform: Platform,
    flush: FlushStrategy,
    boundary: ErrorBoundary,
}

impl Orchestrator {
    /// Create an orchestrator with default collaborators.
    ///
    /// Defaults: [`RegistryResolver`], [`SystemProcess`], the release-cache
    /// update checker, the build toolchain as platform runtime, and the
    /// current OS's flush strategy.
    pub fn new(ui: Arc<dyn Ui>, analytics: Arc<dyn Analytics>, testing: bool) -> Self {
        debug!(testing, "creating orchestrator");
        let platform = Platform::new(std::env::consts::OS, build_info::BUILD_RUSTC_VERSION);
        Self {
            boundary: ErrorBoundary::new(Arc::clone(&ui), testing),
            shared: SharedContext {
                ui,
                analytics,
                testing,
            },
            resolver: Arc::new(RegistryResolver),
            process: Arc::new(SystemProcess),
            update_checker: UpdateCheckerFactory::default(),
            flush: platform.flush_strategy(),
            platform,
        }
    }

    /// Use a different command resolver.
    pub fn with_resolver(mut self, resolver: Arc<dyn CommandResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Use a different process-state capability.
    pub fn with_process(mut self, process: Arc<dyn ProcessEnvironment>) -> Self {
        self.process = process;
        self
    }

    /// Use a different update checker.
    pub fn with_update_checker(mut self, factory: UpdateCheckerFactory) -> Self {
        self.update_checker = factory;
        self
    }

    /// Describe a different platform. Also resets the flush strategy to that
    /// platform's default.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.flush = platform.flush_strategy();
        self.platform = platform;
        self
    }

    /// Override the flush strategy.
    pub fn with_flush_strategy(mut self, flush: FlushStrategy) -> Self {
        self.flush = flush;
        self
    }

    /// Send testing-mode failure diagnostics to `writer`.
    pub fn with_diagnostics(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.boundary = self.boundary.with_diagnostics(writer);
        self
    }

    /// Whether the orchestrator runs in testing mode.
    pub fn testing(&self) -> bool {
        self.shared.testing
    }

    /// Run one command and return the process exit code.
    ///
    /// Never fails: every failure is reported through the error boundary and
    /// becomes exit code 1.
    pub async fn run(&self, sources: impl Into<EnvironmentSources>) -> i32 {
        match self.dispatch(sources.into()).await {
            Ok(code) => code,
            Err(error) => self.boundary.report(error),
        }
    }

    async fn dispatch(&self, sources: EnvironmentSources) -> Result<i32> {
        let env = sources.resolve().await?;
        let CommandInvocation {
            command_name,
            mut command_args,
        } = CommandInvocation::from_args(&env.cli_args);

        let factory = self.resolver.resolve(
            &env.commands,
            command_name.as_deref(),
            &command_args,
            &ResolveContext {
                project: &env.project,
                ui: self.shared.ui.as_ref(),
            },
        )?;
        let mut command = factory.build(self.shared.command_options(&env));
        debug!(command = command_name.as_deref().unwrap_or("<none>"), "command resolved");

        self.set_verbose_flags(&command_args);

        self.warn_unsupported_platform(&env);
        self.shared.ui.write_line(&build_info::banner_line());

        let update = self.start_update_check(command_name.as_deref(), &env);

        if !self.shared.testing {
            self.process.set_working_directory(&env.project.root)?;
        }

        command.before_run(&command_args)?;
        update.finish().await?;

        let code = match command.validate_and_run(&command_args).await? {
            Outcome::Exit(code) => code,
            Outcome::ShowHelp => {
                self.call_help(&env, command_name.as_deref(), &mut command_args)
                    .await?
            }
        };

        self.flush.flush().await;
        Ok(code)
    }

    /// Set `HEARTH_VERBOSE_<TOPIC>` for every `--verbose <topic>`.
    ///
    /// A topic that cannot name an environment variable is skipped with a
    /// warning; it never fails the command.
    fn set_verbose_flags(&self, command_args: &[String]) {
        for topic in verbose_topics(command_args) {
            if let Err(error) = self.process.set_flag(&verbose_flag_name(topic), "true") {
                warn!(topic, %error, "skipping verbose topic");
            }
        }
    }

    fn warn_unsupported_platform(&self, env: &Environment) {
        let minimum = env.settings.minimum_runtime();
        if !self.platform.is_supported(&minimum) && !self.shared.testing {
            self.shared.ui.write_line(&format!(
                "warning: future versions of hearth will not support {}. Please update to rustc {} or newer.",
                self.platform.runtime_version, minimum
            ));
        }
    }

    fn start_update_check(&self, command_name: Option<&str>, env: &Environment) -> PendingUpdate {
        if self.shared.testing || command_name == Some(UPDATE_COMMAND) {
            debug!("update check skipped");
            return PendingUpdate(None);
        }

        let checker = self
            .update_checker
            .build(Arc::clone(&self.shared.ui), Arc::clone(&env.settings));
        debug!("update check started");
        PendingUpdate(Some(tokio::spawn(async move {
            checker.check_for_updates().await
        })))
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("testing", &self.shared.testing)
            .field("platform", &self.platform)
            .field("flush", &self.flush)
            .finish_non_exhaustive()
    }
}

/// A running update check.
///
/// Once started, the check runs to completion. Dropped without
/// [`PendingUpdate::finish`] (an earlier step failed), the task is detached
/// and its result discarded.
struct PendingUpdate(Option<JoinHandle<Result<()>>>);

impl PendingUpdate {
    async fn finish(self) -> Result<()> {
        match self.0 {
            Some(handle) => handle
                .await
                .map_err(|e| DispatchError::UpdateTask(e.to_string()))?,
            None => Ok(()),
        }
    }
}
