//! core::environment
//!
//! The resolved inputs of one invocation.
//!
//! # Resolution
//!
//! Callers may hand the orchestrator either a ready [`Environment`] or an
//! [`EnvironmentSources`] whose fields are still being computed (project
//! discovery, settings loading). [`EnvironmentSources::resolve`] drives every
//! field concurrently and fails on the first error.
//!
//! # Invariants
//!
//! - Every field is resolved before the first argument token is inspected
//! - An `Environment` is never mutated after resolution

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use anyhow::Result;

use super::project::Project;
use super::settings::Settings;
use crate::engine::registry::CommandRegistry;
use crate::tasks::TaskRegistry;

/// A field whose value may still be pending.
pub type Pending<T> = Pin<Box<dyn Future<Output = Result<T>> + Send>>;

/// Wrap an already-known value as a pending field.
pub fn ready<T: Send + 'static>(value: T) -> Pending<T> {
    Box::pin(async move { Ok(value) })
}

/// Fully-resolved inputs for one invocation.
#[derive(Debug, Clone)]
pub struct Environment {
    /// Raw argument tokens after the program name.
    pub cli_args: Vec<String>,
    /// Available commands.
    pub commands: Arc<CommandRegistry>,
    /// Available tasks.
    pub tasks: Arc<TaskRegistry>,
    /// The project being operated on.
    pub project: Arc<Project>,
    /// Persisted settings.
    pub settings: Arc<Settings>,
}

/// Environment fields that may still be resolving.
pub struct EnvironmentSources {
    cli_args: Pending<Vec<String>>,
    commands: Pending<Arc<CommandRegistry>>,
    tasks: Pending<Arc<TaskRegistry>>,
    project: Pending<Arc<Project>>,
    settings: Pending<Arc<Settings>>,
}

impl EnvironmentSources {
    /// Build sources from one future per field.
    pub fn new<A, C, T, P, S>(cli_args: A, commands: C, tasks: T, project: P, settings: S) -> Self
    where
        A: Future<Output = Result<Vec<String>>> + Send + 'static,
        C: Future<Output = Result<Arc<CommandRegistry>>> + Send + 'static,
        T: Future<Output = Result<Arc<TaskRegistry>>> + Send + 'static,
        P: Future<Output = Result<Arc<Project>>> + Send + 'static,
        S: Future<Output = Result<Arc<Settings>>> + Send + 'static,
    {
        Self {
            cli_args: Box::pin(cli_args),
            commands: Box::pin(commands),
            tasks: Box::pin(tasks),
            project: Box::pin(project),
            settings: Box::pin(settings),
        }
    }

    /// Replace the project source.
    pub fn with_project<P>(mut self, project: P) -> Self
    where
        P: Future<Output = Result<Arc<Project>>> + Send + 'static,
    {
        self.project = Box::pin(project);
        self
    }

    /// Replace the settings source.
    pub fn with_settings<S>(mut self, settings: S) -> Self
    where
        S: Future<Output = Result<Arc<Settings>>> + Send + 'static,
    {
        self.settings = Box::pin(settings);
        self
    }

    /// Resolve every field concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first field error; remaining fields are dropped.
    pub async fn resolve(self) -> Result<Environment> {
        let (cli_args, commands, tasks, project, settings) = tokio::try_join!(
            self.cli_args,
            self.commands,
            self.tasks,
            self.project,
            self.settings
        )?;

        Ok(Environment {
            cli_args,
            commands,
            tasks,
            project,
            settings,
        })
    }
}

impl From<Environment> for EnvironmentSources {
    fn from(env: Environment) -> Self {
        Self {
            cli_args: ready(env.cli_args),
            commands: ready(env.commands),
            tasks: ready(env.tasks),
            project: ready(env.project),
            settings: ready(env.settings),
        }
    }
}

impl std::fmt::Debug for EnvironmentSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvironmentSources").finish_non_exhaustive()
    }
}
