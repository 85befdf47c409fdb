//! cli
//!
//! Command-line interface layer for hearth.
//!
//! # Responsibilities
//!
//! - Parse the outer global flags
//! - Install logging
//! - Build the environment sources and hand them to the engine
//!
//! # Architecture
//!
//! The CLI layer is thin. It never inspects the command name; resolution,
//! execution and error reporting all happen in [`crate::engine`].

pub mod args;
pub mod commands;

pub use args::Cli;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::OnceCell;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::analytics::NoopAnalytics;
use crate::core::environment::{ready, EnvironmentSources};
use crate::core::project::Project;
use crate::core::settings::Settings;
use crate::engine::Orchestrator;
use crate::platform::Platform;
use crate::tasks::TaskRegistry;
use crate::ui::{TerminalUi, Verbosity};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "HEARTH_LOG";

/// Run the CLI application and return the process exit code.
///
/// This is the main entry point called from `main.rs`.
pub async fn run() -> i32 {
    let cli = Cli::parse_args();
    init_logging(cli.debug);

    let ui = Arc::new(TerminalUi::new(Verbosity::from_flags(cli.quiet, cli.debug)));
    let orchestrator =
        Orchestrator::new(ui, Arc::new(NoopAnalytics), false).with_platform(Platform::detect().await);

    orchestrator.run(environment_sources(cli)).await
}

/// Install the tracing subscriber.
///
/// `HEARTH_LOG` wins; otherwise `--debug` selects `debug`, else `warn`.
fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "warn" }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Build the environment sources for this invocation.
///
/// Project discovery runs once on the blocking pool; the settings source
/// waits for that same project and loads settings from its root. A failure
/// in either is reported by the engine.
pub fn environment_sources(cli: Cli) -> EnvironmentSources {
    let project_cell: Arc<OnceCell<Arc<Project>>> = Arc::new(OnceCell::new());
    let settings_cell = Arc::clone(&project_cell);
    let start = cli.cwd;
    let settings_start = start.clone();

    EnvironmentSources::new(
        ready(cli.args),
        async { Ok::<_, anyhow::Error>(Arc::new(commands::builtin_registry()?)) },
        ready(Arc::new(TaskRegistry::new())),
        async move {
            let project = shared_project(&project_cell, start).await?;
            Ok::<_, anyhow::Error>(project)
        },
        async move {
            let project = shared_project(&settings_cell, settings_start).await?;
            let settings =
                tokio::task::spawn_blocking(move || Settings::load(Some(&project.root))).await??;
            Ok::<_, anyhow::Error>(Arc::new(settings))
        },
    )
}

/// The project for this invocation, discovered by whichever source asks first.
async fn shared_project(
    cell: &OnceCell<Arc<Project>>,
    start: Option<PathBuf>,
) -> Result<Arc<Project>> {
    let project = cell
        .get_or_try_init(|| async move { discover_project(start).await.map(Arc::new) })
        .await?;
    Ok(Arc::clone(project))
}

async fn discover_project(start: Option<PathBuf>) -> Result<Project> {
    let start = match start {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let project = tokio::task::spawn_blocking(move || Project::discover(&start)).await??;
    debug!(
        root = %project.root.display(),
        marker = project.has_marker(),
        "project discovered"
    );
    Ok(project)
}
