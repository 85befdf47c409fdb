//! Integration tests for the dispatch pipeline.
//!
//! These drive `Orchestrator::run` end to end with recording collaborators:
//! a scripted command, a mock UI, mock process state and a spy update checker.

use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use hearthwork::analytics::NoopAnalytics;
use hearthwork::build_info;
use hearthwork::cli::commands::builtin_registry;
use hearthwork::core::environment::{Environment, EnvironmentSources};
use hearthwork::core::project::Project;
use hearthwork::core::settings::Settings;
use hearthwork::engine::{
    help_requested, Command, CommandFactory, CommandOptions, CommandRegistry, CommandSpec,
    DispatchError, Orchestrator, Outcome,
};
use hearthwork::platform::{FlushStrategy, Platform};
use hearthwork::process::mock::MockProcess;
use hearthwork::tasks::TaskRegistry;
use hearthwork::ui::mock::MockUi;
use hearthwork::update::mock::MockUpdateChecker;

// =============================================================================
// Test Fixtures
// =============================================================================

const PROJECT_ROOT: &str = "/work/app";

/// How a scripted command behaves.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Script {
    /// Return this outcome, or `ShowHelp` when asked for help.
    Succeed(i32),
    /// Always return `ShowHelp`.
    AlwaysHelp,
    /// Fail in `before_run`.
    FailBeforeRun,
    /// Fail in `validate_and_run`.
    FailRun,
}

/// Everything a scripted command observed.
#[derive(Debug, Default, Clone)]
struct Observation {
    /// `"<command>:<phase>:<args joined by space>"`
    calls: Vec<String>,
    /// UI lines present when `before_run` started.
    lines_at_before_run: Vec<String>,
    /// Working directory recorded by the mock process when `before_run` started.
    cwd_at_before_run: Option<PathBuf>,
    /// Completed update checks when `validate_and_run` started.
    updates_at_run: Option<usize>,
    /// Whether options carried the testing flag.
    testing: Option<bool>,
}

type Journal = Arc<Mutex<Observation>>;

struct ScriptedCommand {
    name: &'static str,
    script: Script,
    options: CommandOptions,
    journal: Journal,
    ui: MockUi,
    process: MockProcess,
    updates: MockUpdateChecker,
}

#[async_trait]
impl Command for ScriptedCommand {
    fn before_run(&mut self, args: &[String]) -> Result<()> {
        {
            let mut obs = self.journal.lock().unwrap();
            obs.calls
                .push(format!("{}:before_run:{}", self.name, args.join(" ")));
            obs.lines_at_before_run = self.ui.lines();
            obs.cwd_at_before_run = self.process.working_directory();
            obs.testing = Some(self.options.testing);
        }
        if self.script == Script::FailBeforeRun {
            return Err(anyhow!("{} could not prepare", self.name));
        }
        Ok(())
    }

    async fn validate_and_run(&mut self, args: &[String]) -> Result<Outcome> {
        {
            let mut obs = self.journal.lock().unwrap();
            obs.calls.push(format!("{}:run:{}", self.name, args.join(" ")));
            obs.updates_at_run = Some(self.updates.completed());
        }
        match self.script {
            Script::Succeed(_) if help_requested(args) => Ok(Outcome::ShowHelp),
            Script::Succeed(code) => Ok(Outcome::Exit(code)),
            Script::AlwaysHelp => Ok(Outcome::ShowHelp),
            Script::FailBeforeRun => Ok(Outcome::SUCCESS),
            Script::FailRun => Err(anyhow!("{} failed", self.name)),
        }
    }
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Test harness wiring an orchestrator to recording collaborators.
struct Harness {
    ui: MockUi,
    process: MockProcess,
    updates: MockUpdateChecker,
    diagnostics: SharedBuf,
    journal: Journal,
    testing: bool,
    platform: Platform,
    flush: FlushStrategy,
    scripts: Vec<(&'static str, Script)>,
}

impl Harness {
    /// Harness with `build`, `update` and `help` commands that succeed.
    fn new(testing: bool) -> Self {
        Self {
            ui: MockUi::new(),
            process: MockProcess::new(),
            updates: MockUpdateChecker::new(),
            diagnostics: SharedBuf::default(),
            journal: Journal::default(),
            testing,
            platform: Platform::new("linux", "rustc 1.80.1 (3f5fd8dd4 2024-08-06)"),
            flush: FlushStrategy::Immediate,
            scripts: vec![
                ("build", Script::Succeed(0)),
                ("update", Script::Succeed(0)),
                ("help", Script::Succeed(0)),
            ],
        }
    }

    /// Replace the script of a command.
    fn script(mut self, name: &'static str, script: Script) -> Self {
        for entry in self.scripts.iter_mut() {
            if entry.0 == name {
                entry.1 = script;
            }
        }
        self
    }

    fn registry(&self) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        for &(name, script) in &self.scripts {
            let journal = Arc::clone(&self.journal);
            let ui = self.ui.clone();
            let process = self.process.clone();
            let updates = self.updates.clone();
            let factory = CommandFactory::new(move |options| {
                Box::new(ScriptedCommand {
                    name,
                    script,
                    options,
                    journal: Arc::clone(&journal),
                    ui: ui.clone(),
                    process: process.clone(),
                    updates: updates.clone(),
                })
            });
            registry
                .register(CommandSpec::new(name, "scripted", factory))
                .unwrap();
        }
        registry
    }

    fn environment(&self, args: &[&str]) -> Environment {
        Environment {
            cli_args: args.iter().map(|s| s.to_string()).collect(),
            commands: Arc::new(self.registry()),
            tasks: Arc::new(TaskRegistry::new()),
            project: Arc::new(Project::new(PROJECT_ROOT)),
            settings: Arc::new(Settings::default()),
        }
    }

    fn orchestrator(&self) -> Orchestrator {
        Orchestrator::new(Arc::new(self.ui.clone()), Arc::new(NoopAnalytics), self.testing)
            .with_process(Arc::new(self.process.clone()))
            .with_update_checker(self.updates.factory())
            .with_platform(self.platform.clone())
            .with_flush_strategy(self.flush)
            .with_diagnostics(Box::new(self.diagnostics.clone()))
    }

    async fn run(&self, args: &[&str]) -> i32 {
        self.orchestrator().run(self.environment(args)).await
    }

    fn observation(&self) -> Observation {
        self.journal.lock().unwrap().clone()
    }

    fn calls(&self) -> Vec<String> {
        self.observation().calls
    }
}

// =============================================================================
// Outcome pass-through
// =============================================================================

#[tokio::test]
async fn success_code_passes_through() {
    let h = Harness::new(true);
    assert_eq!(h.run(&["build"]).await, 0);
    assert_eq!(h.calls(), vec!["build:before_run:", "build:run:"]);
    assert!(h.ui.errors().is_empty());
}

#[tokio::test]
async fn command_specific_code_passes_through() {
    let h = Harness::new(true).script("build", Script::Succeed(7));
    assert_eq!(h.run(&["build", "--prod"]).await, 7);
    assert!(h.ui.errors().is_empty());
}

#[tokio::test]
async fn commands_receive_shared_testing_flag() {
    let h = Harness::new(true);
    h.run(&["build"]).await;
    assert_eq!(h.observation().testing, Some(true));
}

#[tokio::test]
async fn missing_command_name_runs_help() {
    let h = Harness::new(true);
    assert_eq!(h.run(&[]).await, 0);
    assert_eq!(h.calls(), vec!["help:before_run:", "help:run:"]);
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn scenario_build_with_verbose_output() {
    let h = Harness::new(false);

    let code = h.run(&["build", "--verbose", "output"]).await;

    assert_eq!(code, 0);
    assert_eq!(
        h.process.flag("HEARTH_VERBOSE_OUTPUT").as_deref(),
        Some("true")
    );
    assert_eq!(h.ui.lines(), vec![build_info::banner_line()]);
    assert!(h.ui.errors().is_empty());
}

#[tokio::test]
async fn scenario_unknown_command() {
    let h = Harness::new(false);

    let code = h.run(&["frobnicate"]).await;

    assert_eq!(code, 1);
    assert_eq!(h.ui.errors().len(), 1);
    assert!(h.ui.errors()[0].contains("frobnicate"));
    assert!(h.calls().is_empty());
    assert_eq!(h.updates.built(), 0);
}

#[tokio::test]
async fn scenario_help_flag_redispatches_to_help() {
    let h = Harness::new(true);

    let code = h.run(&["build", "-h"]).await;

    assert_eq!(code, 0);
    assert_eq!(
        h.calls(),
        vec!["build:before_run:-h", "build:run:-h", "help:run:build"]
    );
}

// =============================================================================
// Help fallback
// =============================================================================

#[tokio::test]
async fn help_fallback_strips_every_help_token() {
    let h = Harness::new(true);

    h.run(&["build", "--help", "--prod", "-h"]).await;

    assert_eq!(h.calls().last().unwrap(), "help:run:build --prod");
}

#[tokio::test]
async fn help_fallback_returns_help_outcome() {
    let h = Harness::new(true).script("help", Script::Succeed(3));
    assert_eq!(h.run(&["build", "--help"]).await, 3);
}

#[tokio::test]
async fn help_requesting_help_is_rejected() {
    let h = Harness::new(true).script("help", Script::AlwaysHelp);

    let code = h.run(&["build", "--help"]).await;

    assert_eq!(code, 1);
    assert_eq!(h.ui.errors(), vec![DispatchError::HelpRecursion.to_string()]);
}

#[tokio::test]
async fn help_failure_is_reported() {
    let h = Harness::new(true).script("help", Script::FailRun);

    assert_eq!(h.run(&["build", "-h"]).await, 1);
    assert_eq!(h.ui.errors(), vec!["help failed"]);
}

// =============================================================================
// Error boundary
// =============================================================================

#[tokio::test]
async fn before_run_failure_is_reported_once() {
    let h = Harness::new(false).script("build", Script::FailBeforeRun);

    assert_eq!(h.run(&["build"]).await, 1);
    assert_eq!(h.ui.errors(), vec!["build could not prepare"]);
    assert_eq!(h.calls(), vec!["build:before_run:"]);
}

#[tokio::test]
async fn run_failure_is_reported_once() {
    let h = Harness::new(false).script("build", Script::FailRun);

    assert_eq!(h.run(&["build"]).await, 1);
    assert_eq!(h.ui.errors(), vec!["build failed"]);
}

#[tokio::test]
async fn update_check_failure_is_reported_once() {
    let h = Harness::new(false);
    h.updates.fail_with("registry unreachable");

    assert_eq!(h.run(&["build"]).await, 1);
    assert_eq!(h.ui.errors(), vec!["registry unreachable"]);
    assert_eq!(h.calls(), vec!["build:before_run:"]);
}

#[tokio::test]
async fn environment_failure_is_reported_once() {
    let h = Harness::new(false);
    let sources = EnvironmentSources::from(h.environment(&["build"]))
        .with_project(async { Err::<Arc<Project>, _>(anyhow!("no project here")) });

    let code = h.orchestrator().run(sources).await;

    assert_eq!(code, 1);
    assert_eq!(h.ui.errors(), vec!["no project here"]);
    assert!(h.ui.lines().is_empty());
}

#[tokio::test]
async fn chdir_failure_is_reported() {
    let h = Harness::new(false);
    h.process.fail_chdir();

    assert_eq!(h.run(&["build"]).await, 1);
    assert_eq!(h.ui.errors().len(), 1);
    assert!(h.calls().is_empty());
}

#[tokio::test]
async fn testing_mode_writes_diagnostics() {
    let h = Harness::new(true).script("build", Script::FailRun);

    h.run(&["build"]).await;

    assert!(h.diagnostics.text().starts_with("build failed\n"));
    assert_eq!(h.ui.errors().len(), 1);
}

#[tokio::test]
async fn no_diagnostics_outside_testing() {
    let h = Harness::new(false).script("build", Script::FailRun);
    h.run(&["build"]).await;
    assert!(h.diagnostics.text().is_empty());
}

// =============================================================================
// Update check
// =============================================================================

#[tokio::test]
async fn update_check_runs_and_completes_before_command() {
    let h = Harness::new(false);
    h.updates.delay(Duration::from_millis(10));

    assert_eq!(h.run(&["build"]).await, 0);
    assert_eq!(h.updates.built(), 1);
    assert_eq!(h.observation().updates_at_run, Some(1));
}

#[tokio::test]
async fn update_command_skips_update_check() {
    let h = Harness::new(false);
    assert_eq!(h.run(&["update"]).await, 0);
    assert_eq!(h.updates.built(), 0);
    assert_eq!(h.updates.completed(), 0);
}

#[tokio::test]
async fn testing_mode_skips_update_check() {
    let h = Harness::new(true);
    assert_eq!(h.run(&["build"]).await, 0);
    assert_eq!(h.updates.built(), 0);
}

#[tokio::test]
async fn update_check_runs_to_completion_when_before_run_fails() {
    let h = Harness::new(false).script("build", Script::FailBeforeRun);
    h.updates.delay(Duration::from_millis(50));

    assert_eq!(h.run(&["build"]).await, 1);
    assert_eq!(h.updates.completed(), 0);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(h.updates.built(), 1);
    assert_eq!(h.updates.completed(), 1);
    assert_eq!(h.ui.errors(), vec!["build could not prepare"]);
}

// =============================================================================
// Process state
// =============================================================================

#[tokio::test]
async fn every_verbose_topic_sets_a_flag() {
    let h = Harness::new(true);

    h.run(&["build", "--verbose", "output", "--verbose", "Live", "--verbose=tree"])
        .await;

    let flags = h.process.flags();
    assert_eq!(flags.len(), 3);
    assert_eq!(flags["HEARTH_VERBOSE_OUTPUT"], "true");
    assert_eq!(flags["HEARTH_VERBOSE_LIVE"], "true");
    assert_eq!(flags["HEARTH_VERBOSE_TREE"], "true");
}

#[tokio::test]
async fn invalid_verbose_topic_is_skipped() {
    let h = Harness::new(true);

    let code = h
        .run(&["build", "--verbose", "a=b", "--verbose", "output"])
        .await;

    assert_eq!(code, 0);
    assert!(h.ui.errors().is_empty());
    let flags = h.process.flags();
    assert_eq!(flags.len(), 1);
    assert_eq!(flags["HEARTH_VERBOSE_OUTPUT"], "true");
    assert_eq!(
        h.calls(),
        vec![
            "build:before_run:--verbose a=b --verbose output",
            "build:run:--verbose a=b --verbose output",
        ]
    );
}

#[tokio::test]
async fn verbose_flags_set_even_when_command_fails() {
    let h = Harness::new(true).script("build", Script::FailRun);
    h.run(&["build", "--verbose", "output"]).await;
    assert_eq!(h.process.flag("HEARTH_VERBOSE_OUTPUT").as_deref(), Some("true"));
}

#[tokio::test]
async fn working_directory_is_project_root_before_command() {
    let h = Harness::new(false);

    h.run(&["build"]).await;

    assert_eq!(h.process.chdir_calls(), 1);
    assert_eq!(
        h.observation().cwd_at_before_run,
        Some(PathBuf::from(PROJECT_ROOT))
    );
}

#[tokio::test]
async fn testing_mode_keeps_working_directory() {
    let h = Harness::new(true);
    h.run(&["build"]).await;
    assert_eq!(h.process.chdir_calls(), 0);
    assert_eq!(h.observation().cwd_at_before_run, None);
}

// =============================================================================
// Banner, platform warning, ordering
// =============================================================================

#[tokio::test]
async fn banner_written_before_before_run() {
    let h = Harness::new(true);
    h.run(&["build"]).await;
    assert_eq!(
        h.observation().lines_at_before_run,
        vec![build_info::banner_line()]
    );
}

#[tokio::test]
async fn old_runtime_warns_then_continues() {
    let mut h = Harness::new(false);
    h.platform = Platform::new("linux", "rustc 1.60.0 (7737e0b5c 2022-04-04)");

    let code = h.run(&["build"]).await;

    assert_eq!(code, 0);
    let lines = h.ui.lines();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("warning: future versions of hearth will not support rustc 1.60.0"));
    assert_eq!(lines[1], build_info::banner_line());
}

#[tokio::test]
async fn old_runtime_silent_in_testing_mode() {
    let mut h = Harness::new(true);
    h.platform = Platform::new("linux", "rustc 1.60.0 (7737e0b5c 2022-04-04)");

    h.run(&["build"]).await;

    assert_eq!(h.ui.lines(), vec![build_info::banner_line()]);
}

// =============================================================================
// Flush strategy and environment resolution
// =============================================================================

#[tokio::test]
async fn delayed_flush_holds_back_exit_code() {
    let mut h = Harness::new(true);
    h.flush = FlushStrategy::Delay(Duration::from_millis(30));

    let start = Instant::now();
    let code = h.run(&["build"]).await;

    assert_eq!(code, 0);
    assert!(start.elapsed() >= Duration::from_millis(30));
}

#[tokio::test]
async fn pending_environment_fields_are_resolved_first() {
    let h = Harness::new(false);
    let sources = EnvironmentSources::from(h.environment(&["build"])).with_project(async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        Ok::<_, anyhow::Error>(Arc::new(Project::new("/work/late")))
    });

    let code = h.orchestrator().run(sources).await;

    assert_eq!(code, 0);
    assert_eq!(
        h.observation().cwd_at_before_run,
        Some(PathBuf::from("/work/late"))
    );
}

// =============================================================================
// Built-in commands
// =============================================================================

fn builtin_environment(args: &[&str]) -> Environment {
    Environment {
        cli_args: args.iter().map(|s| s.to_string()).collect(),
        commands: Arc::new(builtin_registry().unwrap()),
        tasks: Arc::new(TaskRegistry::new()),
        project: Arc::new(Project::new(PROJECT_ROOT)),
        settings: Arc::new(Settings::default()),
    }
}

#[tokio::test]
async fn prefix_help_describes_resolved_command() {
    let h = Harness::new(true);

    let code = h.orchestrator().run(builtin_environment(&["vers", "-h"])).await;

    assert_eq!(code, 0);
    assert!(h.ui.errors().is_empty());
    assert!(h.ui.lines().contains(&"hearth version".to_string()));
}

#[tokio::test]
async fn prefix_runs_resolved_command() {
    let h = Harness::new(true);

    let code = h.orchestrator().run(builtin_environment(&["vers"])).await;

    assert_eq!(code, 0);
    assert!(h
        .ui
        .lines()
        .contains(&format!("project: {}", PROJECT_ROOT)));
}
