//! hearth - developer CLI for Rust projects
//!
//! The crate's core is a command-dispatch orchestrator: it takes the raw
//! arguments of one invocation, resolves the command, runs it through its
//! two-phase lifecycle, and turns whatever happens into a single exit code.
//!
//! # Architecture
//!
//! - [`cli`] - Outer argument shell, logging setup, built-in commands
//! - [`engine`] - Resolution, lifecycle sequencing, help fallback, error boundary
//! - [`core`] - Environment, invocation, project discovery, settings
//! - [`update`] - Background update check
//! - [`process`] - Process-wide state capability (flags, working directory)
//! - [`platform`] - Runtime version check and output flush strategy
//! - [`tasks`] - Named reusable work shared between commands
//! - [`ui`] - Output sinks
//! - [`analytics`] - Usage-event sink
//!
//! # Invariants
//!
//! 1. One top-level command per process
//! 2. Every command receives the same collaborator set
//! 3. Every failure is reported exactly once and exits with code 1
//! 4. Process-wide state is written only through [`process::ProcessEnvironment`]

pub mod analytics;
pub mod build_info;
pub mod cli;
pub mod core;
pub mod engine;
pub mod platform;
pub mod process;
pub mod tasks;
pub mod ui;
pub mod update;
