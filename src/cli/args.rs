//! cli::args
//!
//! Outer command-line shell using clap derive.
//!
//! Only options placed before the command name are parsed here. Everything
//! from the command name on is kept as raw tokens and handed to the
//! orchestrator untouched, including `--help` and `-h`.
//!
//! # Global Flags
//!
//! - `--cwd <path>`: Run as if hearth was started in that directory
//! - `--debug`: Enable debug logging and detailed error output
//! - `--quiet` / `-q`: Errors only

use clap::Parser;
use std::path::PathBuf;

/// hearth - developer CLI for Rust projects
#[derive(Parser, Debug)]
#[command(name = "hearth")]
#[command(
    disable_help_flag = true,
    disable_version_flag = true,
    disable_help_subcommand = true
)]
pub struct Cli {
    /// Run as if hearth was started in this directory
    #[arg(long, env = "HEARTH_CWD")]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Errors only
    #[arg(short, long)]
    pub quiet: bool,

    /// Command name followed by its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
