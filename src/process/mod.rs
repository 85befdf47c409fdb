//! process
//!
//! Capability over process-wide mutable state.
//!
//! # Design
//!
//! The orchestrator never touches `std::env` directly. Verbose flags and the
//! working directory are written through [`ProcessEnvironment`], so tests can
//! observe the writes with [`mock::MockProcess`] without mutating the test
//! process.
//!
//! # Invariants
//!
//! - Each piece of state is written at most once per invocation
//! - Nothing is ever restored; the process exits after one command

pub mod mock;

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Namespace prefix for verbose flags set from `--verbose <X>`.
pub const VERBOSE_FLAG_PREFIX: &str = "HEARTH_VERBOSE_";

/// Errors from process-state writes.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Flag name cannot be used as an environment variable name.
    #[error("invalid process flag name '{0}'")]
    InvalidFlagName(String),

    /// Changing the working directory failed.
    #[error("failed to change working directory to '{path}': {source}")]
    WorkingDirectory {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Writes to process-wide state.
pub trait ProcessEnvironment: Send + Sync {
    /// Set a process-wide flag (an environment variable).
    fn set_flag(&self, name: &str, value: &str) -> Result<(), ProcessError>;

    /// Change the process's current working directory.
    fn set_working_directory(&self, path: &Path) -> Result<(), ProcessError>;
}

/// [`ProcessEnvironment`] that mutates the real process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcess;

impl ProcessEnvironment for SystemProcess {
    fn set_flag(&self, name: &str, value: &str) -> Result<(), ProcessError> {
        validate_flag_name(name)?;
        std::env::set_var(name, value);
        Ok(())
    }

    fn set_working_directory(&self, path: &Path) -> Result<(), ProcessError> {
        std::env::set_current_dir(path).map_err(|source| ProcessError::WorkingDirectory {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Reject names `std::env::set_var` would panic on.
pub(crate) fn validate_flag_name(name: &str) -> Result<(), ProcessError> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(ProcessError::InvalidFlagName(name.to_string()));
    }
    Ok(())
}

/// Name of the process flag set for `--verbose <topic>`.
///
/// ```
/// use hearthwork::process::verbose_flag_name;
///
/// assert_eq!(verbose_flag_name("output"), "HEARTH_VERBOSE_OUTPUT");
/// ```
pub fn verbose_flag_name(topic: &str) -> String {
    format!("{}{}", VERBOSE_FLAG_PREFIX, topic.to_uppercase())
}

/// Collect the values of every `--verbose <X>` / `--verbose=<X>` option.
///
/// A following token that starts with `-` is another option, not a value.
pub fn verbose_topics(args: &[String]) -> Vec<&str> {
    let mut topics = Vec::new();
    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        if arg == "--verbose" {
            if let Some(next) = iter.peek() {
                if !next.starts_with('-') {
                    topics.push(next.as_str());
                    iter.next();
                }
            }
        } else if let Some(value) = arg.strip_prefix("--verbose=") {
            if !value.is_empty() {
                topics.push(value);
            }
        }
    }
    topics
}
