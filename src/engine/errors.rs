//! engine::errors
//!
//! Dispatch error types.
//!
//! These are the orchestrator's own failures. They travel through
//! `anyhow::Error` like every other failure and can be recovered with
//! `downcast_ref::<DispatchError>()`.

use thiserror::Error;

/// Errors raised by the dispatch machinery itself.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// No command matches the given name.
    #[error("the command '{0}' is not registered. Run 'hearth help' for a list of commands.")]
    UnknownCommand(String),

    /// The name is a prefix of several commands.
    #[error("the command '{name}' is ambiguous; did you mean one of: {}", .candidates.join(", "))]
    AmbiguousCommand {
        /// Name as typed
        name: String,
        /// Matching command names
        candidates: Vec<String>,
    },

    /// A command name or alias was registered twice.
    #[error("command name '{0}' is already registered")]
    DuplicateCommand(String),

    /// The help command itself asked for help.
    #[error("the help command requested help again; refusing to re-dispatch")]
    HelpRecursion,

    /// The background update check panicked or was cancelled.
    #[error("update check did not complete: {0}")]
    UpdateTask(String),
}

impl DispatchError {
    /// Check if this is a command resolution failure.
    pub fn is_resolution(&self) -> bool {
        matches!(
            self,
            DispatchError::UnknownCommand(_) | DispatchError::AmbiguousCommand { .. }
        )
    }
}
