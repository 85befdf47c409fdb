//! ui
//!
//! User-facing output sinks.
//!
//! # Modules
//!
//! - [`output`] - Terminal implementation writing to stdout/stderr
//! - [`mock`] - Recording implementation for tests
//!
//! # Design
//!
//! Every command and the orchestrator write through the [`Ui`] trait, never
//! directly to the terminal. The orchestrator holds one `Arc<dyn Ui>` for its
//! whole lifetime and hands clones of it to each command it constructs.

pub mod mock;
pub mod output;

pub use output::{TerminalUi, Verbosity};

/// Line and error output sink.
///
/// Implementations must not fail: output errors are swallowed so that the
/// error boundary can always report.
pub trait Ui: Send + Sync {
    /// Write a single line of normal output.
    fn write_line(&self, text: &str);

    /// Report an error to the user.
    fn write_error(&self, error: &anyhow::Error);
}
