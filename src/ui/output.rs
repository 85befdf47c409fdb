//! ui::output
//!
//! Terminal output.
//!
//! # Design
//!
//! Normal lines go to stdout and respect the quiet flag. Errors always go to
//! stderr. In debug mode errors are rendered with their full cause chain.

use std::io::Write;

use super::Ui;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Quiet mode - errors only
    Quiet,
    /// Normal mode - standard output
    #[default]
    Normal,
    /// Debug mode - errors include their cause chain
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// [`Ui`] implementation backed by the process's standard streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalUi {
    verbosity: Verbosity,
}

impl TerminalUi {
    /// Create a terminal UI with the given verbosity.
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    /// The configured verbosity.
    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }
}

impl Ui for TerminalUi {
    fn write_line(&self, text: &str) {
        if self.verbosity != Verbosity::Quiet {
            let _ = writeln!(std::io::stdout().lock(), "{}", text);
        }
    }

    fn write_error(&self, error: &anyhow::Error) {
        let _ = writeln!(std::io::stderr().lock(), "{}", format_error(error, self.verbosity));
    }
}

/// Render an error for the terminal.
///
/// Debug verbosity shows the `Debug` rendering (cause chain and backtrace when
/// captured); other levels show the one-line alternate `Display` form.
pub fn format_error(error: &anyhow::Error, verbosity: Verbosity) -> String {
    match verbosity {
        Verbosity::Debug => format!("error: {:?}", error),
        _ => format!("error: {:#}", error),
    }
}
