//! engine::boundary
//!
//! The single terminal error handler.
//!
//! # Invariants
//!
//! - Every failure reaching the boundary is forwarded to [`Ui::write_error`]
//!   exactly once
//! - [`ErrorBoundary::report`] always returns [`EXIT_FAILURE`] and never fails
//! - In testing mode the message and trace also go to the diagnostic writer,
//!   which is separate from the UI

use std::io::Write;
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::ui::Ui;

/// Exit code for every failure that reaches the boundary.
pub const EXIT_FAILURE: i32 = 1;

/// Converts failures into a report and an exit code.
pub struct ErrorBoundary {
    ui: Arc<dyn Ui>,
    testing: bool,
    diagnostics: Mutex<Box<dyn Write + Send>>,
}

impl ErrorBoundary {
    /// Boundary reporting to `ui`, with diagnostics on stderr.
    pub fn new(ui: Arc<dyn Ui>, testing: bool) -> Self {
        Self {
            ui,
            testing,
            diagnostics: Mutex::new(Box::new(std::io::stderr())),
        }
    }

    /// Send testing-mode diagnostics to `writer` instead of stderr.
    pub fn with_diagnostics(mut self, writer: Box<dyn Write + Send>) -> Self {
        self.diagnostics = Mutex::new(writer);
        self
    }

    /// Report a failure and return the exit code.
    pub fn report(&self, error: anyhow::Error) -> i32 {
        if self.testing {
            self.write_diagnostics(&error);
        }
        debug!(error = %format!("{:#}", error), "command failed");
        self.ui.write_error(&error);
        EXIT_FAILURE
    }

    fn write_diagnostics(&self, error: &anyhow::Error) {
        let mut out = self.diagnostics.lock().unwrap_or_else(|e| e.into_inner());
        let message = error.to_string();
        if !message.is_empty() {
            let _ = writeln!(out, "{}", message);
        }
        let _ = writeln!(out, "{:?}", error);
        let _ = out.flush();
    }
}

impl std::fmt::Debug for ErrorBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorBoundary")
            .field("testing", &self.testing)
            .finish_non_exhaustive()
    }
}
