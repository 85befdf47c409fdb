//! ui::mock
//!
//! Recording UI for deterministic testing.
//!
//! # Example
//!
//! ```
//! use hearthwork::ui::mock::MockUi;
//! use hearthwork::ui::Ui;
//!
//! let ui = MockUi::new();
//! ui.write_line("version: 0.3.0");
//! ui.write_error(&anyhow::anyhow!("boom"));
//!
//! assert_eq!(ui.lines(), vec!["version: 0.3.0".to_string()]);
//! assert_eq!(ui.errors(), vec!["boom".to_string()]);
//! ```

use std::sync::{Arc, Mutex};

use super::Ui;

/// Mock UI recording every line and error.
///
/// Clones share the same recording.
#[derive(Debug, Clone, Default)]
pub struct MockUi {
    inner: Arc<Mutex<MockUiInner>>,
}

#[derive(Debug, Default)]
struct MockUiInner {
    lines: Vec<String>,
    errors: Vec<String>,
}

impl MockUi {
    /// Create an empty recording UI.
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines written so far, in order.
    pub fn lines(&self) -> Vec<String> {
        self.lock().lines.clone()
    }

    /// All reported errors (alternate `Display` form), in order.
    pub fn errors(&self) -> Vec<String> {
        self.lock().errors.clone()
    }

    /// Number of lines equal to `text`.
    pub fn count_lines(&self, text: &str) -> usize {
        self.lock().lines.iter().filter(|l| l.as_str() == text).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockUiInner> {
        // A poisoned recording is still readable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Ui for MockUi {
    fn write_line(&self, text: &str) {
        self.lock().lines.push(text.to_string());
    }

    fn write_error(&self, error: &anyhow::Error) {
        self.lock().errors.push(format!("{:#}", error));
    }
}
