//! update::mock
//!
//! Counting update checker for tests.
//!
//! # Example
//!
//! ```
//! use hearthwork::update::mock::MockUpdateChecker;
//! use hearthwork::update::UpdateChecker;
//!
//! let checker = MockUpdateChecker::new();
//! checker.fail_with("offline");
//!
//! # tokio_test::block_on(async {
//! let err = checker.check_for_updates().await.unwrap_err();
//! assert_eq!(err.to_string(), "offline");
//! assert_eq!(checker.completed(), 1);
//! assert_eq!(checker.built(), 0);
//! # });
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::{UpdateChecker, UpdateCheckerFactory};

/// Spy checker.
///
/// Counts constructions and completed checks; can be told to fail or to take
/// a while. Clones share counters.
#[derive(Debug, Clone, Default)]
pub struct MockUpdateChecker {
    inner: Arc<MockUpdateInner>,
}

#[derive(Debug, Default)]
struct MockUpdateInner {
    built: AtomicUsize,
    completed: AtomicUsize,
    failure: Mutex<Option<String>>,
    delay: Mutex<Option<Duration>>,
}

impl MockUpdateChecker {
    /// Create a checker that succeeds immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every check fail with `message`.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.inner.failure.lock().unwrap_or_else(|e| e.into_inner()) = Some(message.into());
    }

    /// Make every check sleep before finishing.
    pub fn delay(&self, delay: Duration) {
        *self.inner.delay.lock().unwrap_or_else(|e| e.into_inner()) = Some(delay);
    }

    /// Number of checkers the factory built.
    pub fn built(&self) -> usize {
        self.inner.built.load(Ordering::SeqCst)
    }

    /// Number of checks that ran to completion.
    pub fn completed(&self) -> usize {
        self.inner.completed.load(Ordering::SeqCst)
    }

    /// Factory producing checkers that report to this spy.
    pub fn factory(&self) -> UpdateCheckerFactory {
        let spy = self.clone();
        UpdateCheckerFactory::new(move |_ui, _settings| {
            spy.inner.built.fetch_add(1, Ordering::SeqCst);
            Box::new(spy.clone())
        })
    }
}

#[async_trait]
impl UpdateChecker for MockUpdateChecker {
    async fn check_for_updates(&self) -> Result<()> {
        let delay = *self.inner.delay.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.completed.fetch_add(1, Ordering::SeqCst);

        let failure = self
            .inner
            .failure
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        match failure {
            Some(message) => Err(anyhow!(message)),
            None => Ok(()),
        }
    }
}
