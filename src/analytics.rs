//! analytics
//!
//! Usage-event sink handed to every command.
//!
//! The binary wires [`NoopAnalytics`]; nothing is sent anywhere. Commands
//! still report through the trait so a real sink can be dropped in later.

use std::sync::{Arc, Mutex};

/// A usage event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsEvent {
    /// A command ran to completion.
    Command {
        /// Command name.
        name: String,
    },
    /// Help was shown, optionally for a specific command.
    Help {
        /// Command the help was requested for.
        topic: Option<String>,
    },
}

/// Usage-event sink.
pub trait Analytics: Send + Sync {
    /// Record an event. Must not fail.
    fn track(&self, event: AnalyticsEvent);
}

/// Analytics sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAnalytics;

impl Analytics for NoopAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        tracing::trace!(?event, "analytics event dropped");
    }
}

/// Analytics sink that keeps events in memory.
///
/// Clones share the same event list.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnalytics {
    events: Arc<Mutex<Vec<AnalyticsEvent>>>,
}

impl RecordingAnalytics {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far, in order.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Analytics for RecordingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(event);
    }
}
