//! platform::flush
//!
//! Output flush strategy.
//!
//! Windows consoles flush stdout asynchronously, so the final exit code is
//! held back briefly there. Every other platform returns immediately.

use std::time::Duration;

/// Delay applied on platforms with asynchronous stdout.
pub const ASYNC_STDOUT_FLUSH_DELAY: Duration = Duration::from_millis(250);

/// How to wait for buffered output before returning the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushStrategy {
    /// Return immediately.
    #[default]
    Immediate,
    /// Sleep for the given duration.
    Delay(Duration),
}

impl FlushStrategy {
    /// Strategy for an OS name as in `std::env::consts::OS`.
    pub fn for_os(os: &str) -> Self {
        if os == "windows" {
            FlushStrategy::Delay(ASYNC_STDOUT_FLUSH_DELAY)
        } else {
            FlushStrategy::Immediate
        }
    }

    /// Wait according to the strategy.
    pub async fn flush(&self) {
        if let FlushStrategy::Delay(delay) = self {
            tokio::time::sleep(*delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn windows_delays_250ms() {
        assert_eq!(
            FlushStrategy::for_os("windows"),
            FlushStrategy::Delay(Duration::from_millis(250))
        );
        assert_eq!(FlushStrategy::for_os("linux"), FlushStrategy::Immediate);
    }

    #[tokio::test]
    async fn delay_waits_at_least_duration() {
        let start = Instant::now();
        FlushStrategy::Delay(Duration::from_millis(20)).flush().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn immediate_does_not_sleep() {
        let start = Instant::now();
        FlushStrategy::Immediate.flush().await;
        assert!(start.elapsed() < Duration::from_millis(200));
    }
}
