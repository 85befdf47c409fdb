//! platform
//!
//! Facts about the host the orchestrator runs on.
//!
//! # Modules
//!
//! - [`version`] - Runtime (rustc) version parsing and the minimum-version check
//! - [`flush`] - Output flush strategy applied before the exit code is returned
//!
//! The runtime this tool drives is the Rust toolchain on `PATH`. It is probed
//! once by the binary; tests construct [`Platform`] values directly.

pub mod flush;
pub mod version;

pub use flush::FlushStrategy;
pub use version::{Version, MIN_RUNTIME_VERSION};

use crate::build_info;

/// Host operating system and runtime version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Operating system name as in `std::env::consts::OS`.
    pub os: String,
    /// Raw runtime version string, e.g. `rustc 1.80.1 (3f5fd8dd4 2024-08-06)`.
    pub runtime_version: String,
}

impl Platform {
    /// Construct a platform description.
    pub fn new(os: impl Into<String>, runtime_version: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            runtime_version: runtime_version.into(),
        }
    }

    /// Describe the current host.
    ///
    /// Runs `rustc --version`; falls back to the toolchain that built this
    /// binary when rustc is not on `PATH`.
    pub async fn detect() -> Self {
        let probed = tokio::process::Command::new("rustc")
            .arg("--version")
            .output()
            .await
            .ok()
            .filter(|out| out.status.success())
            .and_then(|out| String::from_utf8(out.stdout).ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let runtime_version = match probed {
            Some(v) => v,
            None => {
                tracing::debug!("rustc not found on PATH, using build toolchain version");
                build_info::BUILD_RUSTC_VERSION.to_string()
            }
        };

        Self::new(std::env::consts::OS, runtime_version)
    }

    /// Whether the runtime meets `minimum`.
    ///
    /// A version string that cannot be parsed is treated as supported.
    pub fn is_supported(&self, minimum: &Version) -> bool {
        match Version::extract(&self.runtime_version) {
            Some(found) => found >= *minimum,
            None => true,
        }
    }

    /// The flush strategy appropriate for this platform.
    pub fn flush_strategy(&self) -> FlushStrategy {
        FlushStrategy::for_os(&self.os)
    }
}
