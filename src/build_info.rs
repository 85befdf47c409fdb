//! build_info
//!
//! Compile-time build metadata exposed to the version banner and the
//! `version` command.

/// Package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("HEARTH_BUILD_GIT_HASH");

/// `rustc --version` output of the toolchain that built this binary.
pub const BUILD_RUSTC_VERSION: &str = env!("HEARTH_BUILD_RUSTC_VERSION");

/// The one-line banner written before every command runs.
pub fn banner_line() -> String {
    format!("version: {VERSION}")
}

/// Multi-line text printed by the `version` command.
pub fn version_text() -> String {
    format!("hearth {VERSION}\ncommit: {GIT_COMMIT}\nbuilt with: {BUILD_RUSTC_VERSION}")
}
