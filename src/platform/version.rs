//! platform::version
//!
//! Version parsing and ordering.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Oldest rustc release this tool supports without a warning.
pub const MIN_RUNTIME_VERSION: Version = Version::new(1, 74, 0);

/// Errors parsing a version string.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid version '{0}', expected MAJOR.MINOR[.PATCH]")]
pub struct VersionParseError(pub String);

/// A `MAJOR.MINOR.PATCH` version of the runtime or of this tool.
///
/// Pre-release suffixes are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Construct a version.
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Find the first version-looking token in a tool's `--version` output.
    ///
    /// ```
    /// use hearthwork::platform::Version;
    ///
    /// let v = Version::extract("rustc 1.80.1 (3f5fd8dd4 2024-08-06)").unwrap();
    /// assert_eq!(v, Version::new(1, 80, 1));
    /// assert_eq!(Version::extract("unknown"), None);
    /// ```
    pub fn extract(text: &str) -> Option<Self> {
        text.split_whitespace()
            .map(|token| token.trim_start_matches('v'))
            .find_map(|token| token.parse().ok())
    }
}

impl FromStr for Version {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || VersionParseError(s.to_string());
        // Drop pre-release and build metadata: 1.82.0-nightly, 1.0.0+abc
        let core = s.split(['-', '+']).next().unwrap_or_default();
        let mut parts = core.split('.');

        let major = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let minor = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let patch = match parts.next() {
            Some(p) => p.parse().map_err(|_| err())?,
            None => 0,
        };
        if parts.next().is_some() {
            return Err(err());
        }

        Ok(Self::new(major, minor, patch))
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
