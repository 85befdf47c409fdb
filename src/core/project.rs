//! core::project
//!
//! Project discovery.
//!
//! # Discovery
//!
//! Starting from a directory, the project root is:
//! 1. the nearest ancestor containing `hearth.toml`, else
//! 2. the nearest ancestor containing `Cargo.toml`, else
//! 3. the start directory itself.
//!
//! # Example
//!
//! ```
//! use hearthwork::core::project::Project;
//! use std::path::PathBuf;
//!
//! let project = Project::new("/work/app");
//! assert_eq!(project.root, PathBuf::from("/work/app"));
//! assert_eq!(project.name.as_deref(), Some("app"));
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Marker file naming an explicit project root.
pub const PROJECT_MARKER: &str = "hearth.toml";

/// Fallback marker: a Cargo manifest.
pub const CARGO_MANIFEST: &str = "Cargo.toml";

/// Errors from project discovery.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// Start directory could not be resolved.
    #[error("cannot resolve project directory '{path}': {source}")]
    InvalidStart {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The project a command operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    /// Filesystem root of the project.
    pub root: PathBuf,
    /// Display name (the root directory's name).
    pub name: Option<String>,
}

impl Project {
    /// Create a project rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned());
        Self { root, name }
    }

    /// Discover the project containing `start`.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectError::InvalidStart`] if `start` does not exist.
    pub fn discover(start: &Path) -> Result<Self, ProjectError> {
        let start = start
            .canonicalize()
            .map_err(|source| ProjectError::InvalidStart {
                path: start.to_path_buf(),
                source,
            })?;

        let root = find_ancestor_with(&start, PROJECT_MARKER)
            .or_else(|| find_ancestor_with(&start, CARGO_MANIFEST))
            .unwrap_or(start);

        Ok(Self::new(root))
    }

    /// Whether the root carries an explicit `hearth.toml` marker.
    pub fn has_marker(&self) -> bool {
        self.root.join(PROJECT_MARKER).is_file()
    }
}

fn find_ancestor_with(start: &Path, file: &str) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(file).is_file())
        .map(Path::to_path_buf)
}
