//! process::mock
//!
//! Recording process capability for tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::{validate_flag_name, ProcessEnvironment, ProcessError};

/// Mock process state.
///
/// Records flags and directory changes instead of applying them. Clones share
/// state.
#[derive(Debug, Clone, Default)]
pub struct MockProcess {
    inner: Arc<Mutex<MockProcessInner>>,
}

#[derive(Debug, Default)]
struct MockProcessInner {
    flags: BTreeMap<String, String>,
    working_directory: Option<PathBuf>,
    chdir_calls: usize,
    fail_chdir: bool,
}

impl MockProcess {
    /// Create empty mock state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every `set_working_directory` call fail.
    pub fn fail_chdir(&self) {
        self.lock().fail_chdir = true;
    }

    /// Value of a flag, if set.
    pub fn flag(&self, name: &str) -> Option<String> {
        self.lock().flags.get(name).cloned()
    }

    /// All flags set so far.
    pub fn flags(&self) -> BTreeMap<String, String> {
        self.lock().flags.clone()
    }

    /// Last directory passed to `set_working_directory`.
    pub fn working_directory(&self) -> Option<PathBuf> {
        self.lock().working_directory.clone()
    }

    /// Number of `set_working_directory` calls.
    pub fn chdir_calls(&self) -> usize {
        self.lock().chdir_calls
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockProcessInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProcessEnvironment for MockProcess {
    fn set_flag(&self, name: &str, value: &str) -> Result<(), ProcessError> {
        validate_flag_name(name)?;
        self.lock().flags.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_working_directory(&self, path: &Path) -> Result<(), ProcessError> {
        let mut inner = self.lock();
        inner.chdir_calls += 1;
        if inner.fail_chdir {
            return Err(ProcessError::WorkingDirectory {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "mock chdir failure"),
            });
        }
        inner.working_directory = Some(path.to_path_buf());
        Ok(())
    }
}
