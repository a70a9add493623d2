use crate::error::Result;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// An empty file whose existence tells a push hook to skip its checks.
///
/// Any stale file is removed before creating it, and it is removed again when
/// the value is dropped. Not safe for concurrent use of the same path.
#[derive(Debug)]
pub struct SentinelFile {
    path: PathBuf,
}

impl SentinelFile {
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        remove_if_present(&path)?;
        File::create(&path)?;
        tracing::debug!(path = %path.display(), "created sentinel file");
        Ok(SentinelFile { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SentinelFile {
    fn drop(&mut self) {
        if let Err(e) = remove_if_present(&self.path) {
            tracing::warn!(path = %self.path.display(), error = %e, "could not remove sentinel file");
        }
    }
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
