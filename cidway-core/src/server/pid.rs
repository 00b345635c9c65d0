use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// A pid file holding the current process id.
#[derive(Debug, Clone)]
pub struct PidFile {
    path: PathBuf,
}

impl PidFile {
    /// Writes the current process id to `path`, replacing any previous contents.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        fs::write(&path, std::process::id().to_string())
            .with_context(|| format!("failed to write pid file {}", path.display()))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Best-effort removal.
    pub fn remove(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            tracing::debug!(error = %e, pid_file = %self.path.display(), "failed to remove pid file");
        }
    }
}
