//! Scratch directory guard.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::logging::JobLogger;

/// Scratch directory owned by one job.
///
/// Created by `create`, removed with everything in it when the guard is
/// dropped, whichever way the job ends. Two jobs with the same series and
/// title share a path and will trample each other.
pub struct TempWorkspace {
    path: PathBuf,
    logger: Arc<JobLogger>,
    removed: bool,
}

impl TempWorkspace {
    /// Create the directory (and parents) and take ownership of it.
    pub fn create(path: impl Into<PathBuf>, logger: Arc<JobLogger>) -> io::Result<Self> {
        let path = path.into();
        fs::create_dir_all(&path)?;
        tracing::debug!("Created workspace {}", path.display());
        Ok(Self {
            path,
            logger,
            removed: false,
        })
    }

    /// The workspace directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the directory now, reporting errors.
    pub fn remove(mut self) -> io::Result<()> {
        self.removed = true;
        self.remove_dir()
    }

    fn remove_dir(&self) -> io::Result<()> {
        if self.path.is_dir() {
            self.logger.info("Cleaning up temporary files...");
            fs::remove_dir_all(&self.path)?;
        }
        Ok(())
    }
}

impl Drop for TempWorkspace {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = self.remove_dir() {
            self.logger.warn(&format!(
                "Failed to remove {}: {}",
                self.path.display(),
                e
            ));
        }
    }
}
