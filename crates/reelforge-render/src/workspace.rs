//! Job-scoped transient workspaces.
//!
//! Every job gets an exclusively owned directory named after its ID, holding
//! the narration audio, both subtitle variants, any downloaded clip, and the
//! intermediate render. The directory is removed on every exit path:
//! `close()` on the normal paths, with a synchronous `Drop` fallback should
//! the workspace be dropped mid-flight.

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use reelforge_models::JobId;

/// An exclusively owned, job-scoped transient directory.
#[derive(Debug)]
pub struct Workspace {
    dir: PathBuf,
    closed: bool,
}

impl Workspace {
    /// Create the workspace directory for a job under `work_root`.
    pub async fn create(work_root: &Path, id: &JobId) -> std::io::Result<Self> {
        let dir = work_root.join(id.as_str());
        fs::create_dir_all(&dir).await?;
        debug!(dir = %dir.display(), "Workspace created");
        Ok(Self { dir, closed: false })
    }

    /// The workspace directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a file inside the workspace.
    pub fn file(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    /// Remove the workspace and everything in it.
    pub async fn close(mut self) {
        self.closed = true;
        if let Err(e) = fs::remove_dir_all(&self.dir).await {
            warn!(dir = %self.dir.display(), "Failed to remove workspace: {}", e);
        } else {
            debug!(dir = %self.dir.display(), "Workspace removed");
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        if !self.closed {
            // Emergency cleanup; the async close() was skipped (panic or
            // early drop). Best effort, blocking.
            if let Err(e) = std::fs::remove_dir_all(&self.dir) {
                warn!(
                    dir = %self.dir.display(),
                    "Workspace dropped without close(), cleanup failed: {}", e
                );
            }
        }
    }
}
