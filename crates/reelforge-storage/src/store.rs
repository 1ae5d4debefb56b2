//! Flat-directory output store.
//!
//! Published artifacts live in a single directory under freshly generated
//! unique names and are addressed as `/outputs/<name>`. Publishing copies
//! rather than moves, so the job workspace can be torn down without racing
//! readers of the published file.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::StorageResult;

/// Public URL prefix under which published files are served.
pub const PUBLIC_PREFIX: &str = "/outputs";

/// A published render artifact.
#[derive(Debug, Clone, Serialize)]
pub struct RenderResult {
    /// File name inside the output directory
    pub file_name: String,
    /// Public reference path, e.g. `/outputs/<uuid>.mp4`
    pub public_path: String,
}

/// The persistent output store.
#[derive(Debug, Clone)]
pub struct OutputStore {
    root: PathBuf,
}

impl OutputStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// first publish.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create from environment variables.
    pub fn from_env() -> Self {
        Self::new(std::env::var("OUTPUT_DIR").unwrap_or_else(|_| "/app/outputs".to_string()))
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Copy a rendered file into the store under a fresh unique name.
    pub async fn publish(&self, src: &Path) -> StorageResult<RenderResult> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).await?;
        }

        let file_name = format!("{}.mp4", Uuid::new_v4());
        let dest = self.root.join(&file_name);

        fs::copy(src, &dest).await?;

        info!(
            src = %src.display(),
            dest = %dest.display(),
            "Published render artifact"
        );

        Ok(RenderResult {
            public_path: format!("{}/{}", PUBLIC_PREFIX, file_name),
            file_name,
        })
    }

    /// Delete every file in the store. Returns the number removed.
    ///
    /// Idempotent: an empty or absent store yields zero.
    pub async fn wipe(&self) -> StorageResult<usize> {
        if !self.root.exists() {
            return Ok(0);
        }

        let mut deleted = 0;
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                fs::remove_file(entry.path()).await?;
                deleted += 1;
            }
        }

        debug!(deleted, root = %self.root.display(), "Wiped output store");
        Ok(deleted)
    }
}
