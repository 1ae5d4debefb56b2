//! Pipeline error types.

use thiserror::Error;

use crate::source::SourceError;

pub type RenderResult<T> = Result<T, RenderError>;

/// A job-level failure.
///
/// Collaborator failures with a fallback (stock search/download) are
/// absorbed inside the source resolver and never surface here.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Source resolution failed: {0}")]
    Source(#[from] SourceError),

    #[error("Media error: {0}")]
    Media(#[from] reelforge_media::MediaError),

    #[error("Storage error: {0}")]
    Storage(#[from] reelforge_storage::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Whether this failure maps to a "not found" condition for the caller.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            RenderError::Source(SourceError::ClipNotFound(_))
                | RenderError::Source(SourceError::NoLibraryClips)
        )
    }
}
