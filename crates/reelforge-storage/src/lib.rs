//! Persistent output store for rendered videos.
//!
//! This crate provides:
//! - Publish-by-copy under freshly generated unique names
//! - Public `/outputs/...` reference paths
//! - Bulk deletion of all published artifacts

pub mod error;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use store::{OutputStore, RenderResult, PUBLIC_PREFIX};
