//! Video composition pipeline.
//!
//! This crate coordinates one render job end to end:
//! - Job-scoped workspace with unconditional cleanup
//! - Background clip resolution (stock footage with local-library fallback)
//! - Start-offset calculation for long library clips
//! - Subtitle styling, filter-graph construction, and the final transcode
//! - Publication into the persistent output store

pub mod config;
pub mod error;
pub mod job;
pub mod logging;
pub mod source;
pub mod timing;
pub mod workspace;

pub use config::RenderConfig;
pub use error::{RenderError, RenderResult};
pub use job::RenderPipeline;
pub use logging::JobLogger;
pub use source::{SourceError, SourceOrigin, SourceResolver, VideoSource, DEFAULT_CLIP_PREFIX};
pub use timing::{compute_start_offset, start_offset};
pub use workspace::Workspace;
