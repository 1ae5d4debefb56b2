//! Shared data models for the reelforge backend.
//!
//! This crate provides Serde-serializable types for:
//! - Render jobs and their identifiers
//! - Subtitle style and watermark parameters
//! - Background video source selection
//! - Encoding configuration

pub mod encoding;
pub mod job;
pub mod style;

// Re-export common types
pub use encoding::EncodingConfig;
pub use job::{CompositionJob, JobId, SourceMode, SourceRequest};
pub use style::{SubtitleStyle, Watermark};
