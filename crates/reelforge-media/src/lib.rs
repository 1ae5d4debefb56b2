//! FFmpeg CLI wrapper for video composition.
//!
//! This crate provides:
//! - Type-safe FFmpeg command building with per-input arguments
//! - A runner with bounded timeouts and stderr capture
//! - Duration probing via FFprobe
//! - Subtitle conversion and restyling (SRT to styled ASS)
//! - Filter-graph construction for burn-in and watermark overlay

pub mod command;
pub mod error;
pub mod filtergraph;
pub mod probe;
pub mod subtitle;

pub use command::{check_ffmpeg, check_ffprobe, FfmpegCommand, FfmpegRunner};
pub use error::{MediaError, MediaResult};
pub use filtergraph::build_filtergraph;
pub use probe::probe_duration;
pub use subtitle::stylize_subtitles;
