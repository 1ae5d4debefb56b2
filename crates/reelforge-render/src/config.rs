//! Render pipeline configuration.
//!
//! Built once at process start and passed into every job; never mutated at
//! runtime.

use std::path::PathBuf;

use reelforge_models::EncodingConfig;

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Root directory under which per-job workspaces are created
    pub work_dir: PathBuf,
    /// Local clip library directory
    pub library_dir: PathBuf,
    /// Fonts directory handed to the subtitle burn-in filter
    pub fonts_dir: PathBuf,
    /// Timeout for each FFmpeg invocation, in seconds
    pub ffmpeg_timeout_secs: u64,
    /// Output encoding settings
    pub encoding: EncodingConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from("/tmp/reelforge"),
            library_dir: PathBuf::from("/mnt/videos"),
            fonts_dir: PathBuf::from("/app/fonts"),
            ffmpeg_timeout_secs: 600,
            encoding: EncodingConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("RENDER_WORK_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/tmp/reelforge")),
            library_dir: std::env::var("VIDEO_LIBRARY_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/mnt/videos")),
            fonts_dir: std::env::var("FONTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/app/fonts")),
            ffmpeg_timeout_secs: std::env::var("FFMPEG_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(600),
            encoding: EncodingConfig::default(),
        }
    }
}
