//! Stock-footage service wire types (Pexels-compatible).

use serde::Deserialize;

/// Response to a video search.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub videos: Vec<StockVideo>,
}

/// One search result, offered in several encodings.
#[derive(Debug, Deserialize)]
pub struct StockVideo {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub video_files: Vec<VideoFile>,
}

/// One downloadable encoding of a stock video.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoFile {
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    pub link: String,
}

impl VideoFile {
    /// Pixel area used to rank encodings.
    pub fn pixel_area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl StockVideo {
    /// The encoding with the largest pixel area, if any.
    pub fn best_file(&self) -> Option<&VideoFile> {
        self.video_files.iter().max_by_key(|f| f.pixel_area())
    }
}
