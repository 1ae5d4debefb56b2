//! Render job definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::style::{SubtitleStyle, Watermark};

/// Unique identifier for a render job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Generate a new random job ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where the background clip comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// Pick from the local clip library
    #[default]
    Local,
    /// Search and download from the stock-footage service
    Stock,
}

impl SourceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceMode::Local => "local",
            SourceMode::Stock => "stock",
        }
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the job wants its background clip resolved.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceRequest {
    /// Requested source mode
    pub mode: SourceMode,
    /// Explicit clip file name in the local library
    pub clip: Option<String>,
    /// Stock-footage search query
    pub query: Option<String>,
    /// Stock-footage API key
    pub api_key: Option<String>,
}

impl SourceRequest {
    /// Whether the stock path should be attempted at all.
    ///
    /// Stock resolution requires the mode AND both a query and a credential;
    /// anything less falls straight through to the local library.
    pub fn wants_stock(&self) -> bool {
        self.mode == SourceMode::Stock
            && self.query.as_deref().is_some_and(|q| !q.is_empty())
            && self.api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}

/// One request to produce a single composed video.
///
/// Immutable after construction; owned by exactly one pipeline execution.
#[derive(Debug, Clone)]
pub struct CompositionJob {
    /// Unique job ID (also names the workspace)
    pub id: JobId,
    /// Narration audio bytes (already base64-decoded)
    pub audio: Vec<u8>,
    /// Raw timed-subtitle text (SRT)
    pub subtitles: String,
    /// Burn-in style parameters
    pub style: SubtitleStyle,
    /// Optional text watermark overlay
    pub watermark: Option<Watermark>,
    /// Background clip selection
    pub source: SourceRequest,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl CompositionJob {
    /// Create a job with a fresh ID.
    pub fn new(audio: Vec<u8>, subtitles: impl Into<String>) -> Self {
        Self {
            id: JobId::new(),
            audio,
            subtitles: subtitles.into(),
            style: SubtitleStyle::default(),
            watermark: None,
            source: SourceRequest::default(),
            created_at: Utc::now(),
        }
    }

    pub fn with_style(mut self, style: SubtitleStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_watermark(mut self, watermark: Option<Watermark>) -> Self {
        self.watermark = watermark;
        self
    }

    pub fn with_source(mut self, source: SourceRequest) -> Self {
        self.source = source;
        self
    }
}
