//! Render request handler.

use axum::extract::State;
use axum::Json;
use base64::Engine;
use serde::{Deserialize, Serialize};

use reelforge_models::style::{
    DEFAULT_FONT_SIZE, DEFAULT_OUTLINE, DEFAULT_WATERMARK_COLOR, DEFAULT_WATERMARK_OPACITY,
};
use reelforge_models::{CompositionJob, SourceMode, SourceRequest, SubtitleStyle, Watermark};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Render job submission.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    /// Narration audio, base64-encoded
    #[serde(default)]
    pub audio: Option<String>,
    /// Plain timed-subtitle text (SRT)
    #[serde(default)]
    pub subtitles: Option<String>,
    /// Subtitle font size
    #[serde(default = "default_fontsize")]
    pub fontsize: u32,
    /// Subtitle outline width
    #[serde(default = "default_outline")]
    pub outline: u32,
    /// Watermark text overlay
    #[serde(default)]
    pub watermark: Option<String>,
    #[serde(default = "default_watermark_color")]
    pub watermark_color: String,
    #[serde(default = "default_watermark_opacity")]
    pub watermark_opacity: f32,
    /// Background clip source ("local" or "stock")
    #[serde(default)]
    pub video_source: SourceMode,
    /// Explicit clip name in the local library
    #[serde(default)]
    pub video: Option<String>,
    /// Stock-footage API key
    #[serde(default)]
    pub pexels_api_key: Option<String>,
    /// Stock-footage search query
    #[serde(default)]
    pub video_query: Option<String>,
}

fn default_fontsize() -> u32 {
    DEFAULT_FONT_SIZE
}

fn default_outline() -> u32 {
    DEFAULT_OUTLINE
}

fn default_watermark_color() -> String {
    DEFAULT_WATERMARK_COLOR.to_string()
}

fn default_watermark_opacity() -> f32 {
    DEFAULT_WATERMARK_OPACITY
}

impl RenderRequest {
    /// Validate the request and build the immutable job.
    ///
    /// Runs before any workspace is created or external call is made.
    fn into_job(self) -> ApiResult<CompositionJob> {
        let RenderRequest {
            audio,
            subtitles,
            fontsize,
            outline,
            watermark,
            watermark_color,
            watermark_opacity,
            video_source,
            video,
            pexels_api_key,
            video_query,
        } = self;

        let audio_b64 = audio
            .filter(|a| !a.is_empty())
            .ok_or_else(|| ApiError::bad_request("Missing narration audio"))?;
        let subtitles = subtitles
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::bad_request("Missing subtitle text"))?;

        let audio_bytes = base64::engine::general_purpose::STANDARD
            .decode(audio_b64)
            .map_err(|_| ApiError::bad_request("Narration audio is not valid base64"))?;

        let watermark = watermark.filter(|w| !w.is_empty()).map(|text| {
            Watermark::new(text)
                .with_color(watermark_color)
                .with_opacity(watermark_opacity)
        });

        Ok(CompositionJob::new(audio_bytes, subtitles)
            .with_style(SubtitleStyle::new(fontsize, outline))
            .with_watermark(watermark)
            .with_source(SourceRequest {
                mode: video_source,
                clip: video,
                query: video_query,
                api_key: pexels_api_key,
            }))
    }
}

/// Render response: the public reference of the published artifact.
#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub url: String,
}

/// Compose one video from the submitted narration, subtitles, and style
/// parameters.
pub async fn render_video(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> ApiResult<Json<RenderResponse>> {
    let job = request.into_job()?;

    match state.pipeline.run(&job).await {
        Ok(artifact) => Ok(Json(RenderResponse {
            url: artifact.public_path,
        })),
        Err(e) if e.is_not_found() => Err(ApiError::not_found(e.to_string())),
        // Detail already logged by the pipeline; the caller gets a generic body
        Err(_) => Err(ApiError::internal("Video composition failed")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;

    fn minimal_request(audio: Option<&str>, subtitles: Option<&str>) -> RenderRequest {
        serde_json::from_value(serde_json::json!({
            "audio": audio,
            "subtitles": subtitles,
        }))
        .unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let request: RenderRequest = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(request.fontsize, 30);
        assert_eq!(request.outline, 2);
        assert_eq!(request.watermark_color, "white");
        assert!((request.watermark_opacity - 0.5).abs() < f32::EPSILON);
        assert_eq!(request.video_source, SourceMode::Local);
    }

    #[test]
    fn test_missing_audio_rejected() {
        let err = minimal_request(None, Some("1\n")).into_job().unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_missing_subtitles_rejected() {
        let err = minimal_request(Some("YQ=="), None).into_job().unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let err = minimal_request(Some("not!!base64"), Some("1\n"))
            .into_job()
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_job_carries_decoded_audio_and_watermark() {
        let audio = base64::engine::general_purpose::STANDARD.encode(b"riff-bytes");
        let request: RenderRequest = serde_json::from_value(serde_json::json!({
            "audio": audio,
            "subtitles": "1\n00:00:00,000 --> 00:00:01,000\nHi\n",
            "fontsize": 42,
            "watermark": "SUBSCRIBE",
            "watermarkColor": "red",
            "watermarkOpacity": 0.8,
            "videoSource": "stock",
            "videoQuery": "ocean",
            "pexelsApiKey": "key",
        }))
        .unwrap();

        let job = request.into_job().unwrap();
        assert_eq!(job.audio, b"riff-bytes");
        assert_eq!(job.style.font_size, 42);

        let wm = job.watermark.expect("watermark present");
        assert_eq!(wm.text, "SUBSCRIBE");
        assert_eq!(wm.color, "red");
        assert!((wm.opacity - 0.8).abs() < f32::EPSILON);

        assert!(job.source.wants_stock());
    }

    #[test]
    fn test_empty_watermark_means_none() {
        let request: RenderRequest = serde_json::from_value(serde_json::json!({
            "audio": "YQ==",
            "subtitles": "1\n",
            "watermark": "",
        }))
        .unwrap();
        let job = request.into_job().unwrap();
        assert!(job.watermark.is_none());
    }
}
