//! Subtitle conversion and restyling.
//!
//! Turns a plain timed-subtitle track (SRT) into a styled ASS track ready
//! for burn-in: FFmpeg performs the format conversion, then the single
//! default style line is rewritten with the requested font size and outline
//! and line wrapping is pinned to manual breaks only.

use std::path::Path;
use tokio::fs;
use tracing::debug;

use reelforge_models::SubtitleStyle;

use crate::command::{FfmpegCommand, FfmpegRunner};
use crate::error::MediaResult;

/// Display font used for burned-in subtitles.
const SUBTITLE_FONT: &str = "Montserrat ExtraBold";

/// Convert `srt` to a styled ASS track at `ass`.
///
/// Conversion failure is fatal: without a styled track there is nothing to
/// burn in.
pub async fn stylize_subtitles(
    srt: &Path,
    ass: &Path,
    style: &SubtitleStyle,
    timeout_secs: u64,
) -> MediaResult<()> {
    let convert = FfmpegCommand::new(ass).input(srt);
    FfmpegRunner::new()
        .with_timeout(timeout_secs)
        .run(&convert)
        .await?;

    let content = fs::read_to_string(ass).await?;
    let restyled = restyle(&content, style);
    fs::write(ass, restyled).await?;

    debug!(
        ass = %ass.display(),
        font_size = style.font_size,
        outline = style.outline,
        "Styled subtitle track written"
    );
    Ok(())
}

/// The rewritten default style line.
///
/// White primary text, fully opaque outline and background colors, bold,
/// bottom-center alignment with fixed margins.
fn default_style_line(style: &SubtitleStyle) -> String {
    format!(
        "Style: Default,{},{},&H00FFFFFF,&H00000000,&H00000000,&H64000000,-1,0,0,0,100,100,0,0,1,2,{},2,10,10,10,1",
        SUBTITLE_FONT, style.font_size, style.outline
    )
}

/// Rewrite style lines and normalize wrapping in an ASS document.
///
/// Every `Style:` line is replaced by the default style carrying the job's
/// font size and outline. `WrapStyle` is forced to `0` (no smart wrapping),
/// inserted after `[Script Info]` when the directive is absent.
fn restyle(content: &str, style: &SubtitleStyle) -> String {
    let style_line = default_style_line(style);
    let has_wrap_style = content
        .lines()
        .any(|line| line.trim_start().starts_with("WrapStyle"));

    let mut out: Vec<String> = Vec::new();
    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("Style:") {
            out.push(style_line.clone());
        } else if trimmed.starts_with("WrapStyle") {
            out.push("WrapStyle: 0".to_string());
        } else {
            out.push(line.to_string());
            if !has_wrap_style && trimmed == "[Script Info]" {
                out.push("WrapStyle: 0".to_string());
            }
        }
    }

    let mut result = out.join("\n");
    if content.ends_with('\n') {
        result.push('\n');
    }
    result
}
