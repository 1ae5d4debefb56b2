//! Start-offset calculation for long library clips.
//!
//! Randomly chosen library clips are typically much longer than the
//! narration. Starting playback somewhere inside the clip keeps renders of
//! the same clip from all looking alike, while a one-second tail margin
//! avoids running into the clip's end.

use rand::Rng;
use std::path::Path;

use reelforge_media::{probe_duration, MediaResult};

/// Compute the start offset from probed durations.
///
/// `delta = max(video - audio - 1, 0)`; the offset is uniform in
/// `[0, delta)` when delta is positive, otherwise zero.
pub fn start_offset<R: Rng>(video_duration: f64, audio_duration: f64, rng: &mut R) -> f64 {
    let delta = (video_duration - audio_duration - 1.0).max(0.0);
    if delta > 0.0 {
        rng.random_range(0.0..delta)
    } else {
        0.0
    }
}

/// Probe both files and draw a start offset for the video.
pub async fn compute_start_offset(video: &Path, audio: &Path) -> MediaResult<f64> {
    let video_duration = probe_duration(video).await?;
    let audio_duration = probe_duration(audio).await?;
    Ok(start_offset(video_duration, audio_duration, &mut rand::rng()))
}
