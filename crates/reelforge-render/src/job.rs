//! Render job execution.
//!
//! Runs the whole composition pipeline for one job: workspace setup, source
//! resolution, timing, subtitle styling, filter-graph construction, the
//! final transcode, and publication. The workspace is torn down exactly
//! once on every exit path.

use tracing::debug;

use reelforge_media::{build_filtergraph, stylize_subtitles, FfmpegCommand, FfmpegRunner};
use reelforge_models::CompositionJob;
use reelforge_stock::StockClient;
use reelforge_storage::{OutputStore, RenderResult as PublishedArtifact};

use crate::config::RenderConfig;
use crate::error::{RenderError, RenderResult};
use crate::logging::JobLogger;
use crate::source::SourceResolver;
use crate::timing::compute_start_offset;
use crate::workspace::Workspace;

/// Workspace file names.
const AUDIO_FILE: &str = "audio.wav";
const SRT_FILE: &str = "sub.srt";
const ASS_FILE: &str = "sub.ass";
const OUTPUT_FILE: &str = "output.mp4";

/// The composition pipeline, shared across concurrent jobs.
///
/// Holds only immutable configuration and clients; each job owns its
/// workspace, so concurrent executions never contend on transient files.
pub struct RenderPipeline {
    config: RenderConfig,
    stock: StockClient,
    store: OutputStore,
}

impl RenderPipeline {
    pub fn new(config: RenderConfig, stock: StockClient, store: OutputStore) -> Self {
        Self {
            config,
            stock,
            store,
        }
    }

    /// Execute one job to completion.
    pub async fn run(&self, job: &CompositionJob) -> RenderResult<PublishedArtifact> {
        let logger = JobLogger::new(&job.id, "render");
        logger.log_start(&format!("Composing video from {} source", job.source.mode));

        let workspace = Workspace::create(&self.config.work_dir, &job.id).await?;

        let result = self.run_inner(job, &workspace, &logger).await;

        // Unconditional teardown, success or failure
        workspace.close().await;

        match &result {
            Ok(artifact) => logger.log_completion(&format!("Published {}", artifact.public_path)),
            Err(e) => logger.log_error(&e.to_string()),
        }

        result
    }

    async fn run_inner(
        &self,
        job: &CompositionJob,
        workspace: &Workspace,
        logger: &JobLogger,
    ) -> RenderResult<PublishedArtifact> {
        let audio_path = workspace.file(AUDIO_FILE);
        let srt_path = workspace.file(SRT_FILE);
        tokio::fs::write(&audio_path, &job.audio).await?;
        tokio::fs::write(&srt_path, &job.subtitles).await?;

        // Source must be fully determined before any transcoding begins
        let source = SourceResolver::new(&self.config, &self.stock)
            .resolve(&job.source, workspace)
            .await?;

        let start_offset = if source.wants_random_offset() {
            compute_start_offset(&source.path, &audio_path).await?
        } else {
            0.0
        };
        debug!(
            source = %source.path.display(),
            start_offset,
            "Background clip resolved"
        );

        logger.log_progress("Styling subtitles");
        let ass_path = workspace.file(ASS_FILE);
        stylize_subtitles(
            &srt_path,
            &ass_path,
            &job.style,
            self.config.ffmpeg_timeout_secs,
        )
        .await?;

        let graph = build_filtergraph(&ass_path, &self.config.fonts_dir, job.watermark.as_ref());

        logger.log_progress("Transcoding");
        let output_path = workspace.file(OUTPUT_FILE);
        let transcode = FfmpegCommand::new(&output_path)
            .looped_input_seeked(&source.path, start_offset)
            .input(&audio_path)
            .video_filter(graph)
            .map("0:v:0")
            .map("1:a:0")
            .output_args(self.config.encoding.to_ffmpeg_args())
            .shortest();
        FfmpegRunner::new()
            .with_timeout(self.config.ffmpeg_timeout_secs)
            .run(&transcode)
            .await?;

        Ok(self.store.publish(&output_path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceError;
    use reelforge_models::{SourceRequest, SubtitleStyle};
    use reelforge_stock::{StockClientConfig, StockClient};
    use tempfile::TempDir;

    fn make_pipeline(
        library: &std::path::Path,
        work: &std::path::Path,
        outputs: &std::path::Path,
    ) -> RenderPipeline {
        let config = RenderConfig {
            work_dir: work.to_path_buf(),
            library_dir: library.to_path_buf(),
            ..RenderConfig::default()
        };
        let stock = StockClient::new(StockClientConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            timeout: std::time::Duration::from_secs(1),
        })
        .unwrap();
        RenderPipeline::new(config, stock, OutputStore::new(outputs))
    }

    fn job_with_source(source: SourceRequest) -> CompositionJob {
        CompositionJob::new(b"riff".to_vec(), "1\n00:00:00,000 --> 00:00:01,000\nHi\n")
            .with_style(SubtitleStyle::default())
            .with_source(source)
    }

    #[tokio::test]
    async fn test_failed_resolution_leaves_no_workspace() {
        let library = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let outputs = TempDir::new().unwrap();

        let pipeline = make_pipeline(library.path(), work.path(), outputs.path());
        let job = job_with_source(SourceRequest {
            clip: Some("missing.mp4".to_string()),
            ..SourceRequest::default()
        });

        let err = pipeline.run(&job).await.unwrap_err();
        assert!(matches!(
            err,
            RenderError::Source(SourceError::ClipNotFound(_))
        ));
        assert!(err.is_not_found());

        // No transient files leak
        let mut entries = tokio::fs::read_dir(work.path()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
        // Nothing was published
        let mut published = tokio::fs::read_dir(outputs.path()).await.unwrap();
        assert!(published.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_library_reports_no_clips() {
        let library = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let outputs = TempDir::new().unwrap();

        let pipeline = make_pipeline(library.path(), work.path(), outputs.path());
        let job = job_with_source(SourceRequest::default());

        let err = pipeline.run(&job).await.unwrap_err();
        assert!(matches!(
            err,
            RenderError::Source(SourceError::NoLibraryClips)
        ));

        let mut entries = tokio::fs::read_dir(work.path()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }
}
