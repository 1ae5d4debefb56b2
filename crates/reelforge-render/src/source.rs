//! Background clip resolution.
//!
//! Resolution order: remote stock footage when the job asks for it and
//! carries both a query and a credential, then the local library. Stock
//! failures of any kind are absorbed and logged; the local path is the
//! fallback. An explicitly named clip is honored or fails fast, never
//! substituted.

use rand::Rng;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;
use tracing::{info, warn};

use reelforge_models::SourceRequest;
use reelforge_stock::{StockClient, StockError};

use crate::config::RenderConfig;
use crate::workspace::Workspace;

/// File-name prefix marking library clips eligible for random selection.
pub const DEFAULT_CLIP_PREFIX: &str = "default_";

/// File name of a downloaded stock clip inside the workspace.
const STOCK_CLIP_NAME: &str = "stock_video.mp4";

/// Errors that end source resolution.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Video clip not found: {0}")]
    ClipNotFound(String),

    #[error("No library clips available for random selection")]
    NoLibraryClips,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where a resolved clip came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceOrigin {
    /// Randomly chosen from the local library
    LibraryRandom,
    /// Explicitly named library clip
    LibraryNamed,
    /// Downloaded from the stock-footage service
    Stock,
}

/// A fully resolved background clip.
#[derive(Debug, Clone)]
pub struct VideoSource {
    pub path: PathBuf,
    pub origin: SourceOrigin,
}

impl VideoSource {
    /// Randomly chosen library clips are long-form and get a random start
    /// offset; stock and explicitly named clips are assumed pre-trimmed.
    pub fn wants_random_offset(&self) -> bool {
        self.origin == SourceOrigin::LibraryRandom
    }
}

/// Resolves a job's background clip.
pub struct SourceResolver<'a> {
    config: &'a RenderConfig,
    stock: &'a StockClient,
}

impl<'a> SourceResolver<'a> {
    pub fn new(config: &'a RenderConfig, stock: &'a StockClient) -> Self {
        Self { config, stock }
    }

    /// Produce a `VideoSource` for the request, or fail.
    pub async fn resolve(
        &self,
        request: &SourceRequest,
        workspace: &Workspace,
    ) -> Result<VideoSource, SourceError> {
        if request.wants_stock() {
            let query = request.query.as_deref().unwrap_or_default();
            let api_key = request.api_key.as_deref().unwrap_or_default();
            match self.try_stock(query, api_key, workspace).await {
                Ok(Some(path)) => {
                    info!(path = %path.display(), "Using stock footage clip");
                    return Ok(VideoSource {
                        path,
                        origin: SourceOrigin::Stock,
                    });
                }
                Ok(None) => {
                    info!(query, "No stock footage found, falling back to library");
                }
                Err(e) => {
                    warn!(query, "Stock footage resolution failed, falling back to library: {}", e);
                }
            }
        }

        match &request.clip {
            Some(name) => self.resolve_named(name),
            None => self.resolve_random().await,
        }
    }

    /// Search for one portrait clip and download its largest encoding into
    /// the workspace. `None` means the service had nothing usable.
    async fn try_stock(
        &self,
        query: &str,
        api_key: &str,
        workspace: &Workspace,
    ) -> Result<Option<PathBuf>, StockError> {
        let Some(video) = self.stock.search_portrait(query, api_key).await? else {
            return Ok(None);
        };

        let Some(best) = video.best_file() else {
            warn!(video_id = video.id, "Stock result has no encodings");
            return Ok(None);
        };

        info!(
            link = %best.link,
            width = best.width,
            height = best.height,
            "Downloading stock clip"
        );

        let dest = workspace.file(STOCK_CLIP_NAME);
        self.stock.download(&best.link, &dest).await?;
        Ok(Some(dest))
    }

    /// Resolve an explicitly named library clip; absence is fatal.
    fn resolve_named(&self, name: &str) -> Result<VideoSource, SourceError> {
        let path = self.config.library_dir.join(name);
        if !path.is_file() {
            return Err(SourceError::ClipNotFound(name.to_string()));
        }
        Ok(VideoSource {
            path,
            origin: SourceOrigin::LibraryNamed,
        })
    }

    /// Pick uniformly at random among the library's `default_` clips.
    async fn resolve_random(&self) -> Result<VideoSource, SourceError> {
        let clips = list_default_clips(&self.config.library_dir).await?;
        if clips.is_empty() {
            return Err(SourceError::NoLibraryClips);
        }

        let idx = rand::rng().random_range(0..clips.len());
        let path = clips[idx].clone();
        info!(path = %path.display(), "Randomly selected library clip");

        Ok(VideoSource {
            path,
            origin: SourceOrigin::LibraryRandom,
        })
    }
}

/// List regular files in the library carrying the reserved prefix.
async fn list_default_clips(library_dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut clips = Vec::new();
    let mut entries = fs::read_dir(library_dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        let is_default = name
            .to_str()
            .is_some_and(|n| n.starts_with(DEFAULT_CLIP_PREFIX));
        if is_default && entry.file_type().await?.is_file() {
            clips.push(entry.path());
        }
    }
    Ok(clips)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelforge_models::{JobId, SourceMode};
    use reelforge_stock::StockClientConfig;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path as url_path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_with_library(library: &Path, work: &Path) -> RenderConfig {
        RenderConfig {
            library_dir: library.to_path_buf(),
            work_dir: work.to_path_buf(),
            ..RenderConfig::default()
        }
    }

    fn stock_client(base_url: String) -> StockClient {
        StockClient::new(StockClientConfig {
            base_url,
            timeout: std::time::Duration::from_secs(5),
        })
        .unwrap()
    }

    async fn workspace_in(root: &Path) -> Workspace {
        Workspace::create(root, &JobId::new()).await.unwrap()
    }

    #[tokio::test]
    async fn test_no_default_clips_in_library() {
        let library = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        std::fs::write(library.path().join("intro.mp4"), b"v").unwrap();

        let config = config_with_library(library.path(), work.path());
        let stock = stock_client("http://127.0.0.1:1".to_string());
        let ws = workspace_in(work.path()).await;

        let err = SourceResolver::new(&config, &stock)
            .resolve(&SourceRequest::default(), &ws)
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::NoLibraryClips));

        ws.close().await;
    }

    #[tokio::test]
    async fn test_explicit_clip_missing_fails_fast() {
        let library = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        // A default clip exists, but an explicit request must not fall back
        std::fs::write(library.path().join("default_a.mp4"), b"v").unwrap();

        let config = config_with_library(library.path(), work.path());
        let stock = stock_client("http://127.0.0.1:1".to_string());
        let ws = workspace_in(work.path()).await;

        let request = SourceRequest {
            clip: Some("missing.mp4".to_string()),
            ..SourceRequest::default()
        };
        let err = SourceResolver::new(&config, &stock)
            .resolve(&request, &ws)
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::ClipNotFound(name) if name == "missing.mp4"));

        ws.close().await;
    }

    #[tokio::test]
    async fn test_explicit_clip_resolves() {
        let library = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        std::fs::write(library.path().join("branded.mp4"), b"v").unwrap();

        let config = config_with_library(library.path(), work.path());
        let stock = stock_client("http://127.0.0.1:1".to_string());
        let ws = workspace_in(work.path()).await;

        let request = SourceRequest {
            clip: Some("branded.mp4".to_string()),
            ..SourceRequest::default()
        };
        let source = SourceResolver::new(&config, &stock)
            .resolve(&request, &ws)
            .await
            .unwrap();
        assert_eq!(source.origin, SourceOrigin::LibraryNamed);
        assert!(!source.wants_random_offset());

        ws.close().await;
    }

    #[tokio::test]
    async fn test_random_pick_uses_default_prefix_only() {
        let library = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        std::fs::write(library.path().join("default_a.mp4"), b"v").unwrap();
        std::fs::write(library.path().join("default_b.mp4"), b"v").unwrap();
        std::fs::write(library.path().join("other.mp4"), b"v").unwrap();

        let config = config_with_library(library.path(), work.path());
        let stock = stock_client("http://127.0.0.1:1".to_string());
        let ws = workspace_in(work.path()).await;

        let source = SourceResolver::new(&config, &stock)
            .resolve(&SourceRequest::default(), &ws)
            .await
            .unwrap();
        let name = source.path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(DEFAULT_CLIP_PREFIX));
        assert_eq!(source.origin, SourceOrigin::LibraryRandom);
        assert!(source.wants_random_offset());

        ws.close().await;
    }

    #[tokio::test]
    async fn test_stock_zero_results_falls_back_to_library() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(url_path("/videos/search"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(r#"{"videos":[]}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let library = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        std::fs::write(library.path().join("default_a.mp4"), b"v").unwrap();

        let config = config_with_library(library.path(), work.path());
        let stock = stock_client(server.uri());
        let ws = workspace_in(work.path()).await;

        let request = SourceRequest {
            mode: SourceMode::Stock,
            clip: None,
            query: Some("ocean".to_string()),
            api_key: Some("key".to_string()),
        };
        let source = SourceResolver::new(&config, &stock)
            .resolve(&request, &ws)
            .await
            .unwrap();
        assert_eq!(source.origin, SourceOrigin::LibraryRandom);

        ws.close().await;
    }

    #[tokio::test]
    async fn test_stock_downloads_best_encoding_into_workspace() {
        let server = MockServer::start().await;
        let search_body = format!(
            r#"{{"videos":[{{"id":9,"video_files":[
                {{"width":540,"height":960,"link":"{0}/clips/low.mp4"}},
                {{"width":1080,"height":1920,"link":"{0}/clips/high.mp4"}}
            ]}}]}}"#,
            server.uri()
        );
        Mock::given(method("GET"))
            .and(url_path("/videos/search"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(search_body, "application/json"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(url_path("/clips/high.mp4"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"hd bytes".to_vec()))
            .mount(&server)
            .await;

        let library = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let config = config_with_library(library.path(), work.path());
        let stock = stock_client(server.uri());
        let ws = workspace_in(work.path()).await;

        let request = SourceRequest {
            mode: SourceMode::Stock,
            clip: None,
            query: Some("ocean".to_string()),
            api_key: Some("key".to_string()),
        };
        let source = SourceResolver::new(&config, &stock)
            .resolve(&request, &ws)
            .await
            .unwrap();

        assert_eq!(source.origin, SourceOrigin::Stock);
        assert!(!source.wants_random_offset());
        assert_eq!(source.path, ws.file("stock_video.mp4"));
        assert_eq!(std::fs::read(&source.path).unwrap(), b"hd bytes");

        ws.close().await;
    }

    #[tokio::test]
    async fn test_stock_network_error_falls_back() {
        // Nothing listening on this port
        let library = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        std::fs::write(library.path().join("default_a.mp4"), b"v").unwrap();

        let config = config_with_library(library.path(), work.path());
        let stock = stock_client("http://127.0.0.1:1".to_string());
        let ws = workspace_in(work.path()).await;

        let request = SourceRequest {
            mode: SourceMode::Stock,
            clip: None,
            query: Some("ocean".to_string()),
            api_key: Some("key".to_string()),
        };
        let source = SourceResolver::new(&config, &stock)
            .resolve(&request, &ws)
            .await
            .unwrap();
        assert_eq!(source.origin, SourceOrigin::LibraryRandom);

        ws.close().await;
    }
}
