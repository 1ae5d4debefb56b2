//! Filter-graph construction for the final transcode.
//!
//! The graph always burns the styled subtitle track into the video stream;
//! a text watermark overlay is appended when the job supplies one. All
//! caller-controlled values enter as escaped filter data, never as shell
//! text.

use std::path::Path;

use reelforge_models::Watermark;

/// Watermark overlay font size.
const WATERMARK_FONT_SIZE: u32 = 24;
/// Watermark distance from the bottom edge.
const WATERMARK_BOTTOM_MARGIN: u32 = 50;

/// Build the video filter graph for one job.
///
/// Pure function of the styled subtitle path, the fonts directory, and the
/// optional watermark.
pub fn build_filtergraph(ass: &Path, fonts_dir: &Path, watermark: Option<&Watermark>) -> String {
    let mut graph = format!(
        "subtitles={}:fontsdir={}",
        escape_filter_path(&ass.to_string_lossy()),
        escape_filter_path(&fonts_dir.to_string_lossy()),
    );

    if let Some(wm) = watermark {
        graph.push_str(&format!(
            ",drawtext=text='{}':x=(w-text_w)/2:y=h-th-{}:fontsize={}:fontcolor={}@{}:borderw=1:bordercolor=black",
            escape_drawtext(&wm.text),
            WATERMARK_BOTTOM_MARGIN,
            WATERMARK_FONT_SIZE,
            wm.color,
            wm.opacity,
        ));
    }

    graph
}

/// Escape a path for use inside a filter option value.
fn escape_filter_path(path: &str) -> String {
    path.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace(':', "\\:")
}

/// Escape text for a drawtext `text=` option.
///
/// `%` starts an expansion sequence in drawtext, so it is escaped along
/// with the filter metacharacters.
fn escape_drawtext(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace(':', "\\:")
        .replace('%', "\\%")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn ass() -> PathBuf {
        PathBuf::from("/tmp/job/sub.ass")
    }

    fn fonts() -> PathBuf {
        PathBuf::from("/app/fonts")
    }

    #[test]
    fn test_subtitles_only() {
        let graph = build_filtergraph(&ass(), &fonts(), None);
        assert_eq!(graph, "subtitles=/tmp/job/sub.ass:fontsdir=/app/fonts");
        assert!(!graph.contains("drawtext"));
    }

    #[test]
    fn test_watermark_appends_drawtext() {
        let wm = Watermark::new("SUBSCRIBE").with_color("red").with_opacity(0.8);
        let graph = build_filtergraph(&ass(), &fonts(), Some(&wm));

        let stages: Vec<&str> = graph.splitn(2, ',').collect();
        assert_eq!(stages.len(), 2);
        assert!(stages[0].starts_with("subtitles="));
        assert!(stages[1].starts_with("drawtext=text='SUBSCRIBE'"));
        assert!(graph.contains("fontcolor=red@0.8"));
        assert!(graph.contains("x=(w-text_w)/2"));
        assert!(graph.contains("y=h-th-50"));
        assert!(graph.contains("fontsize=24"));
        assert!(graph.contains("borderw=1:bordercolor=black"));
    }

    #[test]
    fn test_default_watermark_color_token() {
        let wm = Watermark::new("brand");
        let graph = build_filtergraph(&ass(), &fonts(), Some(&wm));
        assert!(graph.contains("fontcolor=white@0.5"));
    }

    #[test]
    fn test_drawtext_escaping() {
        let wm = Watermark::new("it's 100%: fun");
        let graph = build_filtergraph(&ass(), &fonts(), Some(&wm));
        assert!(graph.contains("text='it\\'s 100\\%\\: fun'"));
    }

    #[test]
    fn test_filter_path_escaping() {
        assert_eq!(escape_filter_path("C:\\clips"), "C\\:\\\\clips");
    }
}
