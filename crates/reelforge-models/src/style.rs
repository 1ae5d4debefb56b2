//! Subtitle and watermark style parameters.

use serde::{Deserialize, Serialize};

/// Default burned-in subtitle font size.
pub const DEFAULT_FONT_SIZE: u32 = 30;
/// Default subtitle outline width.
pub const DEFAULT_OUTLINE: u32 = 2;
/// Default watermark color.
pub const DEFAULT_WATERMARK_COLOR: &str = "white";
/// Default watermark opacity.
pub const DEFAULT_WATERMARK_OPACITY: f32 = 0.5;

/// Style parameters for the burned-in subtitle track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleStyle {
    /// Font size in the styled track
    pub font_size: u32,
    /// Outline width in the styled track
    pub outline: u32,
}

impl Default for SubtitleStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            outline: DEFAULT_OUTLINE,
        }
    }
}

impl SubtitleStyle {
    pub fn new(font_size: u32, outline: u32) -> Self {
        Self { font_size, outline }
    }
}

/// Text watermark overlaid near the bottom of the frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Watermark {
    /// Overlay text
    pub text: String,
    /// Font color name or hex value
    pub color: String,
    /// Opacity, 0.0 (invisible) to 1.0 (opaque)
    pub opacity: f32,
}

impl Watermark {
    /// Create a watermark with the default color and opacity.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: DEFAULT_WATERMARK_COLOR.to_string(),
            opacity: DEFAULT_WATERMARK_OPACITY,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set opacity, clamped to [0.0, 1.0].
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_defaults() {
        let style = SubtitleStyle::default();
        assert_eq!(style.font_size, 30);
        assert_eq!(style.outline, 2);
    }

    #[test]
    fn test_watermark_defaults() {
        let wm = Watermark::new("SUBSCRIBE");
        assert_eq!(wm.color, "white");
        assert!((wm.opacity - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_opacity_clamping() {
        let wm = Watermark::new("x").with_opacity(1.5);
        assert!((wm.opacity - 1.0).abs() < f32::EPSILON);

        let wm = Watermark::new("x").with_opacity(-0.5);
        assert!(wm.opacity.abs() < f32::EPSILON);
    }
}
