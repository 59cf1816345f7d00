use crate::dependency_graph::domain::ImageFormat;

/// Default font for node and edge labels
pub const DEFAULT_FONT: &str = "Helvetica";

/// How graphs are rendered: image format and label font
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub format: ImageFormat,
    pub font: String,
    /// Also write the DOT description next to each image
    pub keep_dot: bool,
}

impl RenderConfig {
    pub fn new(format: ImageFormat, font: impl Into<String>) -> Self {
        Self {
            format,
            font: font.into(),
            keep_dot: false,
        }
    }

    pub fn with_keep_dot(mut self, keep_dot: bool) -> Self {
        self.keep_dot = keep_dot;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::new(ImageFormat::default(), DEFAULT_FONT)
    }
}
