use crate::dependency_graph::domain::ImageFormat;
use crate::shared::Result;
use async_trait::async_trait;

/// LayoutEngine port for rendering a graph description to an image
///
/// Implementations must be `Send + Sync` so both render passes can run
/// concurrently against one engine.
#[async_trait]
pub trait LayoutEngine: Send + Sync {
    /// Lays out and renders a DOT description
    ///
    /// # Arguments
    /// * `description` - Graph in DOT syntax
    /// * `format` - Image format to produce
    ///
    /// # Returns
    /// The rendered image bytes
    ///
    /// # Errors
    /// Returns an error if:
    /// - The layout tool is not installed (`LayoutEngineUnavailable`)
    /// - The tool exits with a failure status (`LayoutEngineError`)
    async fn render(&self, description: &str, format: ImageFormat) -> Result<Vec<u8>>;
}
