use crate::shared::Result;
use std::path::{Path, PathBuf};

/// ArtifactWriter port for the directory that receives rendered graphs
pub trait ArtifactWriter: Send + Sync {
    /// Location artifacts are written to
    fn location(&self) -> &Path;

    /// Deletes and recreates the output location
    ///
    /// # Errors
    /// Returns `OutputDirectoryReset` if the directory cannot be removed or created
    fn reset(&self) -> Result<()>;

    /// Writes one artifact, creating the parent directory if absent
    ///
    /// # Returns
    /// The full path of the written artifact
    ///
    /// # Errors
    /// Returns `WriteError` if the file cannot be written
    fn write(&self, file_name: &str, content: &[u8]) -> Result<PathBuf>;
}
