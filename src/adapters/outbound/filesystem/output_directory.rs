use crate::ports::outbound::ArtifactWriter;
use crate::shared::error::DepGraphError;
use crate::shared::security::{
    validate_not_enclosing, validate_not_symlink, validate_removable_directory,
};
use crate::shared::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// OutputDirectory adapter: the directory that receives rendered graphs
///
/// This adapter implements the ArtifactWriter port. Each run wipes the
/// directory first so no artifact of an earlier run survives. Protected
/// directories, such as the project being graphed, are never wiped.
#[derive(Debug, Clone)]
pub struct OutputDirectory {
    path: PathBuf,
    protected: Vec<PathBuf>,
}

impl OutputDirectory {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            protected: Vec::new(),
        }
    }

    /// Refuses to reset when the output directory equals or contains `path`
    pub fn protecting(mut self, path: impl Into<PathBuf>) -> Self {
        self.protected.push(path.into());
        self
    }

    fn reset_error(&self, details: impl Into<String>) -> DepGraphError {
        DepGraphError::OutputDirectoryReset {
            path: self.path.clone(),
            details: details.into(),
        }
    }

    /// Artifact names are plain file names; anything else could escape the directory
    fn validate_file_name(&self, file_name: &str) -> Result<PathBuf> {
        let candidate = Path::new(file_name);
        let mut components = candidate.components();
        match (components.next(), components.next()) {
            (Some(std::path::Component::Normal(_)), None) => Ok(self.path.join(candidate)),
            _ => Err(DepGraphError::SecurityError {
                path: self.path.join(candidate),
                reason: format!("'{}' is not a plain file name", file_name),
                hint: "Artifacts can only be written directly inside the output directory"
                    .to_string(),
            }
            .into()),
        }
    }
}

impl ArtifactWriter for OutputDirectory {
    fn location(&self) -> &Path {
        &self.path
    }

    fn reset(&self) -> Result<()> {
        validate_removable_directory(&self.path).map_err(|e| self.reset_error(e.to_string()))?;
        for protected in &self.protected {
            validate_not_enclosing(&self.path, protected)
                .map_err(|e| self.reset_error(e.to_string()))?;
        }

        if self.path.exists() {
            fs::remove_dir_all(&self.path).map_err(|e| self.reset_error(e.to_string()))?;
        }
        fs::create_dir_all(&self.path).map_err(|e| self.reset_error(e.to_string()))?;

        Ok(())
    }

    fn write(&self, file_name: &str, content: &[u8]) -> Result<PathBuf> {
        let output_path = self.validate_file_name(file_name)?;

        let write_error = |details: String| DepGraphError::WriteError {
            path: output_path.clone(),
            details,
        };

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                write_error(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        if output_path.exists() {
            validate_not_symlink(&output_path, "write").map_err(|e| write_error(e.to_string()))?;
        }

        fs::write(&output_path, content).map_err(|e| write_error(e.to_string()))?;

        Ok(output_path)
    }
}
