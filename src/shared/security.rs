use crate::shared::Result;
use std::fs;
use std::path::{Component, Path};

/// Maximum manifest size (10 MB)
pub const MAX_MANIFEST_SIZE: u64 = 10 * 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
///
/// # Errors
/// Returns an error if the path is a symbolic link or if metadata cannot be read
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Validates that a path exists and is a regular file (not a directory or symlink)
///
/// # Errors
/// Returns an error if:
/// - The path doesn't exist
/// - The path is a symbolic link
/// - The path is not a regular file
/// - The file is larger than `max_size`
pub fn validate_regular_file(path: &Path, file_description: &str, max_size: u64) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
            path.display()
        );
    }

    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    validate_file_size(metadata.len(), path, max_size)
}

/// Validates file size is within acceptable limits
pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Validates that a directory may be deleted recursively
///
/// The output directory is wiped at the start of every run, so this rejects
/// paths where a typo would be destructive: empty paths, the filesystem root,
/// the current directory or any of its ancestors, and symbolic links.
///
/// # Errors
/// Returns an error describing why the directory must not be removed
pub fn validate_removable_directory(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        anyhow::bail!("Output directory path is empty");
    }

    if path.components().all(|c| {
        matches!(
            c,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    }) {
        anyhow::bail!(
            "Refusing to remove {}: it is the current directory, a parent of it, or the filesystem root",
            path.display()
        );
    }

    if !path.exists() {
        return Ok(());
    }

    validate_not_symlink(path, "remove")?;

    let metadata = fs::metadata(path)?;
    if !metadata.is_dir() {
        anyhow::bail!("{} exists and is not a directory", path.display());
    }

    if let (Ok(canonical), Ok(cwd)) = (path.canonicalize(), std::env::current_dir()) {
        if let Ok(cwd) = cwd.canonicalize() {
            if cwd.starts_with(&canonical) {
                anyhow::bail!(
                    "Refusing to remove {}: it contains the current working directory",
                    path.display()
                );
            }
        }
    }

    Ok(())
}

/// Validates that removing `path` would leave `protected` untouched
///
/// Refuses when `path` is `protected` itself or one of its ancestors. A path
/// that does not exist yet cannot contain an existing directory.
///
/// # Errors
/// Returns an error if `path` equals or contains `protected`
pub fn validate_not_enclosing(path: &Path, protected: &Path) -> Result<()> {
    let (Ok(path_canonical), Ok(protected_canonical)) =
        (path.canonicalize(), protected.canonicalize())
    else {
        return Ok(());
    };

    if protected_canonical.starts_with(&path_canonical) {
        anyhow::bail!(
            "Refusing to remove {}: it contains the project directory {}",
            path.display(),
            protected.display()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_validate_not_symlink_regular_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("Cargo.toml");
        fs::write(&file_path, "[package]").unwrap();

        let result = validate_not_symlink(&file_path, "read");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_not_symlink_nonexistent() {
        let path = PathBuf::from("/nonexistent/Cargo.toml");
        let result = validate_not_symlink(&path, "read");
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_not_symlink_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real");
        fs::create_dir(&target).unwrap();
        let link = temp_dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let result = validate_not_symlink(&link, "remove");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("symbolic link"));
    }

    #[test]
    fn test_validate_regular_file_success() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("Cargo.toml");
        fs::write(&file_path, "[package]").unwrap();

        let result = validate_regular_file(&file_path, "Cargo.toml", MAX_MANIFEST_SIZE);
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_regular_file_is_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = validate_regular_file(temp_dir.path(), "Cargo.toml", MAX_MANIFEST_SIZE);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a regular file"));
    }

    #[test]
    fn test_validate_regular_file_too_large() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("Cargo.toml");
        fs::write(&file_path, "0123456789").unwrap();

        let result = validate_regular_file(&file_path, "Cargo.toml", 4);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too large"));
    }

    #[test]
    fn test_validate_file_size_exceeds_limit() {
        let path = PathBuf::from("/test/Cargo.toml");
        let result = validate_file_size(MAX_MANIFEST_SIZE + 1, &path, MAX_MANIFEST_SIZE);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_removable_directory_rejects_current_dir() {
        assert!(validate_removable_directory(Path::new(".")).is_err());
        assert!(validate_removable_directory(Path::new("..")).is_err());
        assert!(validate_removable_directory(Path::new("/")).is_err());
        assert!(validate_removable_directory(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_removable_directory_missing_is_ok() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("graphs");
        assert!(validate_removable_directory(&missing).is_ok());
    }

    #[test]
    fn test_validate_removable_directory_existing_dir() {
        let temp_dir = TempDir::new().unwrap();
        let out = temp_dir.path().join("graphs");
        fs::create_dir(&out).unwrap();
        assert!(validate_removable_directory(&out).is_ok());
    }

    #[test]
    fn test_validate_removable_directory_rejects_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("graphs");
        fs::write(&file, "not a dir").unwrap();

        let result = validate_removable_directory(&file);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not a directory"));
    }

    #[test]
    fn test_validate_not_enclosing_rejects_project_and_ancestors() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("proj");
        fs::create_dir(&project).unwrap();

        let same = validate_not_enclosing(&project, &project);
        assert!(same.unwrap_err().to_string().contains("project directory"));
        assert!(validate_not_enclosing(temp_dir.path(), &project).is_err());
        assert!(validate_not_enclosing(&project.join(".."), &project).is_err());
    }

    #[test]
    fn test_validate_not_enclosing_allows_nested_and_missing_output() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("proj");
        let nested = project.join("target").join("dependency-graphs");
        fs::create_dir_all(&nested).unwrap();
        let sibling = temp_dir.path().join("graphs");
        fs::create_dir(&sibling).unwrap();

        assert!(validate_not_enclosing(&nested, &project).is_ok());
        assert!(validate_not_enclosing(&sibling, &project).is_ok());
        assert!(validate_not_enclosing(&temp_dir.path().join("missing"), &project).is_ok());
    }
}
