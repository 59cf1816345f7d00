use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Each failure class gets its own code so scripts can tell a broken
/// manifest apart from a missing tool or a failed render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Both graphs were rendered
    Success = 0,
    /// Unexpected failure that does not belong to a more specific class
    GeneralError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Output directory could not be reset, or configuration is invalid
    SetupError = 3,
    /// Manifest missing, malformed, or the project path is invalid
    ManifestError = 4,
    /// The dependency resolver is missing or failed
    ResolverError = 5,
    /// At least one render pass failed
    RenderError = 6,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::GeneralError => write!(f, "General Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::SetupError => write!(f, "Setup Error (3)"),
            ExitCode::ManifestError => write!(f, "Manifest Error (4)"),
            ExitCode::ResolverError => write!(f, "Resolver Error (5)"),
            ExitCode::RenderError => write!(f, "Render Error (6)"),
        }
    }
}

/// Application-specific errors for dependency graph generation.
#[derive(Debug, Error)]
pub enum DepGraphError {
    #[error("Invalid project path: {path}\nReason: {reason}\n\n💡 Hint: Please specify a valid project directory with --path")]
    InvalidProjectPath { path: PathBuf, reason: String },

    #[error("Cargo.toml not found: {path}\n\n💡 Hint: {suggestion}")]
    ManifestNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse manifest: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the manifest is valid TOML with a [package] or [workspace] table")]
    ManifestParseError { path: PathBuf, details: String },

    #[error("Dependency resolver '{tool}' is not available\n\n💡 Hint: Install the Rust toolchain and make sure '{tool}' is on your PATH")]
    ResolverUnavailable { tool: String },

    #[error("Dependency resolver '{tool}' failed (exit code {exit_code})\nDetails: {stderr}\n\n💡 Hint: Run 'cargo metadata' in the project directory to see the full error")]
    ResolverFailed {
        tool: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("Duplicate package in dependency graph: {name}")]
    DuplicatePackage { name: String },

    #[error("Dependency edge {from} -> {to} references an unknown package")]
    DanglingEdge { from: String, to: String },

    #[error("Package {name} depends on itself")]
    SelfDependency { name: String },

    #[error("Failed to reset output directory: {path}\nDetails: {details}\n\n💡 Hint: Please verify that you have write permissions for the output directory")]
    OutputDirectoryReset { path: PathBuf, details: String },

    #[error("Layout engine '{tool}' is not available\n\n💡 Hint: Install Graphviz (https://graphviz.org/download/) and make sure '{tool}' is on your PATH")]
    LayoutEngineUnavailable { tool: String },

    #[error("Layout engine '{tool}' failed (exit code {exit_code})\nDetails: {stderr}")]
    LayoutEngineError {
        tool: String,
        exit_code: i32,
        stderr: String,
    },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory is writable")]
    WriteError { path: PathBuf, details: String },

    #[error("{failed} of {total} render pass(es) failed")]
    RenderFailed { failed: usize, total: usize },

    /// Validation error for builder patterns and configuration
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl DepGraphError {
    /// Maps the error to the exit code of its failure class
    pub fn exit_code(&self) -> ExitCode {
        match self {
            DepGraphError::InvalidProjectPath { .. }
            | DepGraphError::ManifestNotFound { .. }
            | DepGraphError::ManifestParseError { .. }
            | DepGraphError::DuplicatePackage { .. }
            | DepGraphError::DanglingEdge { .. }
            | DepGraphError::SelfDependency { .. } => ExitCode::ManifestError,
            DepGraphError::ResolverUnavailable { .. } | DepGraphError::ResolverFailed { .. } => {
                ExitCode::ResolverError
            }
            DepGraphError::OutputDirectoryReset { .. }
            | DepGraphError::Validation { .. }
            | DepGraphError::SecurityError { .. } => ExitCode::SetupError,
            DepGraphError::LayoutEngineUnavailable { .. }
            | DepGraphError::LayoutEngineError { .. }
            | DepGraphError::WriteError { .. }
            | DepGraphError::RenderFailed { .. } => ExitCode::RenderError,
        }
    }
}

/// Picks the exit code for an error chain.
///
/// The first `DepGraphError` found in the chain decides; anything else is a
/// general error.
pub fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    // downcast_ref also sees a DepGraphError attached as context
    error
        .downcast_ref::<DepGraphError>()
        .or_else(|| {
            error
                .chain()
                .find_map(|cause| cause.downcast_ref::<DepGraphError>())
        })
        .map(DepGraphError::exit_code)
        .unwrap_or(ExitCode::GeneralError)
}
