mod cli;
mod config;

use cli::{Args, Settings};
use depgraph::prelude::*;
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(exit_code_for(&e).as_i32());
    }
}

async fn run() -> Result<()> {
    // Parse command-line arguments; clap exits with code 2 on its own
    let args = Args::parse_args();

    let project_path = args.project_path();
    validate_project_path(&project_path)?;

    let config_file = match args.config.as_deref() {
        Some(path) => Some(config::load_config_from_path(path)?),
        None => config::discover_config(&project_path)?,
    };
    let settings = args.into_settings(config_file)?;

    let response = execute(settings).await?;
    response.ensure_rendered()
}

async fn execute(settings: Settings) -> Result<GraphsResponse> {
    // Create adapters (Dependency Injection)
    let resolver = CargoMetadataResolver::new(settings.resolve);
    let layout_engine = GraphvizLayoutEngine::new();
    let output_directory =
        OutputDirectory::new(settings.output_dir).protecting(&settings.project_path);
    let progress_reporter = StderrProgressReporter::new();

    let use_case =
        GenerateGraphsUseCase::new(resolver, layout_engine, output_directory, progress_reporter);

    let request = GraphsRequest::new(settings.project_path, settings.filter, settings.render);
    use_case.execute(request).await
}

fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(DepGraphError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Security check: Reject symbolic links for project paths
    let metadata =
        std::fs::symlink_metadata(path).map_err(|e| DepGraphError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read path metadata: {}", e),
        })?;

    if metadata.is_symlink() {
        return Err(DepGraphError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Security: Project path is a symbolic link. For security reasons, symbolic links are not allowed.".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(DepGraphError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
