use super::RenderConfig;
use crate::dependency_graph::domain::FilterSpec;
use std::path::PathBuf;

/// GraphsRequest - Internal request DTO for the graph generation use case
#[derive(Debug, Clone)]
pub struct GraphsRequest {
    /// Project directory containing Cargo.toml
    pub project_path: PathBuf,
    /// Packages of interest for the filtered graph
    pub filter: FilterSpec,
    pub render: RenderConfig,
}

impl GraphsRequest {
    pub fn new(project_path: PathBuf, filter: FilterSpec, render: RenderConfig) -> Self {
        Self {
            project_path,
            filter,
            render,
        }
    }
}
