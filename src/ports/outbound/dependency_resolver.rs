use crate::dependency_graph::domain::DependencyGraph;
use crate::shared::Result;
use std::path::Path;

/// DependencyResolver port for turning a project manifest into a graph
///
/// This port abstracts the external resolution tool, so the application
/// core only ever sees a resolved `DependencyGraph`.
pub trait DependencyResolver {
    /// Resolves the dependency graph of the project at `project_path`
    ///
    /// # Arguments
    /// * `project_path` - Path to the project root containing the manifest
    ///
    /// # Returns
    /// The full transitive dependency graph with unique package names
    ///
    /// # Errors
    /// Returns an error if:
    /// - The manifest does not exist (`ManifestNotFound`)
    /// - The manifest or the resolver output is malformed (`ManifestParseError`)
    /// - The resolver tool is missing or fails (`ResolverUnavailable`, `ResolverFailed`)
    fn resolve(&self, project_path: &Path) -> Result<DependencyGraph>;
}
