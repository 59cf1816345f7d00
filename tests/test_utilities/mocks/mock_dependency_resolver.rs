use depgraph::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Mock DependencyResolver returning a fixed graph, or failing like a
/// project without Cargo.toml
#[derive(Clone)]
pub struct MockDependencyResolver {
    graph: Option<DependencyGraph>,
    calls: Arc<AtomicUsize>,
}

impl MockDependencyResolver {
    pub fn new(graph: DependencyGraph) -> Self {
        Self {
            graph: Some(graph),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn missing_manifest() -> Self {
        Self {
            graph: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DependencyResolver for MockDependencyResolver {
    fn resolve(&self, project_path: &Path) -> Result<DependencyGraph> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.graph {
            Some(graph) => Ok(graph.clone()),
            None => Err(DepGraphError::ManifestNotFound {
                path: project_path.join("Cargo.toml"),
                suggestion: "Make sure you're in a Cargo project directory".to_string(),
            }
            .into()),
        }
    }
}
