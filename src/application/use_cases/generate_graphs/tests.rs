use super::*;
use crate::dependency_graph::domain::{
    DependencyEdge, ImageFormat, Package, PackageName, PackageSource,
};
use crate::shared::error::DepGraphError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

// Mock implementations for testing
struct MockDependencyResolver {
    graph: Option<DependencyGraph>,
}

impl DependencyResolver for MockDependencyResolver {
    fn resolve(&self, project_path: &Path) -> Result<DependencyGraph> {
        self.graph.clone().ok_or_else(|| {
            DepGraphError::ManifestNotFound {
                path: project_path.join("Cargo.toml"),
                suggestion: "mock".to_string(),
            }
            .into()
        })
    }
}

/// Echoes the description back as the "image"; fails for descriptions containing `fail_on`
struct MockLayoutEngine {
    fail_on: Option<String>,
}

#[async_trait]
impl LayoutEngine for MockLayoutEngine {
    async fn render(&self, description: &str, format: ImageFormat) -> Result<Vec<u8>> {
        if let Some(marker) = &self.fail_on {
            if description.contains(marker.as_str()) {
                return Err(DepGraphError::LayoutEngineError {
                    tool: "mock".to_string(),
                    exit_code: 1,
                    stderr: "layout failed".to_string(),
                }
                .into());
            }
        }
        Ok(format!("{}\n{}", format, description).into_bytes())
    }
}

#[derive(Clone, Default)]
struct MockArtifactWriter {
    files: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    resets: Arc<Mutex<usize>>,
    fail_reset: bool,
}

impl MockArtifactWriter {
    fn file(&self, name: &str) -> Option<String> {
        self.files
            .lock()
            .unwrap()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, content)| String::from_utf8_lossy(content).to_string())
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .files
            .lock()
            .unwrap()
            .iter()
            .map(|(n, _)| n.clone())
            .collect();
        names.sort();
        names
    }
}

impl ArtifactWriter for MockArtifactWriter {
    fn location(&self) -> &Path {
        Path::new("graphs")
    }

    fn reset(&self) -> Result<()> {
        if self.fail_reset {
            return Err(DepGraphError::OutputDirectoryReset {
                path: PathBuf::from("graphs"),
                details: "mock".to_string(),
            }
            .into());
        }
        *self.resets.lock().unwrap() += 1;
        self.files.lock().unwrap().clear();
        Ok(())
    }

    fn write(&self, file_name: &str, content: &[u8]) -> Result<PathBuf> {
        self.files
            .lock()
            .unwrap()
            .push((file_name.to_string(), content.to_vec()));
        Ok(Path::new("graphs").join(file_name))
    }
}

#[derive(Clone, Default)]
struct MockProgressReporter {
    errors: Arc<Mutex<Vec<String>>>,
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
    fn report_completion(&self, _message: &str) {}
}

fn sample_graph() -> DependencyGraph {
    // app -> serde -> serde_derive, app -> log
    let packages = ["app", "serde", "serde_derive", "log"]
        .iter()
        .map(|n| {
            Package::new(
                n.to_string(),
                "1.0.0".to_string(),
                PackageSource::Registry("https://index.crates.io/".to_string()),
            )
            .unwrap()
        })
        .collect();
    let edges = [("app", "serde"), ("serde", "serde_derive"), ("app", "log")]
        .iter()
        .map(|(from, to)| {
            DependencyEdge::new(
                PackageName::new(from.to_string()).unwrap(),
                PackageName::new(to.to_string()).unwrap(),
            )
            .unwrap()
        })
        .collect();
    DependencyGraph::new(packages, edges, vec![PackageName::new("app".to_string()).unwrap()])
        .unwrap()
}

fn request(include: &[&str], render: RenderConfig) -> GraphsRequest {
    GraphsRequest::new(
        PathBuf::from("project"),
        FilterSpec::new(include.iter().copied(), false),
        render,
    )
}

type TestUseCase = GenerateGraphsUseCase<
    MockDependencyResolver,
    MockLayoutEngine,
    MockArtifactWriter,
    MockProgressReporter,
>;

fn use_case(
    graph: Option<DependencyGraph>,
    fail_on: Option<&str>,
    writer: MockArtifactWriter,
    reporter: MockProgressReporter,
) -> TestUseCase {
    GenerateGraphsUseCase::new(
        MockDependencyResolver { graph },
        MockLayoutEngine {
            fail_on: fail_on.map(str::to_string),
        },
        writer,
        reporter,
    )
}

#[tokio::test]
async fn test_execute_writes_both_graphs() {
    let writer = MockArtifactWriter::default();
    let uc = use_case(
        Some(sample_graph()),
        None,
        writer.clone(),
        MockProgressReporter::default(),
    );

    let response = uc
        .execute(request(&["serde"], RenderConfig::default()))
        .await
        .unwrap();

    assert!(response.ensure_rendered().is_ok());
    assert_eq!(
        writer.names(),
        vec!["all-dependencies.png", "filtered-dependencies.png"]
    );
    assert_eq!(response.filtered.graph().package_count(), 2);
    assert_eq!(response.graph.package_count(), 4);

    let filtered = writer.file("filtered-dependencies.png").unwrap();
    assert!(filtered.starts_with("png\n"));
    assert!(filtered.contains("\"serde\" -> \"serde_derive\""));
    assert!(!filtered.contains("\"log\""));

    let full = writer.file("all-dependencies.png").unwrap();
    assert!(full.contains("\"app\" -> \"log\""));
}

#[tokio::test]
async fn test_execute_uses_format_and_font() {
    let writer = MockArtifactWriter::default();
    let uc = use_case(
        Some(sample_graph()),
        None,
        writer.clone(),
        MockProgressReporter::default(),
    );

    uc.execute(request(&["app"], RenderConfig::new(ImageFormat::Svg, "Courier")))
        .await
        .unwrap();

    let full = writer.file("all-dependencies.svg").unwrap();
    assert!(full.starts_with("svg\n"));
    assert!(full.contains("fontname=\"Courier\""));
}

#[tokio::test]
async fn test_execute_keeps_dot_descriptions() {
    let writer = MockArtifactWriter::default();
    let uc = use_case(
        Some(sample_graph()),
        None,
        writer.clone(),
        MockProgressReporter::default(),
    );

    let response = uc
        .execute(request(
            &["app"],
            RenderConfig::default().with_keep_dot(true),
        ))
        .await
        .unwrap();

    assert_eq!(writer.names().len(), 4);
    let dot = writer.file("all-dependencies.dot").unwrap();
    assert!(dot.starts_with("digraph dependencies {"));
    match response.outcome(GraphKind::Full).unwrap() {
        RenderOutcome::Written { artifact, .. } => {
            assert_eq!(
                artifact.description.as_deref(),
                Some(Path::new("graphs/all-dependencies.dot"))
            );
        }
        RenderOutcome::Failed { error, .. } => panic!("unexpected failure: {}", error),
    }
}

#[tokio::test]
async fn test_resolve_failure_leaves_output_untouched() {
    let writer = MockArtifactWriter::default();
    let uc = use_case(None, None, writer.clone(), MockProgressReporter::default());

    let err = uc
        .execute(request(&["app"], RenderConfig::default()))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<DepGraphError>(),
        Some(DepGraphError::ManifestNotFound { .. })
    ));
    assert_eq!(*writer.resets.lock().unwrap(), 0);
    assert!(writer.names().is_empty());
}

#[tokio::test]
async fn test_reset_failure_aborts_before_rendering() {
    let writer = MockArtifactWriter {
        fail_reset: true,
        ..Default::default()
    };
    let uc = use_case(
        Some(sample_graph()),
        None,
        writer.clone(),
        MockProgressReporter::default(),
    );

    let err = uc
        .execute(request(&["app"], RenderConfig::default()))
        .await
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<DepGraphError>(),
        Some(DepGraphError::OutputDirectoryReset { .. })
    ));
    assert!(writer.names().is_empty());
}

#[tokio::test]
async fn test_failed_pass_does_not_stop_the_other() {
    let writer = MockArtifactWriter::default();
    let reporter = MockProgressReporter::default();
    let uc = use_case(
        Some(sample_graph()),
        Some("all dependencies"),
        writer.clone(),
        reporter.clone(),
    );

    let response = uc
        .execute(request(&["serde"], RenderConfig::default()))
        .await
        .unwrap();

    assert_eq!(writer.names(), vec!["filtered-dependencies.png"]);
    assert!(response.outcome(GraphKind::Filtered).unwrap().is_written());
    assert!(!response.outcome(GraphKind::Full).unwrap().is_written());
    assert_eq!(response.failed_count(), 1);
    assert!(response.ensure_rendered().is_err());

    let errors = reporter.errors.lock().unwrap();
    assert!(errors
        .iter()
        .any(|e| e.contains("Failed to render all dependencies")));
}

#[tokio::test]
async fn test_unmatched_include_warns_and_renders_empty_graph() {
    let writer = MockArtifactWriter::default();
    let reporter = MockProgressReporter::default();
    let uc = use_case(
        Some(sample_graph()),
        None,
        writer.clone(),
        reporter.clone(),
    );

    let response = uc
        .execute(request(&["tokio"], RenderConfig::default()))
        .await
        .unwrap();

    assert!(response.filtered.graph().is_empty());
    assert_eq!(response.filtered.unmatched(), ["tokio".to_string()]);
    assert!(writer.file("filtered-dependencies.png").is_some());

    let errors = reporter.errors.lock().unwrap();
    assert!(errors.iter().any(|e| e.contains("'tokio'")));
    assert!(errors.iter().any(|e| e.contains("filtered graph is empty")));
}

#[tokio::test]
async fn test_repeated_runs_produce_identical_artifacts() {
    let first = MockArtifactWriter::default();
    let second = MockArtifactWriter::default();

    for writer in [&first, &second] {
        use_case(
            Some(sample_graph()),
            None,
            writer.clone(),
            MockProgressReporter::default(),
        )
        .execute(request(&["serde"], RenderConfig::default()))
        .await
        .unwrap();
    }

    for name in first.names() {
        assert_eq!(first.file(&name), second.file(&name));
    }
}
