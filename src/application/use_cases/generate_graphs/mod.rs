use crate::application::dto::{
    GraphKind, GraphsRequest, GraphsResponse, RenderConfig, RenderOutcome, RenderedArtifact,
};
use crate::dependency_graph::domain::{DependencyGraph, FilterSpec, FilteredGraph};
use crate::dependency_graph::services::{DotSerializer, GraphFilter, RenderStyle};
use crate::ports::outbound::{ArtifactWriter, DependencyResolver, LayoutEngine, ProgressReporter};
use crate::shared::Result;
use std::sync::atomic::{AtomicUsize, Ordering};

/// GenerateGraphsUseCase - Core use case for dependency graph generation
///
/// Resolves the project's dependency graph, derives the filtered graph from
/// it, resets the output location and renders both graphs concurrently.
///
/// # Type Parameters
/// * `DR` - DependencyResolver implementation
/// * `LE` - LayoutEngine implementation
/// * `AW` - ArtifactWriter implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateGraphsUseCase<DR, LE, AW, PR> {
    dependency_resolver: DR,
    layout_engine: LE,
    artifact_writer: AW,
    progress_reporter: PR,
}

impl<DR, LE, AW, PR> GenerateGraphsUseCase<DR, LE, AW, PR>
where
    DR: DependencyResolver,
    LE: LayoutEngine,
    AW: ArtifactWriter,
    PR: ProgressReporter,
{
    /// Creates a new GenerateGraphsUseCase with injected dependencies
    pub fn new(
        dependency_resolver: DR,
        layout_engine: LE,
        artifact_writer: AW,
        progress_reporter: PR,
    ) -> Self {
        Self {
            dependency_resolver,
            layout_engine,
            artifact_writer,
            progress_reporter,
        }
    }

    /// Executes the graph generation use case
    ///
    /// Resolution happens before the output location is touched, so a broken
    /// manifest leaves previous artifacts in place.
    ///
    /// # Errors
    /// Fails when resolving or resetting the output location fails. A failed
    /// render pass does not fail the use case; it is recorded in the
    /// response's outcomes.
    pub async fn execute(&self, request: GraphsRequest) -> Result<GraphsResponse> {
        // Step 1: Resolve the complete dependency graph
        let graph = self.resolve_graph(&request)?;

        // Step 2: Derive the filtered graph
        let filtered = self.apply_filter(&graph, &request.filter);

        // Step 3: Start from an empty output location
        self.reset_output()?;

        // Step 4: Render both graphs
        let outcomes = self.render_graphs(&graph, &filtered, &request.render).await;

        self.report_summary(&outcomes);
        Ok(GraphsResponse::new(graph, filtered, outcomes))
    }

    fn resolve_graph(&self, request: &GraphsRequest) -> Result<DependencyGraph> {
        self.progress_reporter.report(&format!(
            "📖 Resolving dependencies of: {}",
            request.project_path.display()
        ));

        let graph = self.dependency_resolver.resolve(&request.project_path)?;

        self.progress_reporter.report(&format!(
            "✅ Resolved {} package(s) with {} dependency edge(s)",
            graph.package_count(),
            graph.edge_count()
        ));

        Ok(graph)
    }

    fn apply_filter(&self, graph: &DependencyGraph, spec: &FilterSpec) -> FilteredGraph {
        let filtered = GraphFilter::apply(graph, spec);

        for name in filtered.unmatched() {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: Include name '{}' did not match any package.",
                name
            ));
        }

        if filtered.graph().is_empty() {
            self.progress_reporter.report_error(
                "⚠️  Warning: The filtered graph is empty. It will be rendered without nodes.",
            );
        } else {
            self.progress_reporter.report(&format!(
                "🔍 Filtered graph keeps {} of {} package(s)",
                filtered.graph().package_count(),
                graph.package_count()
            ));
        }

        if !filtered.orphans().is_empty() {
            self.progress_reporter.report(&format!(
                "🔗 Kept {} orphaned package(s) below excluded packages",
                filtered.orphans().len()
            ));
        }

        filtered
    }

    fn reset_output(&self) -> Result<()> {
        self.progress_reporter.report(&format!(
            "🧹 Resetting output directory: {}",
            self.artifact_writer.location().display()
        ));
        self.artifact_writer.reset()
    }

    async fn render_graphs(
        &self,
        graph: &DependencyGraph,
        filtered: &FilteredGraph,
        config: &RenderConfig,
    ) -> Vec<RenderOutcome> {
        let filtered_dot = DotSerializer::new(Self::style_for(GraphKind::Filtered, config))
            .serialize_filtered(filtered);
        let full_dot =
            DotSerializer::new(Self::style_for(GraphKind::Full, config)).serialize(graph);

        let completed = AtomicUsize::new(0);
        let total = 2;

        let (filtered_outcome, full_outcome) = tokio::join!(
            self.render_pass(GraphKind::Filtered, &filtered_dot, config, &completed, total),
            self.render_pass(GraphKind::Full, &full_dot, config, &completed, total),
        );

        vec![filtered_outcome, full_outcome]
    }

    fn style_for(kind: GraphKind, config: &RenderConfig) -> RenderStyle {
        RenderStyle::new(config.font.clone()).with_title(kind.title())
    }

    /// Runs one pass; failures are reported and returned, never propagated
    async fn render_pass(
        &self,
        kind: GraphKind,
        description: &str,
        config: &RenderConfig,
        completed: &AtomicUsize,
        total: usize,
    ) -> RenderOutcome {
        let outcome = match self.write_artifacts(kind, description, config).await {
            Ok(artifact) => RenderOutcome::Written { kind, artifact },
            Err(error) => {
                self.progress_reporter
                    .report_error(&format!("❌ Failed to render {}: {:#}", kind, error));
                RenderOutcome::Failed { kind, error }
            }
        };

        let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
        self.progress_reporter
            .report_progress(done, total, Some(kind.title()));

        outcome
    }

    async fn write_artifacts(
        &self,
        kind: GraphKind,
        description: &str,
        config: &RenderConfig,
    ) -> Result<RenderedArtifact> {
        let description_path = if config.keep_dot {
            Some(
                self.artifact_writer
                    .write(&kind.file_name("dot"), description.as_bytes())?,
            )
        } else {
            None
        };

        let image = self
            .layout_engine
            .render(description, config.format)
            .await?;
        let image_path = self
            .artifact_writer
            .write(&kind.file_name(config.format.extension()), &image)?;

        Ok(RenderedArtifact {
            image: image_path,
            description: description_path,
        })
    }

    fn report_summary(&self, outcomes: &[RenderOutcome]) {
        let written = outcomes.iter().filter(|o| o.is_written()).count();
        if written == outcomes.len() {
            self.progress_reporter.report_completion(&format!(
                "✅ Wrote {} graph(s) to {}",
                written,
                self.artifact_writer.location().display()
            ));
        } else {
            self.progress_reporter.report_error(&format!(
                "❌ Only {} of {} graph(s) were written to {}",
                written,
                outcomes.len(),
                self.artifact_writer.location().display()
            ));
        }
    }
}

#[cfg(test)]
mod tests;
