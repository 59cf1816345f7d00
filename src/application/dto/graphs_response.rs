use super::GraphKind;
use crate::dependency_graph::domain::{DependencyGraph, FilteredGraph};
use crate::shared::error::DepGraphError;
use crate::shared::Result;
use std::path::{Path, PathBuf};

/// Files produced by one successful render pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub image: PathBuf,
    /// DOT description, only kept on request
    pub description: Option<PathBuf>,
}

/// How one render pass ended
#[derive(Debug)]
pub enum RenderOutcome {
    Written {
        kind: GraphKind,
        artifact: RenderedArtifact,
    },
    Failed {
        kind: GraphKind,
        error: anyhow::Error,
    },
}

impl RenderOutcome {
    pub fn kind(&self) -> GraphKind {
        match self {
            RenderOutcome::Written { kind, .. } | RenderOutcome::Failed { kind, .. } => *kind,
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, RenderOutcome::Written { .. })
    }

    pub fn image(&self) -> Option<&Path> {
        match self {
            RenderOutcome::Written { artifact, .. } => Some(&artifact.image),
            RenderOutcome::Failed { .. } => None,
        }
    }
}

/// GraphsResponse - Everything one run produced
///
/// Render passes fail independently, so the response is returned even when
/// a pass failed. Callers decide via [`GraphsResponse::ensure_rendered`].
#[derive(Debug)]
pub struct GraphsResponse {
    pub graph: DependencyGraph,
    pub filtered: FilteredGraph,
    pub outcomes: Vec<RenderOutcome>,
}

impl GraphsResponse {
    pub fn new(
        graph: DependencyGraph,
        filtered: FilteredGraph,
        outcomes: Vec<RenderOutcome>,
    ) -> Self {
        Self {
            graph,
            filtered,
            outcomes,
        }
    }

    pub fn outcome(&self, kind: GraphKind) -> Option<&RenderOutcome> {
        self.outcomes.iter().find(|outcome| outcome.kind() == kind)
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_written()).count()
    }

    /// Fails with [`DepGraphError::RenderFailed`] unless every pass wrote its image
    pub fn ensure_rendered(&self) -> Result<()> {
        let failed = self.failed_count();
        if failed > 0 {
            return Err(DepGraphError::RenderFailed {
                failed,
                total: self.outcomes.len(),
            }
            .into());
        }
        Ok(())
    }
}
