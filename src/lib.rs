//! depgraph - dependency graph rendering for Cargo projects
//!
//! This library resolves the dependency graph of a Cargo project, derives a
//! filtered view of it from an include list and renders both graphs through
//! Graphviz, following hexagonal architecture and Domain-Driven Design
//! principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`dependency_graph`): Graph model, filtering and DOT serialization
//! - **Application Layer** (`application`): Use cases and DTOs
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use depgraph::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! // Create adapters
//! let resolver = CargoMetadataResolver::new(ResolveOptions::default());
//! let layout_engine = GraphvizLayoutEngine::new();
//! let output = OutputDirectory::new(PathBuf::from("target/dependency-graphs"));
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = GenerateGraphsUseCase::new(resolver, layout_engine, output, progress_reporter);
//!
//! // Execute
//! let request = GraphsRequest::new(
//!     PathBuf::from("."),
//!     FilterSpec::new(["serde"], false),
//!     RenderConfig::default(),
//! );
//! let response = use_case.execute(request).await?;
//! response.ensure_rendered()?;
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod dependency_graph;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::cargo::{CargoMetadataResolver, ResolveOptions};
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::OutputDirectory;
    pub use crate::adapters::outbound::graphviz::GraphvizLayoutEngine;
    pub use crate::application::dto::{
        GraphKind, GraphsRequest, GraphsResponse, RenderConfig, RenderOutcome, RenderedArtifact,
        DEFAULT_FONT,
    };
    pub use crate::application::use_cases::GenerateGraphsUseCase;
    pub use crate::dependency_graph::domain::{
        DependencyEdge, DependencyGraph, FilterSpec, FilteredGraph, ImageFormat, Package,
        PackageName, PackageSource,
    };
    pub use crate::dependency_graph::services::{DotSerializer, GraphFilter, RenderStyle};
    pub use crate::ports::outbound::{
        ArtifactWriter, DependencyResolver, LayoutEngine, ProgressReporter,
    };
    pub use crate::shared::error::{exit_code_for, DepGraphError, ExitCode};
    pub use crate::shared::Result;
}
