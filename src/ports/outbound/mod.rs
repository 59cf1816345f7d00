/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (resolver, layout engine, file system, console).
pub mod artifact_writer;
pub mod dependency_resolver;
pub mod layout_engine;
pub mod progress_reporter;

pub use artifact_writer::ArtifactWriter;
pub use dependency_resolver::DependencyResolver;
pub use layout_engine::LayoutEngine;
pub use progress_reporter::ProgressReporter;
