/// Mock implementations for testing
mod mock_dependency_resolver;
mod mock_layout_engine;
mod mock_progress_reporter;

pub use mock_dependency_resolver::MockDependencyResolver;
pub use mock_layout_engine::MockLayoutEngine;
pub use mock_progress_reporter::MockProgressReporter;
