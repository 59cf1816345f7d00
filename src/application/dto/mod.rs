/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the domain layer isolated.
mod graph_kind;
mod graphs_request;
mod graphs_response;
mod render_config;

pub use graph_kind::GraphKind;
pub use graphs_request::GraphsRequest;
pub use graphs_response::{GraphsResponse, RenderOutcome, RenderedArtifact};
pub use render_config::{RenderConfig, DEFAULT_FONT};
