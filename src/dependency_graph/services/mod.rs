pub mod dot_serializer;
pub mod graph_filter;

pub use dot_serializer::{DotSerializer, RenderStyle};
pub use graph_filter::GraphFilter;
