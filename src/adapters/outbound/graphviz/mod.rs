/// Graphviz adapter: graph layout and rendering through `dot`
mod graphviz_layout_engine;

pub use graphviz_layout_engine::GraphvizLayoutEngine;
