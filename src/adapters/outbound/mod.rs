/// Outbound adapters - Infrastructure implementations of outbound ports
pub mod cargo;
pub mod console;
pub mod filesystem;
pub mod graphviz;
