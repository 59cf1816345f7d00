pub mod dependency_graph;
pub mod filter_spec;
pub mod image_format;
pub mod package;

pub use dependency_graph::{DependencyEdge, DependencyGraph};
pub use filter_spec::{name_matches, FilterSpec, FilteredGraph};
pub use image_format::ImageFormat;
pub use package::{crate_name, Package, PackageName, PackageSource, Version};
