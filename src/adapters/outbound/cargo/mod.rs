/// Cargo adapter: dependency resolution through `cargo metadata`
mod cargo_metadata_resolver;

pub use cargo_metadata_resolver::{CargoMetadataResolver, ResolveOptions};
