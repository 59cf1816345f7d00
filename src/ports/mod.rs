/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound (driven) ports describe everything the application core needs
/// from the outside world: resolving a manifest, laying out a graph, writing
/// artifacts and reporting progress.
pub mod outbound;
