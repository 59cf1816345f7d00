/// Domain layer for dependency graph extraction, filtering and serialization
///
/// Pure logic with no I/O: domain models in `domain`, stateless services in
/// `services`.
pub mod domain;
pub mod services;
