/// Shared helpers for integration tests
pub mod graphs;
pub mod mocks;
