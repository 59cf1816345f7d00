/// Use cases module containing application business logic orchestration
mod generate_graphs;

pub use generate_graphs::GenerateGraphsUseCase;
