use depgraph::prelude::*;

/// Builds a graph of registry packages, all at version 1.0.0
pub fn graph(nodes: &[&str], edges: &[(&str, &str)], roots: &[&str]) -> DependencyGraph {
    let packages = nodes
        .iter()
        .map(|n| {
            Package::new(
                n.to_string(),
                "1.0.0".to_string(),
                PackageSource::Registry("https://index.crates.io/".to_string()),
            )
            .unwrap()
        })
        .collect();
    let edges = edges
        .iter()
        .map(|(from, to)| DependencyEdge::new(name(from), name(to)).unwrap())
        .collect();
    let roots = roots.iter().map(|r| name(r)).collect();
    DependencyGraph::new(packages, edges, roots).unwrap()
}

pub fn name(n: &str) -> PackageName {
    PackageName::new(n.to_string()).unwrap()
}

/// app -> {cli, core}; cli -> clap; core -> {serde, log}; serde -> serde_derive -> syn
pub fn workspace_graph() -> DependencyGraph {
    graph(
        &["app", "cli", "core", "clap", "serde", "serde_derive", "syn", "log"],
        &[
            ("app", "cli"),
            ("app", "core"),
            ("cli", "clap"),
            ("core", "serde"),
            ("core", "log"),
            ("serde", "serde_derive"),
            ("serde_derive", "syn"),
        ],
        &["app"],
    )
}
