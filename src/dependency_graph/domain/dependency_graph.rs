use super::{Package, PackageName};
use crate::shared::error::DepGraphError;
use crate::shared::Result;
use std::collections::{BTreeMap, BTreeSet};

/// "`dependent` requires `dependency`"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DependencyEdge {
    dependent: PackageName,
    dependency: PackageName,
}

impl DependencyEdge {
    /// Creates an edge, rejecting self-dependencies
    pub fn new(dependent: PackageName, dependency: PackageName) -> Result<Self> {
        if dependent == dependency {
            return Err(DepGraphError::SelfDependency {
                name: dependent.to_string(),
            }
            .into());
        }
        Ok(Self {
            dependent,
            dependency,
        })
    }

    pub fn dependent(&self) -> &PackageName {
        &self.dependent
    }

    pub fn dependency(&self) -> &PackageName {
        &self.dependency
    }
}

/// DependencyGraph aggregate: packages plus "depends on" edges
///
/// Packages are keyed by name and edges kept sorted, so every iteration
/// order is deterministic. Construction enforces that names are unique and
/// that every edge endpoint is a known package.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DependencyGraph {
    packages: BTreeMap<PackageName, Package>,
    edges: BTreeSet<DependencyEdge>,
    adjacency: BTreeMap<PackageName, BTreeSet<PackageName>>,
    roots: BTreeSet<PackageName>,
}

impl DependencyGraph {
    /// Builds a graph from its parts
    ///
    /// # Arguments
    /// * `packages` - Every package in the graph
    /// * `edges` - Dependency edges between those packages; duplicates collapse
    /// * `roots` - Packages the graph was resolved for (workspace members)
    ///
    /// # Errors
    /// - `DuplicatePackage` if two packages share a name
    /// - `DanglingEdge` if an edge references an unknown package
    /// - `Validation` if a root is not one of the packages
    pub fn new(
        packages: Vec<Package>,
        edges: Vec<DependencyEdge>,
        roots: Vec<PackageName>,
    ) -> Result<Self> {
        let mut package_map = BTreeMap::new();
        for package in packages {
            let name = package.package_name().clone();
            if package_map.contains_key(&name) {
                return Err(DepGraphError::DuplicatePackage {
                    name: name.to_string(),
                }
                .into());
            }
            package_map.insert(name, package);
        }

        let mut edge_set = BTreeSet::new();
        let mut adjacency: BTreeMap<PackageName, BTreeSet<PackageName>> = BTreeMap::new();
        for edge in edges {
            if !package_map.contains_key(edge.dependent())
                || !package_map.contains_key(edge.dependency())
            {
                return Err(DepGraphError::DanglingEdge {
                    from: edge.dependent().to_string(),
                    to: edge.dependency().to_string(),
                }
                .into());
            }
            adjacency
                .entry(edge.dependent().clone())
                .or_default()
                .insert(edge.dependency().clone());
            edge_set.insert(edge);
        }

        let mut root_set = BTreeSet::new();
        for root in roots {
            if !package_map.contains_key(&root) {
                return Err(DepGraphError::Validation {
                    message: format!("Root package '{}' is not part of the graph", root),
                }
                .into());
            }
            root_set.insert(root);
        }

        Ok(Self {
            packages: package_map,
            edges: edge_set,
            adjacency,
            roots: root_set,
        })
    }

    /// Induced subgraph: the packages in `keep`, the edges between them and
    /// the roots among them
    pub fn subgraph(&self, keep: &BTreeSet<PackageName>) -> DependencyGraph {
        let packages = self
            .packages
            .iter()
            .filter(|(name, _)| keep.contains(*name))
            .map(|(name, package)| (name.clone(), package.clone()))
            .collect();

        let edges: BTreeSet<DependencyEdge> = self
            .edges
            .iter()
            .filter(|edge| keep.contains(edge.dependent()) && keep.contains(edge.dependency()))
            .cloned()
            .collect();

        let mut adjacency: BTreeMap<PackageName, BTreeSet<PackageName>> = BTreeMap::new();
        for edge in &edges {
            adjacency
                .entry(edge.dependent().clone())
                .or_default()
                .insert(edge.dependency().clone());
        }

        let roots = self
            .roots
            .iter()
            .filter(|root| keep.contains(*root))
            .cloned()
            .collect();

        DependencyGraph {
            packages,
            edges,
            adjacency,
            roots,
        }
    }

    /// Packages in name order
    pub fn packages(&self) -> impl Iterator<Item = &Package> {
        self.packages.values()
    }

    /// Edges sorted by (dependent, dependency)
    pub fn edges(&self) -> impl Iterator<Item = &DependencyEdge> {
        self.edges.iter()
    }

    pub fn package(&self, name: &str) -> Option<&Package> {
        self.packages.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Direct dependencies of `name`, empty for unknown packages
    pub fn dependencies_of(&self, name: &str) -> impl Iterator<Item = &PackageName> {
        self.adjacency.get(name).into_iter().flatten()
    }

    pub fn roots(&self) -> impl Iterator<Item = &PackageName> {
        self.roots.iter()
    }

    pub fn is_root(&self, name: &str) -> bool {
        self.roots.contains(name)
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}
