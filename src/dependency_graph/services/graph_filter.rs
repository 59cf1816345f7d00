use crate::dependency_graph::domain::{
    name_matches, DependencyGraph, FilterSpec, FilteredGraph, PackageName,
};
use std::collections::{BTreeSet, HashSet, VecDeque};

/// GraphFilter service for restricting a graph to the packages of interest
///
/// Pure graph logic with no I/O. The retained set is the forward closure of
/// the include list. Excluded packages are never retained; with orphans
/// disabled traversal also stops at them, with orphans enabled it walks
/// through them so everything a retained package transitively requires
/// stays in the graph.
pub struct GraphFilter;

impl GraphFilter {
    /// Applies a filter to a graph
    ///
    /// # Arguments
    /// * `graph` - The full dependency graph
    /// * `spec` - Include list, exclude list and orphan policy
    ///
    /// # Returns
    /// The induced subgraph over the retained packages, together with the
    /// include names that matched nothing and the packages kept as orphans
    ///
    /// A plain include name starts traversal at every version of that crate.
    pub fn apply(graph: &DependencyGraph, spec: &FilterSpec) -> FilteredGraph {
        let mut unmatched = Vec::new();
        let mut starts = Vec::new();
        for pattern in spec.include() {
            let mut matched = false;
            for package in graph.packages() {
                if !name_matches(pattern, package.name()) {
                    continue;
                }
                matched = true;
                if !spec.is_excluded(package.name()) {
                    starts.push(package.package_name().clone());
                }
            }
            if !matched {
                unmatched.push(pattern.clone());
            }
        }

        let base = Self::reachable(graph, starts, |name| !spec.is_excluded(name.as_str()));

        let mut retained = base.clone();
        let mut orphans = BTreeSet::new();
        if spec.include_orphans() {
            let closure = Self::reachable(graph, base.iter().cloned(), |_| true);
            for name in closure {
                if !spec.is_excluded(name.as_str()) && !base.contains(&name) {
                    orphans.insert(name.clone());
                    retained.insert(name);
                }
            }
        }

        FilteredGraph::new(graph.subgraph(&retained), unmatched, orphans)
    }

    /// Breadth-first closure over outgoing edges
    ///
    /// Nodes are marked visited before they are queued, so cycles terminate.
    /// Only nodes accepted by `can_enter` are visited; start nodes are taken
    /// as given.
    fn reachable<I, F>(graph: &DependencyGraph, starts: I, can_enter: F) -> BTreeSet<PackageName>
    where
        I: IntoIterator<Item = PackageName>,
        F: Fn(&PackageName) -> bool,
    {
        let mut visited: HashSet<PackageName> = HashSet::new();
        let mut queue = VecDeque::new();

        for start in starts {
            if visited.insert(start.clone()) {
                queue.push_back(start);
            }
        }

        while let Some(current) = queue.pop_front() {
            for dependency in graph.dependencies_of(current.as_str()) {
                if can_enter(dependency) && visited.insert(dependency.clone()) {
                    queue.push_back(dependency.clone());
                }
            }
        }

        visited.into_iter().collect()
    }
}
