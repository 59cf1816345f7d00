use super::{crate_name, DependencyGraph, PackageName};
use std::collections::BTreeSet;

/// Whether a name from an include or exclude list selects a graph node
///
/// A plain crate name selects every version of that crate, so `syn` matches
/// both `syn` and `syn@1.0.109`. A qualified name only matches itself.
pub fn name_matches(pattern: &str, name: &str) -> bool {
    pattern == name || (!pattern.contains('@') && crate_name(name) == pattern)
}

/// Which part of a dependency graph to keep
///
/// The include list names the packages of interest; everything they
/// transitively require is kept with them. Excluded packages are never kept.
/// Both lists are matched with [`name_matches`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    include: BTreeSet<String>,
    exclude: BTreeSet<String>,
    include_orphans: bool,
}

impl FilterSpec {
    pub fn new<I, S>(include: I, include_orphans: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: BTreeSet::new(),
            include_orphans,
        }
    }

    /// Adds packages that must never appear in the filtered graph
    pub fn with_exclude<I, S>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(exclude.into_iter().map(Into::into));
        self
    }

    pub fn include(&self) -> &BTreeSet<String> {
        &self.include
    }

    pub fn exclude(&self) -> &BTreeSet<String> {
        &self.exclude
    }

    pub fn include_orphans(&self) -> bool {
        self.include_orphans
    }

    pub fn is_included(&self, name: &str) -> bool {
        self.include.iter().any(|pattern| name_matches(pattern, name))
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.exclude.iter().any(|pattern| name_matches(pattern, name))
    }
}

/// Result of applying a [`FilterSpec`] to a graph
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredGraph {
    graph: DependencyGraph,
    unmatched: Vec<String>,
    orphans: BTreeSet<PackageName>,
}

impl FilteredGraph {
    pub fn new(
        graph: DependencyGraph,
        unmatched: Vec<String>,
        orphans: BTreeSet<PackageName>,
    ) -> Self {
        Self {
            graph,
            unmatched,
            orphans,
        }
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }

    pub fn into_graph(self) -> DependencyGraph {
        self.graph
    }

    /// Include-list names that matched no package
    pub fn unmatched(&self) -> &[String] {
        &self.unmatched
    }

    /// Packages kept only because an excluded package required them
    pub fn orphans(&self) -> &BTreeSet<PackageName> {
        &self.orphans
    }

    pub fn is_orphan(&self, name: &str) -> bool {
        self.orphans.contains(name)
    }
}
