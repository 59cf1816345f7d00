use crate::dependency_graph::domain::{
    DependencyEdge, DependencyGraph, Package, PackageName, PackageSource,
};
use crate::ports::outbound::DependencyResolver;
use crate::shared::error::DepGraphError;
use crate::shared::security::{validate_regular_file, MAX_MANIFEST_SIZE};
use crate::shared::Result;
use cargo_metadata::{CargoOpt, DependencyKind, Metadata, MetadataCommand, NodeDep, PackageId};
use std::collections::{HashMap, HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

const MANIFEST_FILE_NAME: &str = "Cargo.toml";
const DEFAULT_PROGRAM: &str = "cargo";

/// Which dependency kinds become edges, and how features are resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    pub dev_dependencies: bool,
    pub build_dependencies: bool,
    pub all_features: bool,
}

/// CargoMetadataResolver adapter backed by `cargo metadata`
///
/// Validates `Cargo.toml` itself before handing it to cargo, so a missing or
/// malformed manifest is reported as a manifest error rather than a generic
/// tool failure.
pub struct CargoMetadataResolver {
    program: String,
    options: ResolveOptions,
}

impl CargoMetadataResolver {
    pub fn new(options: ResolveOptions) -> Self {
        Self::with_program(DEFAULT_PROGRAM, options)
    }

    /// Uses another executable in place of `cargo`
    pub fn with_program(program: impl Into<String>, options: ResolveOptions) -> Self {
        Self {
            program: program.into(),
            options,
        }
    }

    /// Checks that the manifest exists and is a Cargo manifest
    fn validate_manifest(&self, project_path: &Path) -> Result<PathBuf> {
        let manifest_path = project_path.join(MANIFEST_FILE_NAME);

        if !manifest_path.exists() {
            return Err(DepGraphError::ManifestNotFound {
                path: manifest_path,
                suggestion: format!(
                    "Cargo.toml does not exist in project directory \"{}\".\n   \
                     Please run in the root directory of a Cargo project, or specify the correct path with the --path option.",
                    project_path.display()
                ),
            }
            .into());
        }

        validate_regular_file(&manifest_path, MANIFEST_FILE_NAME, MAX_MANIFEST_SIZE).map_err(
            |e| DepGraphError::ManifestNotFound {
                path: manifest_path.clone(),
                suggestion: e.to_string(),
            },
        )?;

        let content =
            fs::read_to_string(&manifest_path).map_err(|e| DepGraphError::ManifestParseError {
                path: manifest_path.clone(),
                details: e.to_string(),
            })?;

        let manifest: toml::Table =
            toml::from_str(&content).map_err(|e| DepGraphError::ManifestParseError {
                path: manifest_path.clone(),
                details: e.to_string(),
            })?;

        if !manifest.contains_key("package") && !manifest.contains_key("workspace") {
            return Err(DepGraphError::ManifestParseError {
                path: manifest_path,
                details: "Neither a [package] nor a [workspace] table is present".to_string(),
            }
            .into());
        }

        Ok(manifest_path)
    }

    /// Runs the resolver and returns its JSON output
    fn run_metadata(&self, manifest_path: &Path) -> Result<String> {
        let program = which::which(&self.program).map_err(|_| {
            DepGraphError::ResolverUnavailable {
                tool: self.program.clone(),
            }
        })?;

        let mut metadata_command = MetadataCommand::new();
        metadata_command.cargo_path(program).manifest_path(manifest_path);
        if self.options.all_features {
            metadata_command.features(CargoOpt::AllFeatures);
        }

        let output = metadata_command.cargo_command().output().map_err(|_| {
            DepGraphError::ResolverUnavailable {
                tool: self.program.clone(),
            }
        })?;

        if !output.status.success() {
            return Err(DepGraphError::ResolverFailed {
                tool: self.program.clone(),
                exit_code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        String::from_utf8(output.stdout).map_err(|e| {
            DepGraphError::ManifestParseError {
                path: manifest_path.to_path_buf(),
                details: format!("Resolver output is not valid UTF-8: {}", e),
            }
            .into()
        })
    }

    /// Converts `cargo metadata` JSON into a dependency graph
    ///
    /// Packages that the workspace members do not reach through the selected
    /// dependency kinds are dropped before naming. A crate keeps its plain
    /// name while a single copy of it remains; otherwise every copy is named
    /// `name@version`, with a `+path`, `+registry` or `+git` tag when the
    /// version alone does not tell copies apart.
    ///
    /// # Errors
    /// `ManifestParseError` for malformed JSON, a missing `resolve` section or
    /// an unknown package id, plus the graph invariant errors of
    /// `DependencyGraph::new`
    pub fn parse_metadata(&self, json: &str, manifest_path: &Path) -> Result<DependencyGraph> {
        let parse_error = |details: String| DepGraphError::ManifestParseError {
            path: manifest_path.to_path_buf(),
            details,
        };

        let metadata: Metadata = MetadataCommand::parse(json)
            .map_err(|e| parse_error(format!("Invalid resolver output: {}", e)))?;

        let resolve = metadata.resolve.as_ref().ok_or_else(|| {
            parse_error("Resolver output has no dependency resolution".to_string())
        })?;

        let known: HashSet<&PackageId> = metadata.packages.iter().map(|p| &p.id).collect();
        let check = |id: &PackageId| -> Result<()> {
            if known.contains(id) {
                Ok(())
            } else {
                Err(parse_error(format!(
                    "Resolver output references unknown package id '{}'",
                    id
                ))
                .into())
            }
        };

        let mut selected: HashMap<&PackageId, Vec<&PackageId>> = HashMap::new();
        for node in &resolve.nodes {
            check(&node.id)?;
            let mut deps = Vec::new();
            for dep in node.deps.iter().filter(|d| self.is_selected(d)) {
                check(&dep.pkg)?;
                deps.push(&dep.pkg);
            }
            selected.insert(&node.id, deps);
        }
        for member in &metadata.workspace_members {
            check(member)?;
        }

        let reachable = reachable_ids(&metadata.workspace_members, &selected);

        let mut retained: Vec<(&cargo_metadata::Package, PackageSource)> = metadata
            .packages
            .iter()
            .filter(|package| reachable.contains(&package.id))
            .map(|package| {
                let local_path = package
                    .manifest_path
                    .parent()
                    .unwrap_or(package.manifest_path.as_path())
                    .to_string();
                let source = PackageSource::from_source_id(
                    package.source.as_ref().map(|s| s.repr.as_str()),
                    &local_path,
                );
                (package, source)
            })
            .collect();
        retained.sort_by(|(a, _), (b, _)| a.id.repr.cmp(&b.id.repr));

        let names = graph_names(&retained);

        let mut names_by_id: HashMap<&PackageId, PackageName> = HashMap::new();
        let mut packages = Vec::with_capacity(retained.len());
        for ((package, source), name) in retained.into_iter().zip(names) {
            let node = Package::new(name, package.version.to_string(), source)?;
            names_by_id.insert(&package.id, node.package_name().clone());
            packages.push(node);
        }

        let mut edges = Vec::new();
        for (id, deps) in &selected {
            let Some(dependent) = names_by_id.get(id) else {
                continue;
            };
            for dep in deps {
                if let Some(dependency) = names_by_id.get(dep) {
                    edges.push(DependencyEdge::new(dependent.clone(), dependency.clone())?);
                }
            }
        }

        let roots = metadata
            .workspace_members
            .iter()
            .filter_map(|id| names_by_id.get(id).cloned())
            .collect();

        DependencyGraph::new(packages, edges, roots)
    }

    /// Whether a resolved dependency is drawn as an edge
    ///
    /// Cargo before 1.41 reports no dependency kinds; such dependencies
    /// count as normal ones.
    fn is_selected(&self, dep: &NodeDep) -> bool {
        if dep.dep_kinds.is_empty() {
            return true;
        }
        dep.dep_kinds.iter().any(|info| match info.kind {
            DependencyKind::Normal => true,
            DependencyKind::Development => self.options.dev_dependencies,
            DependencyKind::Build => self.options.build_dependencies,
            _ => false,
        })
    }
}

/// Package ids reachable from the workspace members over selected edges
fn reachable_ids<'a>(
    members: &'a [PackageId],
    selected: &HashMap<&'a PackageId, Vec<&'a PackageId>>,
) -> HashSet<&'a PackageId> {
    let mut visited: HashSet<&PackageId> = HashSet::new();
    let mut queue: VecDeque<&PackageId> = VecDeque::new();

    for member in members {
        if visited.insert(member) {
            queue.push_back(member);
        }
    }

    while let Some(current) = queue.pop_front() {
        for &dep in selected.get(current).into_iter().flatten() {
            if visited.insert(dep) {
                queue.push_back(dep);
            }
        }
    }

    visited
}

/// Graph names for the retained packages, in the same order
///
/// Copies that still collide after the version and source tags, such as the
/// same crate from two different git repositories, get a running number.
fn graph_names(packages: &[(&cargo_metadata::Package, PackageSource)]) -> Vec<String> {
    let mut per_name: HashMap<&str, usize> = HashMap::new();
    let mut per_version: HashMap<(&str, String), usize> = HashMap::new();
    for (package, _) in packages {
        *per_name.entry(package.name.as_str()).or_default() += 1;
        *per_version
            .entry((package.name.as_str(), package.version.to_string()))
            .or_default() += 1;
    }

    let candidates: Vec<String> = packages
        .iter()
        .map(|(package, source)| {
            let name = package.name.as_str();
            if per_name[name] == 1 {
                return name.to_string();
            }
            let version = package.version.to_string();
            if per_version[&(name, version.clone())] == 1 {
                format!("{}@{}", name, version)
            } else {
                format!("{}@{}+{}", name, version, source.kind())
            }
        })
        .collect();

    let mut per_candidate: HashMap<&str, usize> = HashMap::new();
    for candidate in &candidates {
        *per_candidate.entry(candidate.as_str()).or_default() += 1;
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    candidates
        .iter()
        .map(|candidate| {
            if per_candidate[candidate.as_str()] == 1 {
                return candidate.clone();
            }
            let n = seen.entry(candidate.as_str()).or_default();
            *n += 1;
            format!("{}.{}", candidate, n)
        })
        .collect()
}

impl Default for CargoMetadataResolver {
    fn default() -> Self {
        Self::new(ResolveOptions::default())
    }
}

impl DependencyResolver for CargoMetadataResolver {
    fn resolve(&self, project_path: &Path) -> Result<DependencyGraph> {
        let manifest_path = self.validate_manifest(project_path)?;
        let json = self.run_metadata(&manifest_path)?;
        self.parse_metadata(&json, &manifest_path)
    }
}
