use crate::shared::Result;
use std::borrow::Borrow;

/// Maximum length for package names (security limit)
const MAX_PACKAGE_NAME_LENGTH: usize = 255;

/// Maximum length for package versions (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// NewType wrapper for package name with validation
///
/// Besides plain crate names this also accepts version-qualified names such
/// as `syn@1.0.109`, used when two versions of one crate share a graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PackageName(String);

impl PackageName {
    pub fn new(name: String) -> Result<Self> {
        if name.is_empty() {
            anyhow::bail!("Package name cannot be empty");
        }

        if name.len() > MAX_PACKAGE_NAME_LENGTH {
            anyhow::bail!(
                "Package name is too long ({} bytes). Maximum allowed: {} bytes",
                name.len(),
                MAX_PACKAGE_NAME_LENGTH
            );
        }

        // Names end up inside DOT identifiers, so keep the alphabet small
        if !name
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '@' | '+'))
        {
            anyhow::bail!(
                "Package name '{}' contains invalid characters. Only alphanumeric, hyphens, underscores, dots, '@' and '+' are allowed.",
                name
            );
        }

        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The crate name of a graph name, without any `@version` qualifier
pub fn crate_name(name: &str) -> &str {
    name.split_once('@').map_or(name, |(base, _)| base)
}

impl Borrow<str> for PackageName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for package version with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version(String);

impl Version {
    pub fn new(version: String) -> Result<Self> {
        if version.is_empty() {
            anyhow::bail!("Package version cannot be empty");
        }

        if version.len() > MAX_VERSION_LENGTH {
            anyhow::bail!(
                "Package version is too long ({} bytes). Maximum allowed: {} bytes",
                version.len(),
                MAX_VERSION_LENGTH
            );
        }

        if !version
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '.' | '-' | '+'))
        {
            anyhow::bail!(
                "Package version '{}' contains invalid characters. Only alphanumeric, dots, hyphens and plus are allowed.",
                version
            );
        }

        Ok(Self(version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a package comes from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PackageSource {
    /// Local path dependency or workspace member
    Path(String),
    /// Package registry such as crates.io
    Registry(String),
    /// Remote git repository
    Git(String),
}

impl PackageSource {
    /// Parses a cargo source id (`registry+https://...`, `git+https://...`).
    ///
    /// Packages without a source id are local; `local_path` is recorded for them.
    pub fn from_source_id(source: Option<&str>, local_path: &str) -> Self {
        match source {
            None => PackageSource::Path(local_path.to_string()),
            Some(id) => {
                if let Some(url) = id.strip_prefix("git+") {
                    PackageSource::Git(url.to_string())
                } else if let Some(url) = id
                    .strip_prefix("registry+")
                    .or_else(|| id.strip_prefix("sparse+"))
                {
                    PackageSource::Registry(url.to_string())
                } else if let Some(path) = id.strip_prefix("path+") {
                    PackageSource::Path(path.trim_start_matches("file://").to_string())
                } else {
                    PackageSource::Registry(id.to_string())
                }
            }
        }
    }

    pub fn location(&self) -> &str {
        match self {
            PackageSource::Path(location)
            | PackageSource::Registry(location)
            | PackageSource::Git(location) => location,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, PackageSource::Path(_))
    }

    /// Short tag naming the kind of source
    pub fn kind(&self) -> &'static str {
        match self {
            PackageSource::Path(_) => "path",
            PackageSource::Registry(_) => "registry",
            PackageSource::Git(_) => "git",
        }
    }
}

impl std::fmt::Display for PackageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageSource::Path(path) => write!(f, "path: {}", path),
            PackageSource::Registry(url) => write!(f, "registry: {}", url),
            PackageSource::Git(url) => write!(f, "git: {}", url),
        }
    }
}

/// Package value object: one node of a dependency graph
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
    name: PackageName,
    version: Version,
    source: PackageSource,
}

impl Package {
    pub fn new(name: String, version: String, source: PackageSource) -> Result<Self> {
        Ok(Self {
            name: PackageName::new(name)?,
            version: Version::new(version)?,
            source,
        })
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn package_name(&self) -> &PackageName {
        &self.name
    }

    pub fn version(&self) -> &str {
        self.version.as_str()
    }

    pub fn source(&self) -> &PackageSource {
        &self.source
    }
}
