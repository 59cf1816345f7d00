/// The two graphs every run renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphKind {
    /// Include list plus everything it requires
    Filtered,
    /// Every resolved package
    Full,
}

impl GraphKind {
    /// Artifact file name without extension
    pub fn file_stem(&self) -> &'static str {
        match self {
            GraphKind::Filtered => "filtered-dependencies",
            GraphKind::Full => "all-dependencies",
        }
    }

    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{}", self.file_stem(), extension)
    }

    /// Caption drawn above the graph
    pub fn title(&self) -> &'static str {
        match self {
            GraphKind::Filtered => "filtered dependencies",
            GraphKind::Full => "all dependencies",
        }
    }
}

impl std::fmt::Display for GraphKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
