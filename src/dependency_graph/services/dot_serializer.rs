//! DOT serialization for dependency graphs.

use crate::dependency_graph::domain::{
    crate_name, DependencyGraph, FilteredGraph, Package, PackageSource,
};
use std::fmt::Write;

/// Visual settings shared by every node and edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    font: String,
    title: Option<String>,
}

impl RenderStyle {
    pub fn new(font: impl Into<String>) -> Self {
        Self {
            font: font.into(),
            title: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn font(&self) -> &str {
        &self.font
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

/// Turns a dependency graph into a Graphviz DOT description
///
/// Output depends only on the graph and the style: packages and edges are
/// emitted in sorted order and nothing time-dependent is written, so equal
/// inputs always serialize to identical bytes.
pub struct DotSerializer {
    style: RenderStyle,
}

impl DotSerializer {
    pub fn new(style: RenderStyle) -> Self {
        Self { style }
    }

    pub fn serialize(&self, graph: &DependencyGraph) -> String {
        self.write_graph(graph, |_| false)
    }

    /// Like [`serialize`](Self::serialize), drawing orphans dashed
    pub fn serialize_filtered(&self, filtered: &FilteredGraph) -> String {
        self.write_graph(filtered.graph(), |name| filtered.is_orphan(name))
    }

    fn write_graph<F>(&self, graph: &DependencyGraph, is_orphan: F) -> String
    where
        F: Fn(&str) -> bool,
    {
        let font = escape_label(self.style.font());
        let mut out = String::with_capacity(256 + graph.package_count() * 96);

        out.push_str("digraph dependencies {\n");
        let _ = write!(out, "  graph [fontname=\"{font}\"");
        if let Some(title) = self.style.title() {
            let _ = write!(out, ", label=\"{}\", labelloc=\"t\"", escape_label(title));
        }
        out.push_str("];\n");
        let _ = writeln!(out, "  node [fontname=\"{font}\"];");
        let _ = writeln!(out, "  edge [fontname=\"{font}\"];");

        if !graph.is_empty() {
            out.push('\n');
        }
        for package in graph.packages() {
            let mut styles = Vec::new();
            if graph.is_root(package.name()) {
                styles.push("bold");
            }
            if is_orphan(package.name()) {
                styles.push("dashed");
            }
            write_node(&mut out, package, &styles);
        }

        if graph.edge_count() > 0 {
            out.push('\n');
        }
        for edge in graph.edges() {
            let _ = writeln!(
                out,
                "  \"{}\" -> \"{}\";",
                escape_label(edge.dependent().as_str()),
                escape_label(edge.dependency().as_str())
            );
        }

        out.push_str("}\n");
        out
    }
}

fn write_node(out: &mut String, package: &Package, styles: &[&str]) {
    let _ = write!(
        out,
        "  \"{}\" [label=\"{}\\n{}\", shape=\"{}\"",
        escape_label(package.name()),
        escape_label(crate_name(package.name())),
        escape_label(package.version()),
        shape_for_source(package.source())
    );
    if !styles.is_empty() {
        let _ = write!(out, ", style=\"{}\"", styles.join(","));
    }
    out.push_str("];\n");
}

/// Node shape per package origin.
pub fn shape_for_source(source: &PackageSource) -> &'static str {
    match source {
        PackageSource::Path(_) => "box",
        PackageSource::Registry(_) => "ellipse",
        PackageSource::Git(_) => "diamond",
    }
}

/// Escape special characters for DOT quoted strings.
pub fn escape_label(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
