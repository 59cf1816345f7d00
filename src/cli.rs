use clap::Parser;
use std::path::PathBuf;

use crate::config::{merge_names, validate_names, ConfigFile};
use depgraph::prelude::{
    FilterSpec, ImageFormat, RenderConfig, ResolveOptions, Result, DEFAULT_FONT,
};

/// Output directory used when neither the CLI nor the config names one,
/// relative to the project directory
pub const DEFAULT_OUTPUT_DIR: &str = "target/dependency-graphs";

/// Render dependency graphs of Cargo projects with Graphviz
#[derive(Parser, Debug)]
#[command(name = "depgraph")]
#[command(version)]
#[command(
    about = "Render the full and a filtered dependency graph of a Cargo project",
    long_about = None
)]
pub struct Args {
    /// Path to the project directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Packages of interest for the filtered graph.
    /// Can be specified multiple times or comma-separated: -i serde,tokio -i log
    #[arg(short, long = "include", value_name = "NAME", value_delimiter = ',')]
    pub include: Vec<String>,

    /// Packages never drawn in the filtered graph
    #[arg(short = 'x', long = "exclude", value_name = "NAME", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Keep packages that are only reachable through excluded packages
    #[arg(long)]
    pub include_orphans: bool,

    /// Output directory, wiped on every run [default: <path>/target/dependency-graphs]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Font for node and edge labels [default: Helvetica]
    #[arg(long)]
    pub font: Option<String>,

    /// Image format: png, svg, pdf or jpg [default: png]
    #[arg(short, long)]
    pub format: Option<ImageFormat>,

    /// Include dev-dependencies
    #[arg(long)]
    pub dev_deps: bool,

    /// Include build-dependencies
    #[arg(long)]
    pub build_deps: bool,

    /// Resolve with every feature enabled
    #[arg(long)]
    pub all_features: bool,

    /// Also write the DOT description of each graph
    #[arg(long)]
    pub keep_dot: bool,

    /// Path to config file (auto-discovers depgraph.config.yml if not specified)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Everything a run needs, after merging CLI arguments over the config file
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub project_path: PathBuf,
    pub output_dir: PathBuf,
    pub filter: FilterSpec,
    pub render: RenderConfig,
    pub resolve: ResolveOptions,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn project_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Merges the arguments with an optional config file.
    ///
    /// Flags and values given on the command line win; lists are merged
    /// with command-line entries first.
    pub fn into_settings(self, config: Option<ConfigFile>) -> Result<Settings> {
        let config = config.unwrap_or_default();
        let project_path = self.project_path();

        let include = merge_names(&self.include, config.include.as_deref());
        let exclude = merge_names(&self.exclude, config.exclude.as_deref());
        validate_names("include", &include)?;
        validate_names("exclude", &exclude)?;

        let output_dir = match (self.output_dir, config.output_dir.clone()) {
            (Some(dir), _) => dir,
            (None, Some(dir)) => project_path.join(dir),
            (None, None) => project_path.join(DEFAULT_OUTPUT_DIR),
        };

        let format = match self.format {
            Some(format) => format,
            None => config.image_format()?.unwrap_or_default(),
        };
        let font = self
            .font
            .or(config.font)
            .unwrap_or_else(|| DEFAULT_FONT.to_string());
        let keep_dot = self.keep_dot || config.keep_dot.unwrap_or(false);

        let include_orphans = self.include_orphans || config.include_orphans.unwrap_or(false);

        Ok(Settings {
            project_path,
            output_dir,
            filter: FilterSpec::new(include, include_orphans).with_exclude(exclude),
            render: RenderConfig::new(format, font).with_keep_dot(keep_dot),
            resolve: ResolveOptions {
                dev_dependencies: self.dev_deps || config.dev_deps.unwrap_or(false),
                build_dependencies: self.build_deps || config.build_deps.unwrap_or(false),
                all_features: self.all_features || config.all_features.unwrap_or(false),
            },
        })
    }
}
