//! Configuration file support for depgraph.
//!
//! Provides YAML-based configuration through `depgraph.config.yml` files,
//! including data structures, file loading, and validation.

use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use depgraph::prelude::{DepGraphError, ImageFormat, Result};

pub const CONFIG_FILENAME: &str = "depgraph.config.yml";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub include_orphans: Option<bool>,
    /// Relative paths are taken relative to the project directory
    pub output_dir: Option<PathBuf>,
    pub font: Option<String>,
    pub format: Option<String>,
    pub dev_deps: Option<bool>,
    pub build_deps: Option<bool>,
    pub all_features: Option<bool>,
    pub keep_dot: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: BTreeMap<String, serde_yaml_ng::Value>,
}

impl ConfigFile {
    /// The configured image format, already validated on load
    pub fn image_format(&self) -> Result<Option<ImageFormat>> {
        self.format
            .as_deref()
            .map(|value| {
                ImageFormat::from_str(value).map_err(|message| {
                    anyhow::Error::from(invalid_config(format!("Invalid config: {}", message)))
                })
            })
            .transpose()
    }
}

fn invalid_config(message: String) -> DepGraphError {
    DepGraphError::Validation { message }
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        invalid_config(format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        ))
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        invalid_config(format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        ))
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Rejects blank entries in a package name list
pub fn validate_names(field: &str, names: &[String]) -> Result<()> {
    for (i, name) in names.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(invalid_config(format!(
                "Invalid package list: {}[{}] must not be empty.\n\n\
                 💡 Hint: Each entry must be a package name (e.g., \"serde\").",
                field, i
            ))
            .into());
        }
    }
    Ok(())
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(ref include) = config.include {
        validate_names("include", include)?;
    }
    if let Some(ref exclude) = config.exclude {
        validate_names("exclude", exclude)?;
    }
    if let Some(ref font) = config.font {
        if font.trim().is_empty() {
            let message = "Invalid config: font must not be empty.".to_string();
            return Err(invalid_config(message).into());
        }
    }
    config.image_format()?;
    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Merges a CLI list with a config list: CLI entries first, duplicates dropped
pub fn merge_names(cli: &[String], config: Option<&[String]>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for name in cli.iter().chain(config.unwrap_or_default()) {
        if !merged.contains(name) {
            merged.push(name.clone());
        }
    }
    merged
}
