//! Engine options and the mapper configuration file

use std::path::Path;

use objmap_registry::{Format, TableSet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Default recursion limit for nested records
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// What to do when a source field cannot be read while populating a target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadErrorPolicy {
    /// Log a warning, leave the target field at its default
    #[default]
    Skip,

    /// Fail the whole mapping
    Abort,
}

/// Engine tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapperOptions {
    /// Maximum number of nested records on the active path
    pub max_depth: usize,

    /// Handling of field-read failures during population
    pub on_read_error: ReadErrorPolicy,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            on_read_error: ReadErrorPolicy::default(),
        }
    }
}

impl MapperOptions {
    /// Check option ranges
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::Config("engine.max_depth must be at least 1".into()));
        }
        Ok(())
    }
}

/// Mapper configuration file
///
/// ```yaml
/// engine:
///   max_depth: 64
///   on_read_error: skip
/// shapes:
///   Employee:
///     email: work_email
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapperConfig {
    /// Engine options
    pub engine: MapperOptions,

    /// Translation tables keyed by target shape name
    pub shapes: TableSet,
}

impl MapperConfig {
    /// Parse and validate a YAML configuration
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("invalid YAML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| Error::Config(format!("invalid JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a `.yaml`, `.yml` or `.json` configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        debug!("Loading mapper configuration from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(objmap_registry::Error::from)?;
        match format {
            Format::Yaml => Self::from_yaml_str(&content),
            Format::Json => Self::from_json_str(&content),
        }
    }

    /// Check engine options and table contents
    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;

        for (shape, table) in self.shapes.iter() {
            if shape.trim().is_empty() {
                return Err(Error::Config("shape names must not be empty".into()));
            }
            for (target, source) in table.iter() {
                if target.is_empty() || source.is_empty() {
                    return Err(Error::Config(format!(
                        "shape '{shape}' has an empty field name in '{target}: {source}'"
                    )));
                }
            }
        }
        Ok(())
    }
}
