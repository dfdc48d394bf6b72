//! Loading translation tables from configuration files

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::table::MappingTable;
use crate::{Error, Result};

/// Translation tables keyed by target shape name
///
/// ```yaml
/// Employee:
///   email: work_email
/// Company:
///   name: legal_name
///   address: headquarters_address
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableSet {
    tables: IndexMap<String, MappingTable>,
}

/// File formats accepted by [`TableSet::from_path`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Pick a format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            other => Err(Error::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

impl TableSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a table for a shape, builder style
    #[must_use]
    pub fn with(mut self, shape: impl Into<String>, table: MappingTable) -> Self {
        self.insert(shape, table);
        self
    }

    /// Add or replace a table
    pub fn insert(&mut self, shape: impl Into<String>, table: MappingTable) {
        self.tables.insert(shape.into(), table);
    }

    /// Table for a shape name
    pub fn get(&self, shape: &str) -> Option<&MappingTable> {
        self.tables.get(shape)
    }

    /// Iterate tables in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MappingTable)> {
        self.tables.iter().map(|(shape, table)| (shape.as_str(), table))
    }

    /// Number of tables
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Whether the set has no tables
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Parse tables from YAML
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Parse tables from JSON
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }

    /// Load tables from a `.yaml`, `.yml` or `.json` file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        debug!("Loading mapping tables from {}", path.display());

        let content = std::fs::read_to_string(path)?;
        let tables = match format {
            Format::Yaml => Self::from_yaml_str(&content)?,
            Format::Json => Self::from_json_str(&content)?,
        };

        info!(
            "Loaded {} mapping table(s) from {}",
            tables.len(),
            path.display()
        );
        Ok(tables)
    }

    /// Merge another set into this one; tables in `other` win
    pub fn merge(&mut self, other: TableSet) {
        for (shape, table) in other.tables {
            self.tables.insert(shape, table);
        }
    }
}
