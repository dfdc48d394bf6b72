//! Field-name translation tables

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Target-field → source-field overrides for one target shape
///
/// Fields without an override map to the source field of the same name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappingTable {
    overrides: IndexMap<String, String>,
}

impl MappingTable {
    /// Create an empty (identity) table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an override, builder style
    #[must_use]
    pub fn with(mut self, target_field: impl Into<String>, source_field: impl Into<String>) -> Self {
        self.insert(target_field, source_field);
        self
    }

    /// Add or replace an override
    pub fn insert(&mut self, target_field: impl Into<String>, source_field: impl Into<String>) {
        self.overrides.insert(target_field.into(), source_field.into());
    }

    /// Source field name for a target field (identity when not overridden)
    pub fn lookup<'a>(&'a self, target_field: &'a str) -> &'a str {
        self.override_for(target_field).unwrap_or(target_field)
    }

    /// Explicit override for a target field, if any
    pub fn override_for(&self, target_field: &str) -> Option<&str> {
        self.overrides.get(target_field).map(String::as_str)
    }

    /// Iterate overrides in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.overrides
            .iter()
            .map(|(target, source)| (target.as_str(), source.as_str()))
    }

    /// Number of overrides
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    /// Whether the table only maps identically named fields
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MappingTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (target, source) in iter {
            table.insert(target, source);
        }
        table
    }
}
