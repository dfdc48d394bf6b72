//! Mapping registry keyed by target shape

use std::any::TypeId;

use indexmap::IndexMap;
use objmap_reflect::{Target, TypeInfo, Typed};
use tracing::debug;

use crate::loader::TableSet;
use crate::table::MappingTable;

/// Constructor for a default instance of a registered shape
pub type Constructor = fn() -> Box<dyn Target>;

/// A registered target shape
#[derive(Debug, Clone)]
pub struct ShapeEntry {
    /// Descriptor of the target type
    pub info: TypeInfo,

    /// Field-name overrides
    pub table: MappingTable,

    /// Builds a default instance for nested mapping
    pub construct: Constructor,
}

/// Registry of target shapes and their translation tables
///
/// Populated once during startup and read-only afterwards; share it behind
/// an `Arc` across threads.
#[derive(Debug, Clone, Default)]
pub struct MappingRegistry {
    shapes: IndexMap<TypeId, ShapeEntry>,
}

fn construct<T: Target + Default>() -> Box<dyn Target> {
    Box::new(T::default())
}

impl MappingRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a target shape, builder style
    ///
    /// A second registration for the same shape replaces the first.
    #[must_use]
    pub fn register<T: Target + Typed + Default>(mut self, table: MappingTable) -> Self {
        self.insert::<T>(table);
        self
    }

    /// Register a target shape
    pub fn insert<T: Target + Typed + Default>(&mut self, table: MappingTable) {
        let info = T::descriptor();
        debug!(shape = info.name, overrides = table.len(), "Registering mapping");
        let previous = self.shapes.insert(
            info.id,
            ShapeEntry {
                info,
                table,
                construct: construct::<T>,
            },
        );
        if previous.is_some() {
            debug!(shape = info.name, "Replaced existing mapping");
        }
    }

    /// Register a target shape using the table named after it in `tables`
    ///
    /// Shapes without a table are registered with identity mapping.
    #[must_use]
    pub fn register_from<T: Target + Typed + Default>(self, tables: &TableSet) -> Self {
        let table = tables.get(T::descriptor().name).cloned().unwrap_or_default();
        self.register::<T>(table)
    }

    /// Source field name for a target field of a shape
    pub fn lookup<'a>(&'a self, shape: TypeId, target_field: &'a str) -> &'a str {
        match self.shapes.get(&shape) {
            Some(entry) => entry.table.lookup(target_field),
            None => target_field,
        }
    }

    /// Whether a shape is registered
    pub fn is_registered(&self, shape: TypeId) -> bool {
        self.shapes.contains_key(&shape)
    }

    /// Registered entry for a shape
    pub fn entry(&self, shape: TypeId) -> Option<&ShapeEntry> {
        self.shapes.get(&shape)
    }

    /// Translation table for a shape
    pub fn table(&self, shape: TypeId) -> Option<&MappingTable> {
        self.entry(shape).map(|entry| &entry.table)
    }

    /// Registered entry looked up by shape name
    pub fn entry_by_name(&self, name: &str) -> Option<&ShapeEntry> {
        self.shapes.values().find(|entry| entry.info.name == name)
    }

    /// Registered shapes in registration order
    pub fn shapes(&self) -> impl Iterator<Item = &ShapeEntry> {
        self.shapes.values()
    }

    /// Number of registered shapes
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether no shape is registered
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
