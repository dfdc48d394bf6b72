//! # objmap-registry
//!
//! Per-shape field-name translation tables for the object mapper.
//!
//! A [`MappingRegistry`] associates each target record type with a
//! [`MappingTable`] of target-field → source-field overrides. Tables can be
//! built in code or loaded from YAML/JSON through [`TableSet`].

pub mod loader;
pub mod registry;
pub mod table;

pub use loader::{Format, TableSet};
pub use registry::{Constructor, MappingRegistry, ShapeEntry};
pub use table::MappingTable;

use thiserror::Error;

/// Errors that can occur when loading mapping tables
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported table file format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type Result<T> = std::result::Result<T, Error>;
