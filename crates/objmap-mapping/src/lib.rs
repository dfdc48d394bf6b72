//! # objmap-mapping
//!
//! Mapping engine for descriptor-driven object transformation.
//!
//! [`Mapper`] populates a target record from any source record by matching
//! field names, optionally renamed through the registry's translation
//! tables. Nested registered shapes are mapped recursively and source fields
//! the target never consumed are preserved in the target's leftover holder.

pub mod config;
pub mod engine;
pub mod guard;
pub mod leftovers;

pub use config::{DEFAULT_MAX_DEPTH, MapperConfig, MapperOptions, ReadErrorPolicy};
pub use engine::Mapper;
pub use guard::TraversalGuard;
pub use leftovers::{
    CYCLIC_REFERENCE, ERROR_READING_FIELD, MAX_DEPTH_EXCEEDED, capture_leftovers, is_claimed,
    to_generic,
};

use objmap_reflect::FieldError;
use thiserror::Error;

/// Errors that can occur during mapping
#[derive(Error, Debug)]
pub enum Error {
    #[error("Field read failed: {0}")]
    FieldRead(#[from] FieldError),

    #[error("Cyclic reference to {shape}")]
    CycleDetected { shape: &'static str },

    #[error("Maximum depth {max_depth} exceeded at {shape}")]
    DepthExceeded {
        shape: &'static str,
        max_depth: usize,
    },

    #[error("Unsupported source type {0}: expected a record")]
    UnsupportedSource(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Registry error: {0}")]
    Registry(#[from] objmap_registry::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
