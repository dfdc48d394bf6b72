#![deny(rust_2018_idioms)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::all)]

//! # objmap-reflect
//!
//! Field descriptors, type classification and generic values for
//! descriptor-driven object mapping.
//!
//! Types opt into mapping by implementing [`Reflect`] (scalars, collections,
//! `Option` are covered here), [`Record`] for named-field access and
//! [`Target`] for default construction and field writes. The
//! [`impl_record!`], [`impl_target!`], [`impl_enum!`] and [`impl_variant!`]
//! macros generate those implementations.

/// `Reflect` implementations for std, chrono, uuid and indexmap types.
mod impls;
/// Declarative macros generating accessor tables.
mod macros;
/// Cursor navigation over generic values.
pub mod path;
/// Descriptor traits and the optional-unwrapping step.
pub mod reflect;
/// Type descriptors and the simple/complex classifier.
pub mod types;
/// Generic JSON-shaped values.
pub mod value;

/// Cursor for navigating generic values.
pub use path::Cursor;
/// Descriptor traits and helpers used by the mapper.
pub use reflect::{
    Record, Reflect, ReflectRef, Target, assign_exact, find_field, identity, unwrap,
    visible_field_names,
};
/// Classifier entry points.
pub use types::{TypeClass, TypeInfo, TypeKind, Typed, classify};
/// Generic value primitives.
pub use value::{Value, ValueMap};

use thiserror::Error;

/// Errors that can occur when navigating generic values
#[derive(Error, Debug)]
pub enum Error {
    #[error("Value not found at path: {path}")]
    ValueNotFound { path: String },

    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
}

impl Error {
    /// Build a value-not-found error with path context.
    pub fn value_not_found(path: impl Into<String>) -> Self {
        Self::ValueNotFound { path: path.into() }
    }

    /// Build an invalid-path error with input path and parsing reason.
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Crate-local result type for value navigation.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to read a single field through [`Record::field`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Field '{field}' on {shape} is not readable: {reason}")]
    Unreadable {
        shape: &'static str,
        field: String,
        reason: String,
    },
}

impl FieldError {
    /// Build an unreadable-field error.
    pub fn unreadable(
        shape: &'static str,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Unreadable {
            shape,
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            Self::Unreadable { field, .. } => field,
        }
    }
}
