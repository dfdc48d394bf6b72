//! Runtime type descriptors and the simple/complex classifier

use std::any::{Any, TypeId};

/// Structural kind of a reflected type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Signed or unsigned integer
    Integer,

    /// Floating point number
    Float,

    /// Boolean flag
    Boolean,

    /// Single character
    Char,

    /// Text string
    Text,

    /// Date, time or timestamp
    Temporal,

    /// Universally unique identifier
    Uuid,

    /// Enumerated constant
    Enum,

    /// Ordered collection
    Sequence,

    /// String-keyed map
    Mapping,

    /// Record with named fields
    Record,

    /// Sum type whose shape depends on the held alternative
    Variant,
}

/// Outcome of classifying a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeClass {
    /// Copied by value, never introspected
    Simple,

    /// Introspected field by field or mapped recursively
    Complex,
}

/// Runtime descriptor of a reflected type
///
/// `Option<T>` is transparent: it describes `T` with `optional` set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeInfo {
    /// Type identity
    pub id: TypeId,

    /// Display name (short for records, full path otherwise)
    pub name: &'static str,

    /// Structural kind
    pub kind: TypeKind,

    /// Whether the declaration is wrapped in `Option`
    pub optional: bool,
}

/// Types with a statically known descriptor
pub trait Typed: Any {
    /// Descriptor for `Self`
    fn descriptor() -> TypeInfo;
}

/// Classify a type as simple or complex
pub fn classify(info: &TypeInfo) -> TypeClass {
    TypeClass::of(info.kind)
}

impl TypeClass {
    /// Classification rule for a kind
    pub fn of(kind: TypeKind) -> Self {
        match kind {
            TypeKind::Integer
            | TypeKind::Float
            | TypeKind::Boolean
            | TypeKind::Char
            | TypeKind::Text
            | TypeKind::Temporal
            | TypeKind::Uuid
            | TypeKind::Enum => TypeClass::Simple,
            TypeKind::Sequence | TypeKind::Mapping | TypeKind::Record | TypeKind::Variant => {
                TypeClass::Complex
            }
        }
    }
}

impl TypeInfo {
    /// Descriptor for `T` with an explicit name and kind
    #[must_use]
    pub fn of<T: Any>(name: &'static str, kind: TypeKind) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name,
            kind,
            optional: false,
        }
    }

    /// Same descriptor marked as optional
    #[must_use]
    pub fn into_optional(self) -> Self {
        Self {
            optional: true,
            ..self
        }
    }

    /// Whether this type copies by value
    pub fn is_simple(&self) -> bool {
        classify(self) == TypeClass::Simple
    }

    /// Whether this type needs introspection
    pub fn is_complex(&self) -> bool {
        !self.is_simple()
    }

    /// Last path segment of the name, e.g. `String` for `alloc::string::String`
    pub fn short_name(&self) -> &'static str {
        let head = self.name.split('<').next().unwrap_or(self.name);
        head.rsplit("::").next().unwrap_or(head)
    }
}
