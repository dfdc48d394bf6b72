//! Descriptor traits giving name/type/getter/setter access to mappable types

use std::any::Any;

use crate::types::TypeInfo;
use crate::value::{Value, ValueMap};
use crate::FieldError;

/// A value the mapper can inspect and copy
///
/// Implemented for scalars, `Option`, collections and string-keyed maps in
/// this crate; records get it through [`impl_record!`](crate::impl_record).
pub trait Reflect: Any {
    /// Runtime descriptor of this value's type
    fn type_info(&self) -> TypeInfo;

    /// Structural view of this value
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Owned copy, boxed for assignment into a slot of the same type
    fn clone_boxed(&self) -> Box<dyn Any>;

    /// Overwrite `self` with `value` if it holds a compatible type
    ///
    /// # Errors
    ///
    /// Hands `value` back untouched when its type does not fit this slot.
    fn assign(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>>;

    /// Build a `Self` from a boxed value
    ///
    /// Transparent wrappers override this to also accept their inner type.
    ///
    /// # Errors
    ///
    /// Hands `value` back when it cannot become a `Self`.
    fn from_boxed(value: Box<dyn Any>) -> Result<Self, Box<dyn Any>>
    where
        Self: Sized,
    {
        value.downcast::<Self>().map(|value| *value)
    }
}

/// Structural view returned by [`Reflect::reflect_ref`]
pub enum ReflectRef<'a> {
    /// Scalar, already in generic form
    Simple(Value),

    /// Optional container, `None` when empty
    Optional(Option<&'a dyn Reflect>),

    /// Ordered collection
    Sequence(Vec<&'a dyn Reflect>),

    /// String-keyed map
    Mapping(Vec<(&'a str, &'a dyn Reflect)>),

    /// Record with named fields
    Record(&'a dyn Record),
}

/// A value with named, enumerable fields
pub trait Record: Reflect {
    /// Field names in declaration order, excluding the parent's
    fn field_names(&self) -> &'static [&'static str];

    /// Read a declared field
    ///
    /// Returns `Ok(None)` when no field has this name.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError`] when the field exists but cannot be read.
    fn field(&self, name: &str) -> Result<Option<&dyn Reflect>, FieldError>;

    /// Embedded base record whose fields are visible through this one
    fn parent(&self) -> Option<&dyn Record> {
        None
    }
}

/// A record that can be default-constructed and written field by field
pub trait Target: Record {
    /// Mutable slot for a declared field
    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Reflect>;

    /// Whether this shape declares a leftover holder
    fn accepts_extra_fields(&self) -> bool {
        false
    }

    /// Store leftover data; returns false when there is no holder
    fn set_extra_fields(&mut self, _extra: ValueMap) -> bool {
        false
    }

    /// Convert into `Box<dyn Any>` for assignment into an enclosing slot
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

/// Strip optional wrappers, returning `None` when the value is absent
pub fn unwrap(value: &dyn Reflect) -> Option<&dyn Reflect> {
    let mut current = value;
    loop {
        match current.reflect_ref() {
            ReflectRef::Optional(Some(inner)) => current = inner,
            ReflectRef::Optional(None) => return None,
            _ => return Some(current),
        }
    }
}

/// Find a field on a record or any of its parents
///
/// # Errors
///
/// Propagates the read failure of the first record that declares the field.
pub fn find_field<'a>(
    record: &'a dyn Record,
    name: &str,
) -> Result<Option<&'a dyn Reflect>, FieldError> {
    let mut current = Some(record);
    while let Some(record) = current {
        if let Some(value) = record.field(name)? {
            return Ok(Some(value));
        }
        current = record.parent();
    }
    Ok(None)
}

/// All visible field names: own fields first, then each parent's
///
/// A parent field shadowed by a same-named child field is listed once.
pub fn visible_field_names(record: &dyn Record) -> Vec<&'static str> {
    let mut names: Vec<&'static str> = Vec::new();
    let mut current = Some(record);
    while let Some(record) = current {
        for &name in record.field_names() {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        current = record.parent();
    }
    names
}

/// Assignment for types that only accept their own type
///
/// # Errors
///
/// Returns `value` when it does not hold a `T`.
pub fn assign_exact<T: Any>(slot: &mut T, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
    let value = value.downcast::<T>()?;
    *slot = *value;
    Ok(())
}

/// Identity of a reflected value, used for cycle detection
pub fn identity<R: Reflect + ?Sized>(value: &R) -> (usize, std::any::TypeId) {
    let address = std::ptr::from_ref(value).cast::<()>() as usize;
    (address, value.type_info().id)
}
