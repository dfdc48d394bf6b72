//! `Reflect` implementations for standard library and ecosystem types

use std::any::{Any, type_name};
use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use indexmap::IndexMap;
use uuid::Uuid;

use crate::reflect::{Reflect, ReflectRef, assign_exact};
use crate::types::{TypeInfo, TypeKind, Typed};
use crate::value::Value;

macro_rules! impl_scalar {
    ($kind:ident => $($ty:ty),+ ; |$v:ident| $to_value:expr) => {
        $(
            impl Typed for $ty {
                fn descriptor() -> TypeInfo {
                    TypeInfo::of::<$ty>(type_name::<$ty>(), TypeKind::$kind)
                }
            }

            impl Reflect for $ty {
                fn type_info(&self) -> TypeInfo {
                    <$ty as Typed>::descriptor()
                }

                fn reflect_ref(&self) -> ReflectRef<'_> {
                    let $v = self;
                    ReflectRef::Simple($to_value)
                }

                fn clone_boxed(&self) -> Box<dyn Any> {
                    Box::new(self.clone())
                }

                fn assign(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
                    assign_exact(self, value)
                }
            }
        )+
    };
}

impl_scalar!(Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize;
    |v| i64::try_from(*v).map_or_else(|_| Value::String(v.to_string()), Value::Integer));
impl_scalar!(Float => f32, f64; |v| Value::Decimal(f64::from(*v)));
impl_scalar!(Boolean => bool; |v| Value::Bool(*v));
impl_scalar!(Char => char; |v| Value::String(v.to_string()));
impl_scalar!(Text => String; |v| Value::String(v.clone()));
impl_scalar!(Temporal => DateTime<Utc>, DateTime<FixedOffset>; |v| Value::String(v.to_rfc3339()));
impl_scalar!(Temporal => NaiveDate, NaiveTime; |v| Value::String(v.to_string()));
impl_scalar!(Temporal => NaiveDateTime; |v| Value::String(v.format("%Y-%m-%dT%H:%M:%S%.f").to_string()));
impl_scalar!(Uuid => Uuid; |v| Value::String(v.hyphenated().to_string()));

impl<T: Typed + Reflect + Clone> Typed for Option<T> {
    fn descriptor() -> TypeInfo {
        T::descriptor().into_optional()
    }
}

impl<T: Typed + Reflect + Clone> Reflect for Option<T> {
    fn type_info(&self) -> TypeInfo {
        <Self as Typed>::descriptor()
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Optional(self.as_ref().map(|inner| inner as &dyn Reflect))
    }

    fn clone_boxed(&self) -> Box<dyn Any> {
        Box::new(self.clone())
    }

    fn assign(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        match T::from_boxed(value) {
            Ok(inner) => {
                *self = Some(inner);
                Ok(())
            }
            Err(other) => assign_exact(self, other),
        }
    }
}

// Boxes are transparent so recursive shapes can be declared.
impl<T: Typed + Reflect + Clone> Typed for Box<T> {
    fn descriptor() -> TypeInfo {
        T::descriptor()
    }
}

impl<T: Typed + Reflect + Clone> Reflect for Box<T> {
    fn type_info(&self) -> TypeInfo {
        <Self as Typed>::descriptor()
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        (**self).reflect_ref()
    }

    fn clone_boxed(&self) -> Box<dyn Any> {
        (**self).clone_boxed()
    }

    fn assign(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        *self = Self::from_boxed(value)?;
        Ok(())
    }

    fn from_boxed(value: Box<dyn Any>) -> Result<Self, Box<dyn Any>> {
        match value.downcast::<Self>() {
            Ok(boxed) => Ok(*boxed),
            Err(other) => T::from_boxed(other).map(Box::new),
        }
    }
}

impl<T: Reflect + Clone> Typed for Vec<T> {
    fn descriptor() -> TypeInfo {
        TypeInfo::of::<Self>(type_name::<Self>(), TypeKind::Sequence)
    }
}

impl<T: Reflect + Clone> Reflect for Vec<T> {
    fn type_info(&self) -> TypeInfo {
        <Self as Typed>::descriptor()
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Sequence(self.iter().map(|item| item as &dyn Reflect).collect())
    }

    fn clone_boxed(&self) -> Box<dyn Any> {
        Box::new(self.clone())
    }

    fn assign(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        assign_exact(self, value)
    }
}

macro_rules! impl_string_map {
    ($map:ident, |$entries:ident| $order:expr) => {
        impl<T: Reflect + Clone> Typed for $map<String, T> {
            fn descriptor() -> TypeInfo {
                TypeInfo::of::<Self>(type_name::<Self>(), TypeKind::Mapping)
            }
        }

        impl<T: Reflect + Clone> Reflect for $map<String, T> {
            fn type_info(&self) -> TypeInfo {
                <Self as Typed>::descriptor()
            }

            fn reflect_ref(&self) -> ReflectRef<'_> {
                #[allow(unused_mut)]
                let mut $entries: Vec<(&str, &dyn Reflect)> = self
                    .iter()
                    .map(|(key, value)| (key.as_str(), value as &dyn Reflect))
                    .collect();
                $order;
                ReflectRef::Mapping($entries)
            }

            fn clone_boxed(&self) -> Box<dyn Any> {
                Box::new(self.clone())
            }

            fn assign(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
                assign_exact(self, value)
            }
        }
    };
}

impl_string_map!(BTreeMap, |entries| ());
impl_string_map!(IndexMap, |entries| ());
// Hash order is arbitrary; sort so leftover output is stable.
impl_string_map!(HashMap, |entries| entries.sort_by(|a, b| a.0.cmp(b.0)));

impl Typed for Value {
    fn descriptor() -> TypeInfo {
        TypeInfo::of::<Value>("Value", TypeKind::Variant)
    }
}

impl Reflect for Value {
    fn type_info(&self) -> TypeInfo {
        <Self as Typed>::descriptor()
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        match self {
            Value::Null => ReflectRef::Optional(None),
            Value::List(items) => {
                ReflectRef::Sequence(items.iter().map(|item| item as &dyn Reflect).collect())
            }
            Value::Map(map) => ReflectRef::Mapping(
                map.iter()
                    .map(|(key, value)| (key.as_str(), value as &dyn Reflect))
                    .collect(),
            ),
            scalar => ReflectRef::Simple(scalar.clone()),
        }
    }

    fn clone_boxed(&self) -> Box<dyn Any> {
        Box::new(self.clone())
    }

    fn assign(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        assign_exact(self, value)
    }
}
