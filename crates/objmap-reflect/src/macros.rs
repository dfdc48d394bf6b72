//! Declarative macros deriving field-accessor tables

/// Implement [`Typed`](crate::Typed), [`Reflect`](crate::Reflect) and
/// [`Record`](crate::Record) for a struct.
///
/// List the fields that should be visible to the mapper. A `parent = field`
/// suffix names an embedded record whose fields are also visible.
///
/// ```
/// use objmap_reflect::impl_record;
///
/// #[derive(Debug, Clone, Default)]
/// pub struct SdkAddress {
///     pub street: Option<String>,
///     pub city: Option<String>,
/// }
///
/// impl_record!(SdkAddress { street, city });
/// ```
#[macro_export]
macro_rules! impl_record {
    ($ty:ident { $($field:ident),* $(,)? } $(, parent = $parent:ident)?) => {
        impl $crate::Typed for $ty {
            fn descriptor() -> $crate::TypeInfo {
                $crate::TypeInfo::of::<$ty>(::std::stringify!($ty), $crate::TypeKind::Record)
            }
        }

        impl $crate::Reflect for $ty {
            fn type_info(&self) -> $crate::TypeInfo {
                <$ty as $crate::Typed>::descriptor()
            }

            fn reflect_ref(&self) -> $crate::ReflectRef<'_> {
                $crate::ReflectRef::Record(self)
            }

            fn clone_boxed(&self) -> ::std::boxed::Box<dyn ::std::any::Any> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            fn assign(
                &mut self,
                value: ::std::boxed::Box<dyn ::std::any::Any>,
            ) -> ::std::result::Result<(), ::std::boxed::Box<dyn ::std::any::Any>> {
                $crate::assign_exact(self, value)
            }
        }

        impl $crate::Record for $ty {
            fn field_names(&self) -> &'static [&'static str] {
                &[$(::std::stringify!($field)),*]
            }

            fn field(
                &self,
                name: &str,
            ) -> ::std::result::Result<
                ::std::option::Option<&dyn $crate::Reflect>,
                $crate::FieldError,
            > {
                match name {
                    $(::std::stringify!($field) => {
                        ::std::result::Result::Ok(::std::option::Option::Some(
                            &self.$field as &dyn $crate::Reflect,
                        ))
                    })*
                    _ => ::std::result::Result::Ok(::std::option::Option::None),
                }
            }

            $(
                fn parent(&self) -> ::std::option::Option<&dyn $crate::Record> {
                    ::std::option::Option::Some(&self.$parent as &dyn $crate::Record)
                }
            )?
        }
    };
}

/// Implement everything [`impl_record!`] does plus [`Target`](crate::Target).
///
/// An `extras = field` suffix names the leftover holder, which must be an
/// `Option<ValueMap>` and must not appear in the field list.
///
/// ```
/// use objmap_reflect::{impl_target, ValueMap};
///
/// #[derive(Debug, Clone, Default)]
/// pub struct Employee {
///     pub id: Option<String>,
///     pub email: Option<String>,
///     pub extra_fields: Option<ValueMap>,
/// }
///
/// impl_target!(Employee { id, email }, extras = extra_fields);
/// ```
#[macro_export]
macro_rules! impl_target {
    ($ty:ident { $($field:ident),* $(,)? } $(, extras = $extras:ident)?) => {
        $crate::impl_record!($ty { $($field),* });

        impl $crate::Target for $ty {
            fn field_mut(
                &mut self,
                name: &str,
            ) -> ::std::option::Option<&mut dyn $crate::Reflect> {
                match name {
                    $(::std::stringify!($field) => {
                        ::std::option::Option::Some(&mut self.$field as &mut dyn $crate::Reflect)
                    })*
                    _ => ::std::option::Option::None,
                }
            }

            $(
                fn accepts_extra_fields(&self) -> bool {
                    let _ = &self.$extras;
                    true
                }

                fn set_extra_fields(&mut self, extra: $crate::ValueMap) -> bool {
                    self.$extras = ::std::option::Option::Some(extra);
                    true
                }
            )?

            fn into_any(
                self: ::std::boxed::Box<Self>,
            ) -> ::std::boxed::Box<dyn ::std::any::Any> {
                self
            }
        }
    };
}

/// Implement [`Typed`](crate::Typed) and [`Reflect`](crate::Reflect) for a
/// fieldless enum, rendering each variant as its constant name.
///
/// ```
/// use objmap_reflect::impl_enum;
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// pub enum GroupTypeEnum {
///     Team,
///     Department,
/// }
///
/// impl_enum!(GroupTypeEnum { Team => "TEAM", Department => "DEPARTMENT" });
/// ```
#[macro_export]
macro_rules! impl_enum {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $crate::Typed for $ty {
            fn descriptor() -> $crate::TypeInfo {
                $crate::TypeInfo::of::<$ty>(::std::stringify!($ty), $crate::TypeKind::Enum)
            }
        }

        impl $crate::Reflect for $ty {
            fn type_info(&self) -> $crate::TypeInfo {
                <$ty as $crate::Typed>::descriptor()
            }

            fn reflect_ref(&self) -> $crate::ReflectRef<'_> {
                let name: &'static str = match self {
                    $($ty::$variant => $name,)+
                };
                $crate::ReflectRef::Simple($crate::Value::String(name.to_string()))
            }

            fn clone_boxed(&self) -> ::std::boxed::Box<dyn ::std::any::Any> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            fn assign(
                &mut self,
                value: ::std::boxed::Box<dyn ::std::any::Any>,
            ) -> ::std::result::Result<(), ::std::boxed::Box<dyn ::std::any::Any>> {
                $crate::assign_exact(self, value)
            }
        }
    };
}

/// Implement [`Typed`](crate::Typed) and [`Reflect`](crate::Reflect) for an
/// enum whose variants each hold one reflected value.
///
/// The enum reflects as whichever alternative it currently holds.
///
/// ```
/// use objmap_reflect::{impl_enum, impl_variant};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// pub enum GroupTypeEnum {
///     Team,
/// }
/// impl_enum!(GroupTypeEnum { Team => "TEAM" });
///
/// #[derive(Debug, Clone, PartialEq)]
/// pub enum GroupType {
///     Known(GroupTypeEnum),
///     Other(String),
/// }
/// impl_variant!(GroupType { Known, Other });
/// ```
#[macro_export]
macro_rules! impl_variant {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $crate::Typed for $ty {
            fn descriptor() -> $crate::TypeInfo {
                $crate::TypeInfo::of::<$ty>(::std::stringify!($ty), $crate::TypeKind::Variant)
            }
        }

        impl $crate::Reflect for $ty {
            fn type_info(&self) -> $crate::TypeInfo {
                <$ty as $crate::Typed>::descriptor()
            }

            fn reflect_ref(&self) -> $crate::ReflectRef<'_> {
                match self {
                    $($ty::$variant(held) => $crate::Reflect::reflect_ref(held),)+
                }
            }

            fn clone_boxed(&self) -> ::std::boxed::Box<dyn ::std::any::Any> {
                ::std::boxed::Box::new(::std::clone::Clone::clone(self))
            }

            fn assign(
                &mut self,
                value: ::std::boxed::Box<dyn ::std::any::Any>,
            ) -> ::std::result::Result<(), ::std::boxed::Box<dyn ::std::any::Any>> {
                $crate::assign_exact(self, value)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{Record, Reflect, ReflectRef, Target, TypeKind, Value, ValueMap};

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Status {
        Active,
        Retired,
    }
    crate::impl_enum!(Status { Active => "ACTIVE", Retired => "RETIRED" });

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Badge {
        code: Option<String>,
        level: u8,
        extra_fields: Option<ValueMap>,
    }
    crate::impl_target!(Badge { code, level }, extras = extra_fields);

    #[derive(Debug, Clone, Default)]
    struct Empty {}
    crate::impl_record!(Empty {});

    #[derive(Debug, Clone)]
    enum Holder {
        Status(Status),
        Badge(Badge),
    }
    crate::impl_variant!(Holder { Status, Badge });

    #[test]
    fn test_record_descriptor() {
        let badge = Badge::default();
        let info = badge.type_info();

        assert_eq!(info.name, "Badge");
        assert_eq!(info.kind, TypeKind::Record);
        assert_eq!(badge.field_names(), &["code", "level"]);
        assert!(badge.field("extra_fields").unwrap().is_none());
    }

    #[test]
    fn test_record_field_read() {
        let badge = Badge {
            code: Some("B-7".to_string()),
            level: 3,
            extra_fields: None,
        };

        let level = badge.field("level").unwrap().unwrap();
        assert!(matches!(level.reflect_ref(), ReflectRef::Simple(Value::Integer(3))));
    }

    #[test]
    fn test_target_field_write() {
        let mut badge = Badge::default();

        let slot = badge.field_mut("code").unwrap();
        assert!(slot.assign(Box::new("B-9".to_string())).is_ok());
        assert!(badge.field_mut("missing").is_none());
        assert_eq!(badge.code.as_deref(), Some("B-9"));
    }

    #[test]
    fn test_target_extra_fields() {
        let mut badge = Badge::default();
        let mut extra = ValueMap::new();
        extra.insert("issuer".to_string(), Value::from("HR"));

        assert!(badge.accepts_extra_fields());
        assert!(badge.set_extra_fields(extra));
        assert_eq!(
            badge.extra_fields.unwrap().get("issuer"),
            Some(&Value::from("HR"))
        );
    }

    #[test]
    fn test_boxed_target_downcasts() {
        let boxed: Box<dyn Target> = Box::new(Badge {
            level: 1,
            ..Badge::default()
        });
        let badge = boxed.into_any().downcast::<Badge>().unwrap();
        assert_eq!(badge.level, 1);
    }

    #[test]
    fn test_enum_renders_constant_name() {
        let status = Status::Retired;

        assert_eq!(status.type_info().kind, TypeKind::Enum);
        assert!(status.type_info().is_simple());
        assert!(matches!(
            status.reflect_ref(),
            ReflectRef::Simple(Value::String(ref name)) if name == "RETIRED"
        ));
        assert_ne!(Status::Active, status);
    }

    #[test]
    fn test_variant_reflects_held_alternative() {
        let status = Holder::Status(Status::Active);
        let badge = Holder::Badge(Badge {
            level: 2,
            ..Badge::default()
        });

        assert_eq!(status.type_info().kind, TypeKind::Variant);
        assert!(status.type_info().is_complex());
        assert!(matches!(
            status.reflect_ref(),
            ReflectRef::Simple(Value::String(ref name)) if name == "ACTIVE"
        ));
        match badge.reflect_ref() {
            ReflectRef::Record(record) => assert_eq!(record.field_names(), &["code", "level"]),
            _ => panic!("expected the held record"),
        }
    }

    #[test]
    fn test_empty_record() {
        let empty = Empty {};
        assert!(empty.field_names().is_empty());
        assert!(empty.field("anything").unwrap().is_none());
    }
}
