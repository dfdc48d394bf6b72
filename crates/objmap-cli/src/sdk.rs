//! Third-party HR SDK shapes used as mapping sources

use std::any::Any;

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use objmap_reflect::{
    FieldError, Record, Reflect, ReflectRef, TypeInfo, TypeKind, Typed, Value, assign_exact,
    impl_enum, impl_record, impl_variant,
};

#[derive(Debug, Clone, Default)]
pub struct SdkAddress {
    pub street: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}
impl_record!(SdkAddress { street, city, country });

#[derive(Debug, Clone, Default)]
pub struct SdkCompany {
    pub id: Option<String>,
    pub legal_name: Option<String>,
    pub headquarters_address: Option<SdkAddress>,
}
impl_record!(SdkCompany { id, legal_name, headquarters_address });

#[derive(Debug, Clone, Default)]
pub struct SdkEmployee {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub work_email: Option<String>,
    pub company: Option<SdkCompany>,
    pub addresses: Vec<SdkAddress>,
    pub groups: Option<Vec<Option<EmployeeGroupsItem>>>,
}
impl_record!(SdkEmployee {
    id,
    first_name,
    last_name,
    work_email,
    company,
    addresses,
    groups,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupTypeEnum {
    Team,
    Department,
    CostCenter,
    BusinessUnit,
    Group,
}
impl_enum!(GroupTypeEnum {
    Team => "TEAM",
    Department => "DEPARTMENT",
    CostCenter => "COST_CENTER",
    BusinessUnit => "BUSINESS_UNIT",
    Group => "GROUP",
});

/// Group type: a known constant or a raw string the SDK did not recognise
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupType {
    Known(GroupTypeEnum),
    Other(String),
}
impl_variant!(GroupType { Known, Other });

/// Raw payload fetched from the upstream system
#[derive(Debug, Clone, Default)]
pub struct RemoteData {
    pub path: String,
    pub data: Option<Value>,
}
impl_record!(RemoteData { path, data });

/// HR group; every field is optional
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub id: Option<String>,
    pub remote_id: Option<String>,
    pub created_at: Option<DateTime<FixedOffset>>,
    pub modified_at: Option<DateTime<FixedOffset>>,
    pub parent_group: Option<String>,
    pub name: Option<String>,
    pub group_type: Option<GroupType>,
    pub remote_was_deleted: Option<bool>,
    pub is_commonly_used_as_team: Option<bool>,
    pub field_mappings: Option<IndexMap<String, Value>>,
    pub remote_data: Option<Vec<RemoteData>>,
}

// Written out by hand so `group_type` is exposed under its wire name `type`.
impl Typed for Group {
    fn descriptor() -> TypeInfo {
        TypeInfo::of::<Group>("Group", TypeKind::Record)
    }
}

impl Reflect for Group {
    fn type_info(&self) -> TypeInfo {
        Self::descriptor()
    }

    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Record(self)
    }

    fn clone_boxed(&self) -> Box<dyn Any> {
        Box::new(self.clone())
    }

    fn assign(&mut self, value: Box<dyn Any>) -> Result<(), Box<dyn Any>> {
        assign_exact(self, value)
    }
}

impl Record for Group {
    fn field_names(&self) -> &'static [&'static str] {
        &[
            "id",
            "remote_id",
            "created_at",
            "modified_at",
            "parent_group",
            "name",
            "type",
            "remote_was_deleted",
            "is_commonly_used_as_team",
            "field_mappings",
            "remote_data",
        ]
    }

    fn field(&self, name: &str) -> Result<Option<&dyn Reflect>, FieldError> {
        let field: &dyn Reflect = match name {
            "id" => &self.id,
            "remote_id" => &self.remote_id,
            "created_at" => &self.created_at,
            "modified_at" => &self.modified_at,
            "parent_group" => &self.parent_group,
            "name" => &self.name,
            "type" => &self.group_type,
            "remote_was_deleted" => &self.remote_was_deleted,
            "is_commonly_used_as_team" => &self.is_commonly_used_as_team,
            "field_mappings" => &self.field_mappings,
            "remote_data" => &self.remote_data,
            _ => return Ok(None),
        };
        Ok(Some(field))
    }
}

/// Group membership entry: a full group or just its name
#[derive(Debug, Clone)]
pub enum EmployeeGroupsItem {
    Group(Group),
    Name(String),
}
impl_variant!(EmployeeGroupsItem { Group, Name });
