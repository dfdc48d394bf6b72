//! Internal domain model produced by the mapper

use objmap_reflect::{ValueMap, impl_target};
use serde::Serialize;

/// Postal address
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Address {
    pub street: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}
impl_target!(Address { street, city, country });

/// Employer, kept minimal on purpose
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Company {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<Address>,
}
impl_target!(Company { id, name, address });

/// Employee with a holder for source data the model does not cover
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Employee {
    pub id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub company: Option<Company>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_fields: Option<ValueMap>,
}
impl_target!(
    Employee { id, first_name, last_name, email, company },
    extras = extra_fields
);
