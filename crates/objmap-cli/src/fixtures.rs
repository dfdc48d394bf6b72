//! Demo source data

use chrono::DateTime;
use objmap_reflect::Value;

use crate::sdk::{
    EmployeeGroupsItem, Group, GroupType, GroupTypeEnum, RemoteData, SdkAddress, SdkCompany,
    SdkEmployee,
};

fn address(street: &str, city: &str, country: &str) -> SdkAddress {
    SdkAddress {
        street: Some(street.to_string()),
        city: Some(city.to_string()),
        country: Some(country.to_string()),
    }
}

/// SDK employee with a nested company, two addresses and mixed group entries
pub fn full_sdk_employee() -> SdkEmployee {
    let company = SdkCompany {
        id: Some("COMP-ABC".to_string()),
        legal_name: Some("Acme Corporation Intl".to_string()),
        headquarters_address: Some(address(
            "HQ 1000 Some Blvd",
            "HeadquarterCity",
            "HeadquarterLand",
        )),
    };

    let engineering = Group {
        id: Some("GRP-123".to_string()),
        name: Some("Engineering Team".to_string()),
        group_type: Some(GroupType::Known(GroupTypeEnum::Team)),
        created_at: DateTime::parse_from_rfc3339("2024-01-15T10:30:00+00:00").ok(),
        is_commonly_used_as_team: Some(true),
        remote_data: Some(vec![RemoteData {
            path: "/groups/GRP-123".to_string(),
            data: Some(Value::from("raw")),
        }]),
        ..Group::default()
    };

    SdkEmployee {
        id: Some("EMP-1".to_string()),
        first_name: Some("Jane".to_string()),
        last_name: Some("Doe".to_string()),
        work_email: Some("jane.doe@acme.com".to_string()),
        company: Some(company),
        addresses: vec![
            address("111 Merge Lane", "MergeCity", "MergeLand"),
            address("222 Another St", "SecondCity", "AnotherLand"),
        ],
        groups: Some(vec![
            Some(EmployeeGroupsItem::Group(engineering)),
            Some(EmployeeGroupsItem::Name("Ad-hoc Group".to_string())),
        ]),
    }
}
