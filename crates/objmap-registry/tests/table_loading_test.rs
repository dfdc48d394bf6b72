//! Integration tests for loading translation tables and binding them to shapes.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use objmap_reflect::{ValueMap, impl_target};
use objmap_registry::{Error, MappingRegistry, TableSet};

static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Default)]
struct Company {
    id: Option<String>,
    name: Option<String>,
    address: Option<String>,
}
impl_target!(Company { id, name, address });

#[derive(Debug, Clone, Default)]
struct Employee {
    email: Option<String>,
    extra_fields: Option<ValueMap>,
}
impl_target!(Employee { email }, extras = extra_fields);

fn unique_temp_path(name: &str, extension: &str) -> PathBuf {
    let counter = TEMP_FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    env::temp_dir().join(format!(
        "objmap-registry-{name}-{}-{counter}.{extension}",
        std::process::id()
    ))
}

#[test]
fn test_register_from_yaml_file() -> Result<()> {
    let path = unique_temp_path("tables", "yaml");
    fs::write(
        &path,
        "Company:\n  name: legal_name\n  address: headquarters_address\n",
    )?;

    let tables = TableSet::from_path(&path)?;
    let registry = MappingRegistry::new()
        .register_from::<Company>(&tables)
        .register_from::<Employee>(&tables);

    let company = std::any::TypeId::of::<Company>();
    let employee = std::any::TypeId::of::<Employee>();
    assert_eq!(registry.lookup(company, "name"), "legal_name");
    assert_eq!(registry.lookup(company, "address"), "headquarters_address");
    assert_eq!(registry.lookup(company, "id"), "id");
    assert!(registry.is_registered(employee));
    assert!(registry.table(employee).is_some_and(|table| table.is_empty()));

    let _ = fs::remove_file(&path);
    Ok(())
}

#[test]
fn test_load_json_file() -> Result<()> {
    let path = unique_temp_path("tables", "json");
    fs::write(&path, r#"{ "Employee": { "email": "work_email" } }"#)?;

    let tables = TableSet::from_path(&path)?;
    assert_eq!(
        tables.get("Employee").map(|table| table.lookup("email")),
        Some("work_email")
    );

    let _ = fs::remove_file(&path);
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let path = unique_temp_path("missing", "yml");
    assert!(matches!(TableSet::from_path(&path), Err(Error::Io(_))));
}

#[test]
fn test_tables_round_trip_through_yaml() -> Result<()> {
    let tables = TableSet::from_yaml_str("Company:\n  name: legal_name\n")?;
    let rendered = serde_yaml::to_string(&tables)?;

    assert_eq!(TableSet::from_yaml_str(&rendered)?, tables);
    Ok(())
}
