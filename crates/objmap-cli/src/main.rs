//! # objmap-cli
//!
//! Command-line front end for the object mapper.
//!
//! Maps the demo SDK employee onto the domain model and prints the result as
//! JSON, or prints the effective mapping tables.

mod domain;
mod fixtures;
mod sdk;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use objmap_mapping::{Mapper, MapperConfig};
use objmap_reflect::{Cursor, Value};
use objmap_registry::{MappingRegistry, TableSet};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::domain::{Address, Company, Employee};

const DEFAULT_CONFIG: &str = include_str!("../config/mapper.yaml");

#[derive(Parser)]
#[command(name = "objmap")]
#[command(about = "Descriptor-driven object mapper")]
#[command(version)]
struct Cli {
    /// Path to a mapper configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map the demo SDK employee onto the domain Employee
    Transform {
        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit single-line JSON
        #[arg(long)]
        compact: bool,

        /// Print only the value at this path, e.g. `extra_fields/addresses[0]/city`
        #[arg(short, long)]
        select: Option<String>,
    },

    /// Print the effective engine options and mapping tables
    Registry,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let registry = build_registry(&config.shapes);

    match cli.command {
        Commands::Transform {
            output,
            compact,
            select,
        } => {
            let mapper = Mapper::new(Arc::new(registry)).with_options(config.engine)?;
            let json = transform(&mapper, compact, select.as_deref())?;
            write_output(output.as_deref(), &json)
        }
        Commands::Registry => {
            let effective = MapperConfig {
                engine: config.engine,
                shapes: effective_tables(&registry),
            };
            print!("{}", serde_yaml::to_string(&effective)?);
            Ok(())
        }
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<MapperConfig> {
    match path {
        Some(path) => {
            info!("Using configuration: {}", path.display());
            MapperConfig::from_path(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))
        }
        None => MapperConfig::from_yaml_str(DEFAULT_CONFIG)
            .context("built-in configuration is invalid"),
    }
}

/// Register the domain shapes with the tables named after them
fn build_registry(tables: &TableSet) -> MappingRegistry {
    let registry = MappingRegistry::new()
        .register_from::<Employee>(tables)
        .register_from::<Company>(tables)
        .register_from::<Address>(tables);

    for (shape, _) in tables.iter() {
        if registry.entry_by_name(shape).is_none() {
            warn!("No target shape named '{}', table ignored", shape);
        }
    }
    registry
}

fn effective_tables(registry: &MappingRegistry) -> TableSet {
    registry.shapes().fold(TableSet::new(), |tables, entry| {
        tables.with(entry.info.name, entry.table.clone())
    })
}

fn transform(mapper: &Mapper, compact: bool, select: Option<&str>) -> Result<String> {
    let source = fixtures::full_sdk_employee();
    let employee = mapper
        .try_map::<Employee>(&source)?
        .context("mapping produced no employee")?;

    // Employee holds only strings and generic values, so this conversion is exact.
    let document: Value = serde_json::from_value(serde_json::to_value(&employee)?)?;
    let selected = match select {
        Some(path) => Cursor::new(&document).navigate(path)?.value(),
        None => &document,
    };

    let json = if compact {
        serde_json::to_string(selected)?
    } else {
        serde_json::to_string_pretty(selected)?
    };
    Ok(json)
}

fn write_output(path: Option<&Path>, json: &str) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}
