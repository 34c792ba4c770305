// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for Ensembl Meta

use colored::Colorize;
use std::path::PathBuf;

use super::commands::OutputFormat;
use super::output::ResultFormatter;
use ensembl_meta::source::load_snapshot_source;
use ensembl_meta::{DatabaseFactory, DatabaseType, EnsemblConfig};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Build a factory from the optional config file and the catalog snapshot
fn open_factory(
    config: Option<PathBuf>,
    snapshot: Option<PathBuf>,
) -> Result<DatabaseFactory, Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => EnsemblConfig::from_json_file(&path)?,
        None => EnsemblConfig::default(),
    };

    let snapshot = snapshot.ok_or("no catalog source given; pass --snapshot <file>")?;
    let source = load_snapshot_source(&snapshot)
        .map_err(|e| format!("Failed to load snapshot {:?}: {}", snapshot, e))?;
    log::info!("Resolving against snapshot {:?}", snapshot);

    Ok(DatabaseFactory::new(config, Box::new(source))?)
}

/// Handle the species command
pub fn handle_species(
    config: Option<PathBuf>,
    snapshot: Option<PathBuf>,
    format: OutputFormat,
) -> CliResult {
    let factory = open_factory(config, snapshot)?;
    let resolver = factory.resolver();

    let mut rows = Vec::new();
    for (taxon_id, species) in resolver.taxon_map()? {
        let current = resolver.current_release(taxon_id)?;
        rows.push((taxon_id, species, current));
    }

    print!("{}", ResultFormatter::species(&rows, format));
    Ok(())
}

/// Handle the releases command
pub fn handle_releases(
    config: Option<PathBuf>,
    snapshot: Option<PathBuf>,
    format: OutputFormat,
    taxon_id: u32,
    database_type: DatabaseType,
) -> CliResult {
    let factory = open_factory(config, snapshot)?;
    let releases = factory
        .resolver()
        .release_versions(taxon_id, database_type)?;

    print!(
        "{}",
        ResultFormatter::releases(taxon_id, database_type, &releases, format)
    );
    Ok(())
}

/// Handle the current command
pub fn handle_current(
    config: Option<PathBuf>,
    snapshot: Option<PathBuf>,
    format: OutputFormat,
    taxon_id: u32,
) -> CliResult {
    let factory = open_factory(config, snapshot)?;
    let release = factory.resolver().current_release(taxon_id)?;

    match format {
        OutputFormat::Table => println!("{}", release),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({ "taxon_id": taxon_id, "current_release": release })
        ),
    }
    Ok(())
}

/// Handle the schema command
pub fn handle_schema(
    config: Option<PathBuf>,
    snapshot: Option<PathBuf>,
    format: OutputFormat,
    taxon_id: u32,
    release: u32,
    database_type: DatabaseType,
) -> CliResult {
    let factory = open_factory(config, snapshot)?;
    let schema = factory
        .resolver()
        .schema_name(taxon_id, release, database_type)?;

    match (format, schema) {
        (OutputFormat::Json, schema) => println!(
            "{}",
            serde_json::json!({
                "taxon_id": taxon_id,
                "release": release,
                "database_type": database_type,
                "schema_name": schema,
            })
        ),
        (OutputFormat::Table, Some(schema)) => println!("{}", schema),
        (OutputFormat::Table, None) => println!(
            "{}",
            format!(
                "No '{}' schema for release {} of taxon {}",
                database_type, release, taxon_id
            )
            .yellow()
        ),
    }
    Ok(())
}

/// Handle the describe command
pub fn handle_describe(
    config: Option<PathBuf>,
    snapshot: Option<PathBuf>,
    format: OutputFormat,
    taxon_id: u32,
    release: Option<u32>,
    database_type: DatabaseType,
    mart: bool,
) -> CliResult {
    let factory = open_factory(config, snapshot)?;

    let descriptor = if mart {
        factory.create_mart_database(taxon_id, release)?
    } else {
        factory.create_database(taxon_id, release.unwrap_or(0), database_type)?
    };

    print!("{}", ResultFormatter::descriptor(&descriptor, format));
    Ok(())
}

/// Handle the warnings command
pub fn handle_warnings(
    config: Option<PathBuf>,
    snapshot: Option<PathBuf>,
    format: OutputFormat,
) -> CliResult {
    let factory = open_factory(config, snapshot)?;
    let warnings = factory.resolver().build_warnings()?;
    let stats = factory.resolver().cache_stats();

    print!("{}", ResultFormatter::warnings(&warnings, &stats, format));
    Ok(())
}
