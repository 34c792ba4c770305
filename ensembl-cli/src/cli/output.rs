// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Result formatting for CLI output

use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use ensembl_meta::{CacheStats, ConnectionDescriptor, DatabaseType, ParseWarning};
use std::collections::BTreeSet;

use super::commands::OutputFormat;

/// Result formatter for the supported output formats
pub struct ResultFormatter;

impl ResultFormatter {
    /// Species table: taxon ID, name, current release
    pub fn species(rows: &[(u32, String, u32)], format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::to_json(&serde_json::json!(rows
                .iter()
                .map(|(taxon_id, species, current)| serde_json::json!({
                    "taxon_id": taxon_id,
                    "species": species,
                    "current_release": current,
                }))
                .collect::<Vec<_>>())),
            OutputFormat::Table => {
                if rows.is_empty() {
                    return format!("{}\n", "No species found".yellow());
                }

                let mut table = Self::table(&["Taxon ID", "Species", "Current release"]);
                for (taxon_id, species, current) in rows {
                    table.add_row(vec![
                        taxon_id.to_string(),
                        species.clone(),
                        current.to_string(),
                    ]);
                }

                format!(
                    "{}\n{}\n",
                    format!("{} species", rows.len()).bold().green(),
                    table
                )
            }
        }
    }

    pub fn releases(
        taxon_id: u32,
        database_type: DatabaseType,
        releases: &BTreeSet<u32>,
        format: OutputFormat,
    ) -> String {
        match format {
            OutputFormat::Json => Self::to_json(&serde_json::json!({
                "taxon_id": taxon_id,
                "database_type": database_type,
                "releases": releases,
            })),
            OutputFormat::Table => {
                if releases.is_empty() {
                    return format!(
                        "{}\n",
                        format!("No '{}' releases for taxon {}", database_type, taxon_id)
                            .yellow()
                    );
                }

                let list = releases
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "{} {}\n",
                    format!("{} releases:", database_type).bold().green(),
                    list
                )
            }
        }
    }

    pub fn descriptor(descriptor: &ConnectionDescriptor, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => {
                let mut value = serde_json::json!(descriptor);
                if let (Some(prefix), Some(map)) =
                    (descriptor.mart_dataset_prefix(), value.as_object_mut())
                {
                    map.insert(
                        "mart_dataset_prefix".to_string(),
                        serde_json::Value::String(prefix),
                    );
                }
                Self::to_json(&value)
            }
            OutputFormat::Table => {
                let mut table = Self::table(&["Field", "Value"]);
                table.add_row(vec!["Host".to_string(), descriptor.endpoint.host.clone()]);
                table.add_row(vec!["Port".to_string(), descriptor.endpoint.port.to_string()]);
                table.add_row(vec!["Schema".to_string(), descriptor.endpoint.schema.clone()]);
                table.add_row(vec!["Species".to_string(), descriptor.species_name.clone()]);
                table.add_row(vec!["Taxon ID".to_string(), descriptor.taxon_id.to_string()]);
                table.add_row(vec!["Release".to_string(), descriptor.release.to_string()]);
                table.add_row(vec!["Kind".to_string(), descriptor.kind.to_string()]);
                if let Some(prefix) = descriptor.mart_dataset_prefix() {
                    table.add_row(vec!["Mart dataset prefix".to_string(), prefix]);
                }

                format!("{}\n{}\n", descriptor.endpoint.to_string().bold().green(), table)
            }
        }
    }

    /// Build report: cache statistics and dropped entries
    pub fn warnings(warnings: &[ParseWarning], stats: &CacheStats, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => Self::to_json(&serde_json::json!({
                "state": stats.state.to_string(),
                "schemas": stats.schema_count,
                "taxa": stats.taxon_count,
                "build_time_ms": stats.build_time.map(|d| d.as_millis() as u64),
                "populated_at": stats.populated_at.map(|t| t.to_rfc3339()),
                "warnings": warnings,
            })),
            OutputFormat::Table => {
                let mut output = String::new();
                output.push_str(&format!("{}\n", "Catalog Build".bold().green()));
                output.push_str(&format!("Schemas indexed: {}\n", stats.schema_count));
                output.push_str(&format!("Species with taxon IDs: {}\n", stats.taxon_count));
                if let Some(build_time) = stats.build_time {
                    output.push_str(&format!("Build time: {:?}\n", build_time));
                }

                if warnings.is_empty() {
                    output.push_str(&format!("{}\n", "No warnings".green()));
                    return output;
                }

                output.push_str(&format!("\n{}\n", "Warnings:".bold().yellow()));
                for (i, warning) in warnings.iter().enumerate() {
                    output.push_str(&format!("  {}. {}\n", i + 1, warning.to_string().yellow()));
                }
                output
            }
        }
    }

    fn table(headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL);
        table.set_header(
            headers
                .iter()
                .map(|h| Cell::new(h).fg(Color::Green))
                .collect::<Vec<_>>(),
        );
        table
    }

    fn to_json(value: &serde_json::Value) -> String {
        let mut json = serde_json::to_string_pretty(value).unwrap_or_else(|_| {
            "{\"status\": \"error\", \"error\": \"Could not serialize results to JSON\"}"
                .to_string()
        });
        json.push('\n');
        json
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ensembl_meta::{DatabaseKind, Endpoint};

    fn mart_descriptor() -> ConnectionDescriptor {
        ConnectionDescriptor {
            endpoint: Endpoint::new("martdb.ensembl.org", 5316, "ensembl_mart_47"),
            species_name: "homo sapiens".to_string(),
            taxon_id: 9606,
            release: 47,
            kind: DatabaseKind::Mart,
        }
    }

    #[test]
    fn test_descriptor_json_includes_mart_prefix() {
        let json = ResultFormatter::descriptor(&mart_descriptor(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["endpoint"]["schema"], "ensembl_mart_47");
        assert_eq!(value["mart_dataset_prefix"], "hsapiens");
        assert_eq!(value["kind"]["kind"], "mart");
    }

    #[test]
    fn test_releases_output() {
        let releases: BTreeSet<u32> = [46, 47].into_iter().collect();
        let json = ResultFormatter::releases(9606, DatabaseType::Core, &releases, OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["releases"], serde_json::json!([46, 47]));
        assert_eq!(value["database_type"], "core");

        colored::control::set_override(false);
        let table =
            ResultFormatter::releases(9606, DatabaseType::Core, &releases, OutputFormat::Table);
        assert_eq!(table, "core releases: 46, 47\n");
    }

    #[test]
    fn test_species_table_lists_rows() {
        let rows = vec![(9606, "homo sapiens".to_string(), 47)];
        let table = ResultFormatter::species(&rows, OutputFormat::Table);
        assert!(table.contains("homo sapiens"));
        assert!(table.contains("9606"));
    }
}
