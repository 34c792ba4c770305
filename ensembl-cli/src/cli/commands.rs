// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Command-line argument definitions

use clap::{Parser, Subcommand, ValueEnum};
use ensembl_meta::DatabaseType;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ensembl-meta")]
#[command(about = "Query Ensembl schema catalogs by NCBI taxon ID", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON configuration file; defaults apply when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog snapshot to resolve against
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log level
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List species with their taxon IDs and current release
    Species,

    /// List available releases of a species
    Releases {
        /// NCBI taxon ID
        taxon_id: u32,

        /// Database type
        #[arg(long = "type", short = 't', default_value = "core")]
        database_type: DatabaseType,
    },

    /// Show the current release of a species
    Current {
        /// NCBI taxon ID
        taxon_id: u32,
    },

    /// Show the schema name for a species and release
    Schema {
        /// NCBI taxon ID
        taxon_id: u32,

        /// Release number
        release: u32,

        /// Database type
        #[arg(long = "type", short = 't', default_value = "core")]
        database_type: DatabaseType,
    },

    /// Resolve a connection descriptor
    Describe {
        /// NCBI taxon ID
        taxon_id: u32,

        /// Release number; 0 or omitted selects the current release
        #[arg(long, short = 'r')]
        release: Option<u32>,

        /// Database type
        #[arg(long = "type", short = 't', default_value = "core")]
        database_type: DatabaseType,

        /// Describe the mart schema instead; the database type is ignored
        #[arg(long)]
        mart: bool,
    },

    /// Show entries dropped while indexing the catalog
    Warnings,

    /// Show version information
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_describe_arguments() {
        let cli = Cli::parse_from([
            "ensembl-meta",
            "--snapshot",
            "catalog.json",
            "describe",
            "9606",
            "--type",
            "variation",
            "-r",
            "47",
            "--format",
            "json",
        ]);

        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.snapshot, Some(PathBuf::from("catalog.json")));
        match cli.command {
            Commands::Describe {
                taxon_id,
                release,
                database_type,
                mart,
            } => {
                assert_eq!(taxon_id, 9606);
                assert_eq!(release, Some(47));
                assert_eq!(database_type, DatabaseType::Variation);
                assert!(!mart);
            }
            _ => panic!("expected describe"),
        }
    }

    #[test]
    fn test_unknown_database_type_is_rejected() {
        let result = Cli::try_parse_from(["ensembl-meta", "releases", "9606", "--type", "ests"]);
        assert!(result.is_err());
    }
}
