// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Resolver configuration
//!
//! All settings travel in one [`EnsemblConfig`] value handed to the factory at
//! construction time. Nothing is read from process-wide state.

use crate::error::{MetadataError, MetadataResult};
use crate::types::DatabaseType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placeholder replaced by the database type token in the schema pattern
pub const TYPE_PLACEHOLDER: &str = "{type}";

/// Default pattern: genus, species, release, remaining suffix
pub const DEFAULT_SCHEMA_NAME_PATTERN: &str = r"^(.*?)_(.*?)_{type}_(\d{2,})_(.*)$";

/// Top-level resolver configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsemblConfig {
    /// Server publishing the species schemas
    pub server: ServerConfig,

    /// Server publishing the mart schemas
    pub mart: MartConfig,

    /// Database types indexed during population
    pub database_types: Vec<DatabaseType>,

    /// Regex matched against catalog names, with a `{type}` placeholder
    pub schema_name_pattern: String,

    /// What to do when two species report the same taxon identifier
    pub duplicate_taxon_policy: DuplicateTaxonPolicy,
}

/// Metadata server location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Schema used for the initial metadata connection
    pub default_schema: String,
}

/// Mart server location and naming
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MartConfig {
    pub host: String,
    pub port: u16,
    /// Mart schemas are named `<schema_prefix>_<release>`
    pub schema_prefix: String,
}

/// Handling of taxon identifiers reported by more than one species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateTaxonPolicy {
    /// Keep the species seen last (species are visited in name order) and log a warning
    LastWriteWins,
    /// Abort population with an error
    Reject,
}

impl Default for DuplicateTaxonPolicy {
    fn default() -> Self {
        DuplicateTaxonPolicy::LastWriteWins
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "ensembldb.ensembl.org".to_string(),
            port: 3306,
            default_schema: "information_schema".to_string(),
        }
    }
}

impl Default for MartConfig {
    fn default() -> Self {
        Self {
            host: "martdb.ensembl.org".to_string(),
            port: 5316,
            schema_prefix: "ensembl_mart".to_string(),
        }
    }
}

impl Default for EnsemblConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            mart: MartConfig::default(),
            database_types: DatabaseType::all(),
            schema_name_pattern: DEFAULT_SCHEMA_NAME_PATTERN.to_string(),
            duplicate_taxon_policy: DuplicateTaxonPolicy::default(),
        }
    }
}

impl EnsemblConfig {
    /// Configuration pointing at a specific metadata server, other settings default
    pub fn for_server(host: impl Into<String>, port: u16) -> Self {
        Self {
            server: ServerConfig {
                host: host.into(),
                port,
                ..ServerConfig::default()
            },
            ..Self::default()
        }
    }

    /// Load and validate a JSON configuration file
    ///
    /// Missing sections fall back to their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> MetadataResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            MetadataError::Config(format!("Failed to read config {:?}: {}", path, e))
        })?;
        let config: EnsemblConfig = serde_json::from_str(&contents)
            .map_err(|e| MetadataError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> MetadataResult<()> {
        if self.server.host.trim().is_empty() {
            return Err(MetadataError::Config("server host must not be empty".to_string()));
        }
        if self.server.port == 0 || self.mart.port == 0 {
            return Err(MetadataError::Config("ports must be > 0".to_string()));
        }
        if self.mart.schema_prefix.trim().is_empty() {
            return Err(MetadataError::Config(
                "mart schema prefix must not be empty".to_string(),
            ));
        }

        // Taxon identifiers are read from core schemas only
        if !self.database_types.contains(&DatabaseType::Core) {
            return Err(MetadataError::Config(
                "database types must include 'core'".to_string(),
            ));
        }

        if !self.schema_name_pattern.contains(TYPE_PLACEHOLDER) {
            return Err(MetadataError::Config(format!(
                "schema name pattern must contain the {} placeholder",
                TYPE_PLACEHOLDER
            )));
        }

        let probe = regex::Regex::new(
            &self
                .schema_name_pattern
                .replace(TYPE_PLACEHOLDER, DatabaseType::Core.schema_token()),
        )?;
        // captures_len counts the implicit whole-match group
        if probe.captures_len() != 5 {
            return Err(MetadataError::Config(format!(
                "schema name pattern must have exactly 4 capture groups, found {}",
                probe.captures_len() - 1
            )));
        }

        Ok(())
    }
}
