// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Connection descriptors produced by the database factory

use crate::source::{CatalogSource, Endpoint, SourceConnector, SourceResult};
use crate::types::DatabaseType;
use serde::{Deserialize, Serialize};

/// What a descriptor points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "database_type", rename_all = "snake_case")]
pub enum DatabaseKind {
    /// A per-species schema of the given type
    Species(DatabaseType),
    /// The release-wide mart schema
    Mart,
}

impl std::fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatabaseKind::Species(db_type) => write!(f, "{}", db_type),
            DatabaseKind::Mart => write!(f, "mart"),
        }
    }
}

/// A validated species, release and schema, ready to be opened
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDescriptor {
    pub endpoint: Endpoint,
    pub species_name: String,
    pub taxon_id: u32,
    pub release: u32,
    pub kind: DatabaseKind,
}

impl ConnectionDescriptor {
    pub fn schema_name(&self) -> &str {
        &self.endpoint.schema
    }

    /// Open the described schema
    pub fn connect(&self, connector: &dyn SourceConnector) -> SourceResult<Box<dyn CatalogSource>> {
        log::debug!(
            "Connecting to {} for {} release {} ({})",
            self.endpoint,
            self.species_name,
            self.release,
            self.kind
        );
        connector.connect(&self.endpoint)
    }

    /// Dataset prefix of the species' mart tables; `None` for species schemas
    pub fn mart_dataset_prefix(&self) -> Option<String> {
        match self.kind {
            DatabaseKind::Mart => mart_dataset_prefix_for(&self.species_name),
            DatabaseKind::Species(_) => None,
        }
    }
}

/// Mart dataset prefix for a `"genus species"` name
///
/// The prefix is the first letter of the genus followed by the species token,
/// so `homo sapiens` becomes `hsapiens`.
pub fn mart_dataset_prefix_for(species_name: &str) -> Option<String> {
    let mut parts = species_name.split_whitespace();
    let genus = parts.next()?;
    let species = parts.next()?;
    let initial = genus.chars().next()?;

    Some(format!("{}{}", initial.to_ascii_lowercase(), species.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(kind: DatabaseKind) -> ConnectionDescriptor {
        ConnectionDescriptor {
            endpoint: Endpoint::new("martdb.ensembl.org", 5316, "ensembl_mart_47"),
            species_name: "homo sapiens".to_string(),
            taxon_id: 9606,
            release: 47,
            kind,
        }
    }

    #[test]
    fn test_mart_dataset_prefix() {
        assert_eq!(mart_dataset_prefix_for("homo sapiens").as_deref(), Some("hsapiens"));
        assert_eq!(
            mart_dataset_prefix_for("Mus  musculus").as_deref(),
            Some("mmusculus")
        );
        assert_eq!(mart_dataset_prefix_for("homo"), None);
        assert_eq!(mart_dataset_prefix_for(""), None);
    }

    #[test]
    fn test_prefix_only_for_mart_descriptors() {
        assert_eq!(
            descriptor(DatabaseKind::Mart).mart_dataset_prefix().as_deref(),
            Some("hsapiens")
        );
        assert_eq!(
            descriptor(DatabaseKind::Species(DatabaseType::Core)).mart_dataset_prefix(),
            None
        );
        assert_eq!(descriptor(DatabaseKind::Mart).schema_name(), "ensembl_mart_47");
    }

    #[test]
    fn test_kind_serialization() {
        let json = serde_json::to_string(&DatabaseKind::Species(DatabaseType::Variation)).unwrap();
        assert_eq!(json, r#"{"kind":"species","database_type":"variation"}"#);
        assert_eq!(DatabaseKind::Mart.to_string(), "mart");
    }
}
