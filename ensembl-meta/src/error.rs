// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for metadata resolution
//!
//! Transport failures and caller-input failures are separate variants. A
//! lookup that simply finds nothing is not an error at all; those operations
//! return `Option` instead.

use crate::source::SourceError;
use crate::types::DatabaseType;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MetadataError {
    /// The catalog listing or a meta-table query could not be executed
    #[error("Data access error: {context}: {source}")]
    DataAccess {
        context: String,
        #[source]
        source: SourceError,
    },

    #[error("Ensembl does not contain species identified by NCBI taxon ID {0}")]
    UnknownSpecies(u32),

    #[error("Release {release} of database type '{database_type}' does not exist for species identified by NCBI taxon ID {taxon_id}")]
    UnknownRelease {
        taxon_id: u32,
        release: u32,
        database_type: DatabaseType,
    },

    #[error("No '{database_type}' schema exists for release {release} of species identified by NCBI taxon ID {taxon_id}")]
    SchemaNotFound {
        taxon_id: u32,
        release: u32,
        database_type: DatabaseType,
    },

    #[error("NCBI taxon ID {taxon_id} is reported by both '{existing}' and '{incoming}'")]
    DuplicateTaxonId {
        taxon_id: u32,
        existing: String,
        incoming: String,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl MetadataError {
    /// Wrap a source failure with a description of what was being attempted
    pub fn data_access(context: impl Into<String>, source: SourceError) -> Self {
        MetadataError::DataAccess {
            context: context.into(),
            source,
        }
    }

    /// True for failures caused by caller input rather than the server
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MetadataError::UnknownSpecies(_)
                | MetadataError::UnknownRelease { .. }
                | MetadataError::SchemaNotFound { .. }
        )
    }
}

impl From<regex::Error> for MetadataError {
    fn from(err: regex::Error) -> Self {
        MetadataError::Config(format!("invalid schema name pattern: {}", err))
    }
}

impl From<serde_json::Error> for MetadataError {
    fn from(err: serde_json::Error) -> Self {
        MetadataError::Config(err.to_string())
    }
}

pub type MetadataResult<T> = Result<T, MetadataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            MetadataError::UnknownSpecies(9606).to_string(),
            "Ensembl does not contain species identified by NCBI taxon ID 9606"
        );

        let err = MetadataError::UnknownRelease {
            taxon_id: 10090,
            release: 12,
            database_type: DatabaseType::Variation,
        };
        assert_eq!(
            err.to_string(),
            "Release 12 of database type 'variation' does not exist for species identified by NCBI taxon ID 10090"
        );
    }

    #[test]
    fn test_validation_classification() {
        assert!(MetadataError::UnknownSpecies(1).is_validation());
        let transport = MetadataError::data_access(
            "listing catalogs",
            SourceError::Connection("refused".to_string()),
        );
        assert!(!transport.is_validation());
        assert!(transport.to_string().contains("listing catalogs"));
    }
}
