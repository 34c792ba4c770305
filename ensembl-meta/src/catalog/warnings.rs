// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Non-fatal anomalies found while building the index
//!
//! A warning means one catalog entry or one taxon value was dropped. The
//! build carries on with the remaining entries.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// The release group matched but is not a valid integer
    InvalidRelease { schema_name: String, value: String },

    /// Release 0 is reserved for "current release" and never indexed
    ZeroRelease { schema_name: String },

    /// The meta table holds a taxon identifier that is not an integer
    InvalidTaxonId { schema_name: String, value: String },

    /// The meta table has no taxon identifier row, or it is NULL
    MissingTaxonId { schema_name: String },

    /// Two species report the same taxon identifier
    DuplicateTaxonId {
        taxon_id: u32,
        kept: String,
        dropped: String,
    },
}

impl std::fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseWarning::InvalidRelease { schema_name, value } => write!(
                f,
                "Skipping schema '{}': cannot parse release '{}'",
                schema_name, value
            ),
            ParseWarning::ZeroRelease { schema_name } => {
                write!(f, "Skipping schema '{}': release 0 is reserved", schema_name)
            }
            ParseWarning::InvalidTaxonId { schema_name, value } => write!(
                f,
                "Skipping species of schema '{}': cannot parse taxon ID '{}'",
                schema_name, value
            ),
            ParseWarning::MissingTaxonId { schema_name } => write!(
                f,
                "Skipping species of schema '{}': no species.taxonomy_id in meta table",
                schema_name
            ),
            ParseWarning::DuplicateTaxonId {
                taxon_id,
                kept,
                dropped,
            } => write!(
                f,
                "Taxon ID {} reported by '{}' and '{}', keeping '{}'",
                taxon_id, dropped, kept, kept
            ),
        }
    }
}
