// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Ensembl database type tags
//!
//! Every species schema on an Ensembl server carries a type token between the
//! species name and the release number (`homo_sapiens_variation_47_36`). The
//! set of tokens this crate understands is closed; which of them are indexed
//! is decided by configuration.

use serde::{Deserialize, Serialize};

/// Category of content held by a species schema
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    /// Core genome annotation; the canonical release axis and the home of
    /// the species `meta` table
    Core,
    /// cDNA alignments
    Cdna,
    /// Functional genomics (regulation)
    Funcgen,
    /// Additional feature sets such as EST alignments
    OtherFeatures,
    /// Variation data
    Variation,
    /// Manually curated Vega annotation
    Vega,
}

impl DatabaseType {
    /// All known database types in index order
    pub fn all() -> Vec<DatabaseType> {
        vec![
            DatabaseType::Core,
            DatabaseType::Cdna,
            DatabaseType::Funcgen,
            DatabaseType::OtherFeatures,
            DatabaseType::Variation,
            DatabaseType::Vega,
        ]
    }

    /// The lower-case token used inside schema names
    pub fn schema_token(&self) -> &'static str {
        match self {
            DatabaseType::Core => "core",
            DatabaseType::Cdna => "cdna",
            DatabaseType::Funcgen => "funcgen",
            DatabaseType::OtherFeatures => "otherfeatures",
            DatabaseType::Variation => "variation",
            DatabaseType::Vega => "vega",
        }
    }
}

impl Default for DatabaseType {
    fn default() -> Self {
        DatabaseType::Core
    }
}

impl std::str::FromStr for DatabaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "core" => Ok(DatabaseType::Core),
            "cdna" => Ok(DatabaseType::Cdna),
            "funcgen" => Ok(DatabaseType::Funcgen),
            "otherfeatures" | "other_features" => Ok(DatabaseType::OtherFeatures),
            "variation" => Ok(DatabaseType::Variation),
            "vega" => Ok(DatabaseType::Vega),
            _ => Err(format!(
                "Unknown database type: {}. Valid options: core, cdna, funcgen, otherfeatures, variation, vega",
                s
            )),
        }
    }
}

impl std::fmt::Display for DatabaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.schema_token())
    }
}
