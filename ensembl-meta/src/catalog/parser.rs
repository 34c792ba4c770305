// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Schema name parser
//!
//! Decomposes a catalog name such as `homo_sapiens_core_47_36i` into organism,
//! release and suffix for one database type. The pattern is compiled once per
//! configured type; a name that does not match simply does not belong to that
//! type.

use super::warnings::ParseWarning;
use crate::config::TYPE_PLACEHOLDER;
use crate::error::MetadataResult;
use crate::types::DatabaseType;
use regex::Regex;
use std::collections::HashMap;

/// Parsed form of one catalog name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNameRecord {
    pub organism_genus: String,
    pub organism_species: String,
    /// Release version, always > 0
    pub release: u32,
    /// Residual part after the release, usually the assembly tag
    pub suffix: String,
    pub raw_schema_name: String,
    pub database_type: DatabaseType,
}

impl SchemaNameRecord {
    /// Canonical species key, `"<genus> <species>"`
    pub fn species_name(&self) -> String {
        format!("{} {}", self.organism_genus, self.organism_species)
    }
}

/// Outcome of matching one catalog name against one database type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The name belongs to the type and carries a usable release
    Record(SchemaNameRecord),
    /// The name belongs to the type but its release is unusable
    Rejected(ParseWarning),
    /// The name is not a schema of this type
    NoMatch,
}

/// Compiled schema name patterns, one per configured database type
#[derive(Debug, Clone)]
pub struct SchemaNameParser {
    patterns: HashMap<DatabaseType, Regex>,
}

impl SchemaNameParser {
    /// Compile `pattern` for each database type
    ///
    /// The `{type}` placeholder is replaced by the type's lower-case token
    /// before compiling.
    pub fn new(pattern: &str, database_types: &[DatabaseType]) -> MetadataResult<Self> {
        let mut patterns = HashMap::with_capacity(database_types.len());
        for db_type in database_types {
            let regex = Regex::new(&pattern.replace(TYPE_PLACEHOLDER, db_type.schema_token()))?;
            patterns.insert(*db_type, regex);
        }
        Ok(Self { patterns })
    }

    /// Types this parser has a pattern for
    pub fn database_types(&self) -> impl Iterator<Item = &DatabaseType> {
        self.patterns.keys()
    }

    /// Parse a catalog name as a schema of the given type
    pub fn parse(&self, raw_name: &str, database_type: DatabaseType) -> ParseOutcome {
        let Some(regex) = self.patterns.get(&database_type) else {
            return ParseOutcome::NoMatch;
        };
        let Some(captures) = regex.captures(raw_name) else {
            return ParseOutcome::NoMatch;
        };

        let group = |i: usize| captures.get(i).map(|m| m.as_str()).unwrap_or_default();
        let release_text = group(3);

        let release = match release_text.parse::<u32>() {
            Ok(0) => {
                return ParseOutcome::Rejected(ParseWarning::ZeroRelease {
                    schema_name: raw_name.to_string(),
                })
            }
            Ok(release) => release,
            Err(_) => {
                return ParseOutcome::Rejected(ParseWarning::InvalidRelease {
                    schema_name: raw_name.to_string(),
                    value: release_text.to_string(),
                })
            }
        };

        ParseOutcome::Record(SchemaNameRecord {
            organism_genus: group(1).to_string(),
            organism_species: group(2).to_string(),
            release,
            suffix: group(4).to_string(),
            raw_schema_name: raw_name.to_string(),
            database_type,
        })
    }

    /// Parse and keep only usable records
    pub fn parse_record(&self, raw_name: &str, database_type: DatabaseType) -> Option<SchemaNameRecord> {
        match self.parse(raw_name, database_type) {
            ParseOutcome::Record(record) => Some(record),
            _ => None,
        }
    }
}
