// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Derived catalog indexes
//!
//! [`MetadataIndex`] maps database type -> species name -> release -> schema
//! name. The inner map is ordered by release, so its last entry is the current
//! release of that species and type. [`TaxonIndex`] maps NCBI taxon
//! identifiers to the species names used as keys in the metadata index.
//!
//! Both are built once and only read afterwards.

use super::parser::SchemaNameRecord;
use super::warnings::ParseWarning;
use crate::types::DatabaseType;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Duration;

/// Release -> schema name, ascending by release
pub type ReleaseMap = BTreeMap<u32, String>;

/// Species name -> releases of one database type
pub type SpeciesReleases = BTreeMap<String, ReleaseMap>;

/// Database type -> species -> release -> schema name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataIndex {
    types: HashMap<DatabaseType, SpeciesReleases>,
}

impl MetadataIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a parsed catalog entry into the index
    ///
    /// Returns the schema name previously stored for the same type, species
    /// and release, which is replaced.
    pub fn insert(&mut self, record: SchemaNameRecord) -> Option<String> {
        let species = record.species_name();
        self.types
            .entry(record.database_type)
            .or_default()
            .entry(species)
            .or_default()
            .insert(record.release, record.raw_schema_name)
    }

    /// Register a database type with no species yet
    pub fn ensure_type(&mut self, database_type: DatabaseType) {
        self.types.entry(database_type).or_default();
    }

    /// All species of one database type
    pub fn species(&self, database_type: DatabaseType) -> Option<&SpeciesReleases> {
        self.types.get(&database_type)
    }

    /// Releases of one species and database type
    pub fn releases(&self, database_type: DatabaseType, species: &str) -> Option<&ReleaseMap> {
        self.types.get(&database_type)?.get(species)
    }

    /// Highest release and its schema name
    pub fn latest(&self, database_type: DatabaseType, species: &str) -> Option<(u32, &str)> {
        self.releases(database_type, species)?
            .iter()
            .next_back()
            .map(|(release, schema)| (*release, schema.as_str()))
    }

    pub fn schema_name(
        &self,
        database_type: DatabaseType,
        species: &str,
        release: u32,
    ) -> Option<&str> {
        self.releases(database_type, species)?
            .get(&release)
            .map(String::as_str)
    }

    pub fn contains(&self, database_type: DatabaseType, species: &str, release: u32) -> bool {
        self.schema_name(database_type, species, release).is_some()
    }

    /// Database types holding at least one release of the species
    pub fn database_types_for(&self, species: &str) -> BTreeSet<DatabaseType> {
        self.types
            .iter()
            .filter(|(_, by_species)| by_species.contains_key(species))
            .map(|(db_type, _)| *db_type)
            .collect()
    }

    /// Database types present in the index
    pub fn database_types(&self) -> BTreeSet<DatabaseType> {
        self.types.keys().copied().collect()
    }

    /// Total number of indexed schemas across all types
    pub fn schema_count(&self) -> usize {
        self.types
            .values()
            .flat_map(|by_species| by_species.values())
            .map(|releases| releases.len())
            .sum()
    }
}

/// NCBI taxon identifier <-> species name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaxonIndex {
    by_taxon: BTreeMap<u32, String>,
    by_species: HashMap<String, u32>,
}

impl TaxonIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a taxon identifier for a species
    ///
    /// Returns the species previously mapped to the same identifier. That
    /// species loses its identifier.
    pub fn insert(&mut self, taxon_id: u32, species: impl Into<String>) -> Option<String> {
        let species = species.into();
        let previous = self.by_taxon.insert(taxon_id, species.clone());
        if let Some(previous) = &previous {
            self.by_species.remove(previous);
        }
        self.by_species.insert(species, taxon_id);
        previous
    }

    pub fn species_name(&self, taxon_id: u32) -> Option<&str> {
        self.by_taxon.get(&taxon_id).map(String::as_str)
    }

    pub fn taxon_id(&self, species: &str) -> Option<u32> {
        self.by_species.get(species).copied()
    }

    pub fn contains(&self, taxon_id: u32) -> bool {
        self.by_taxon.contains_key(&taxon_id)
    }

    pub fn taxon_ids(&self) -> BTreeSet<u32> {
        self.by_taxon.keys().copied().collect()
    }

    pub fn species_names(&self) -> BTreeSet<String> {
        self.by_taxon.values().cloned().collect()
    }

    pub fn as_map(&self) -> &BTreeMap<u32, String> {
        &self.by_taxon
    }

    pub fn len(&self) -> usize {
        self.by_taxon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_taxon.is_empty()
    }
}

/// Everything one population produced
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub index: MetadataIndex,
    pub taxa: TaxonIndex,
    /// Entries dropped during the build
    pub warnings: Vec<ParseWarning>,
    pub built_at: DateTime<Utc>,
    pub build_time: Duration,
}

impl CatalogSnapshot {
    /// Species name for a taxon identifier
    pub fn species_of(&self, taxon_id: u32) -> Option<&str> {
        self.taxa.species_name(taxon_id)
    }
}
