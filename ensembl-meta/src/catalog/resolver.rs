// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Metadata resolver - the query interface over the cached catalog
//!
//! Every operation first makes sure the cache is populated, so the first call
//! on a fresh resolver pays for the catalog scan and all later calls are
//! in-memory lookups. Species are addressed by NCBI taxon identifier.
//!
//! Lookups that find nothing return `false`, `None` or an empty set. Errors
//! are reserved for transport failures and for taxon identifiers the server
//! does not know.

use super::builder::IndexBuilder;
use super::cache::{CacheState, CacheStats, MetadataCache};
use super::index::CatalogSnapshot;
use super::parser::SchemaNameParser;
use super::warnings::ParseWarning;
use crate::config::{DuplicateTaxonPolicy, EnsemblConfig};
use crate::error::{MetadataError, MetadataResult};
use crate::source::CatalogSource;
use crate::types::DatabaseType;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Resolves species, releases and schema names against one catalog source
pub struct MetadataResolver {
    source: Box<dyn CatalogSource>,
    parser: SchemaNameParser,
    database_types: Vec<DatabaseType>,
    duplicate_policy: DuplicateTaxonPolicy,
    cache: MetadataCache,
}

impl MetadataResolver {
    /// Create a resolver; nothing is fetched until the first lookup
    pub fn new(config: &EnsemblConfig, source: Box<dyn CatalogSource>) -> MetadataResult<Self> {
        config.validate()?;

        let mut database_types = config.database_types.clone();
        database_types.sort();
        database_types.dedup();

        let parser = SchemaNameParser::new(&config.schema_name_pattern, &database_types)?;

        Ok(Self {
            source,
            parser,
            database_types,
            duplicate_policy: config.duplicate_taxon_policy,
            cache: MetadataCache::new(),
        })
    }

    /// Populated snapshot, fetching it on first use
    fn snapshot(&self) -> MetadataResult<Arc<CatalogSnapshot>> {
        self.cache.get_or_populate(|| {
            IndexBuilder::new(
                self.source.as_ref(),
                &self.parser,
                &self.database_types,
                self.duplicate_policy,
            )
            .build()
        })
    }

    /// Fetch the catalog metadata now instead of on first lookup
    pub fn populate(&self) -> MetadataResult<()> {
        self.snapshot().map(|_| ())
    }

    pub fn cache_state(&self) -> CacheState {
        self.cache.state()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// The parser used to index catalog names
    pub fn parser(&self) -> &SchemaNameParser {
        &self.parser
    }

    /// Database types this resolver indexes
    pub fn database_types(&self) -> &[DatabaseType] {
        &self.database_types
    }

    /// Check if Ensembl contains the species identified by the taxon ID
    pub fn has_species(&self, taxon_id: u32) -> MetadataResult<bool> {
        Ok(self.snapshot()?.taxa.contains(taxon_id))
    }

    /// Check if a schema exists for the species, release and database type
    pub fn has_release(
        &self,
        taxon_id: u32,
        release: u32,
        database_type: DatabaseType,
    ) -> MetadataResult<bool> {
        let snapshot = self.snapshot()?;
        Ok(match snapshot.species_of(taxon_id) {
            Some(species) => snapshot.index.contains(database_type, species, release),
            None => false,
        })
    }

    /// Latest core release of the species
    ///
    /// Core releases are the version axis for every database type.
    pub fn current_release(&self, taxon_id: u32) -> MetadataResult<u32> {
        let snapshot = self.snapshot()?;
        snapshot
            .species_of(taxon_id)
            .and_then(|species| snapshot.index.latest(DatabaseType::Core, species))
            .map(|(release, _)| release)
            .ok_or(MetadataError::UnknownSpecies(taxon_id))
    }

    /// Schema name for the species, release and database type, if it exists
    pub fn schema_name(
        &self,
        taxon_id: u32,
        release: u32,
        database_type: DatabaseType,
    ) -> MetadataResult<Option<String>> {
        let snapshot = self.snapshot()?;
        Ok(snapshot.species_of(taxon_id).and_then(|species| {
            snapshot
                .index
                .schema_name(database_type, species, release)
                .map(str::to_string)
        }))
    }

    /// All releases of the database type available for the species
    ///
    /// Empty when the species has no schema of that type.
    pub fn release_versions(
        &self,
        taxon_id: u32,
        database_type: DatabaseType,
    ) -> MetadataResult<BTreeSet<u32>> {
        let snapshot = self.snapshot()?;
        let species = snapshot
            .species_of(taxon_id)
            .ok_or(MetadataError::UnknownSpecies(taxon_id))?;

        Ok(snapshot
            .index
            .releases(database_type, species)
            .map(|releases| releases.keys().copied().collect())
            .unwrap_or_default())
    }

    /// Database types with at least one release for the species
    pub fn database_types_for(&self, taxon_id: u32) -> MetadataResult<BTreeSet<DatabaseType>> {
        let snapshot = self.snapshot()?;
        let species = snapshot
            .species_of(taxon_id)
            .ok_or(MetadataError::UnknownSpecies(taxon_id))?;
        Ok(snapshot.index.database_types_for(species))
    }

    /// Names of the species available in Ensembl
    pub fn species_names(&self) -> MetadataResult<BTreeSet<String>> {
        Ok(self.snapshot()?.taxa.species_names())
    }

    /// NCBI taxon IDs of the species available in Ensembl
    pub fn taxon_ids(&self) -> MetadataResult<BTreeSet<u32>> {
        Ok(self.snapshot()?.taxa.taxon_ids())
    }

    pub fn species_name(&self, taxon_id: u32) -> MetadataResult<Option<String>> {
        Ok(self.snapshot()?.species_of(taxon_id).map(str::to_string))
    }

    /// Reverse lookup from `"genus species"` to taxon ID
    pub fn taxon_id_for(&self, species_name: &str) -> MetadataResult<Option<u32>> {
        Ok(self.snapshot()?.taxa.taxon_id(species_name))
    }

    /// Full taxon ID -> species name mapping
    pub fn taxon_map(&self) -> MetadataResult<BTreeMap<u32, String>> {
        Ok(self.snapshot()?.taxa.as_map().clone())
    }

    /// Entries dropped while building the index
    pub fn build_warnings(&self) -> MetadataResult<Vec<ParseWarning>> {
        Ok(self.snapshot()?.warnings.clone())
    }
}
