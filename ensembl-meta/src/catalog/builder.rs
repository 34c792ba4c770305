// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Index builder
//!
//! Population runs in two ordered phases:
//!
//! 1. **Catalog phase** - list the server catalogs once and parse every name
//!    against every configured database type, producing the [`MetadataIndex`].
//! 2. **Taxon phase** - for each species of the finished core index, read the
//!    NCBI taxon identifier from the meta table of its latest core schema,
//!    producing the [`TaxonIndex`].
//!
//! The taxon phase only accepts the core slice of a completed index, so it
//! cannot run before the catalog phase.

use super::index::{CatalogSnapshot, MetadataIndex, SpeciesReleases, TaxonIndex};
use super::parser::{ParseOutcome, SchemaNameParser};
use super::warnings::ParseWarning;
use crate::config::DuplicateTaxonPolicy;
use crate::error::{MetadataError, MetadataResult};
use crate::source::{taxonomy_query, CatalogSource, META_VALUE_COLUMN};
use crate::types::DatabaseType;
use chrono::Utc;
use std::time::Instant;

/// Builds a [`CatalogSnapshot`] from a catalog source
pub struct IndexBuilder<'a> {
    source: &'a dyn CatalogSource,
    parser: &'a SchemaNameParser,
    database_types: &'a [DatabaseType],
    duplicate_policy: DuplicateTaxonPolicy,
}

impl<'a> IndexBuilder<'a> {
    pub fn new(
        source: &'a dyn CatalogSource,
        parser: &'a SchemaNameParser,
        database_types: &'a [DatabaseType],
        duplicate_policy: DuplicateTaxonPolicy,
    ) -> Self {
        Self {
            source,
            parser,
            database_types,
            duplicate_policy,
        }
    }

    /// Run both phases
    ///
    /// Any source failure aborts the build; parse anomalies only drop the
    /// affected entry and are returned as warnings.
    pub fn build(&self) -> MetadataResult<CatalogSnapshot> {
        let started = Instant::now();
        let mut warnings = Vec::new();

        let index = self.index_catalogs(&mut warnings)?;

        let core = index.species(DatabaseType::Core).ok_or_else(|| {
            MetadataError::Config("database types must include 'core'".to_string())
        })?;
        let taxa = self.resolve_taxa(core, &mut warnings)?;

        let build_time = started.elapsed();
        log::info!(
            "Fetched Ensembl metadata: {} schemas, {} species with taxon IDs, {} warnings in {:?}",
            index.schema_count(),
            taxa.len(),
            warnings.len(),
            build_time
        );

        Ok(CatalogSnapshot {
            index,
            taxa,
            warnings,
            built_at: Utc::now(),
            build_time,
        })
    }

    /// Catalog phase
    fn index_catalogs(&self, warnings: &mut Vec<ParseWarning>) -> MetadataResult<MetadataIndex> {
        let catalogs = self
            .source
            .list_catalogs()
            .map_err(|e| MetadataError::data_access("listing server catalogs", e))?;
        log::debug!("Server reported {} catalogs", catalogs.len());

        let mut index = MetadataIndex::new();
        for db_type in self.database_types {
            index.ensure_type(*db_type);
            let mut matched = 0usize;

            for name in &catalogs {
                match self.parser.parse(name, *db_type) {
                    ParseOutcome::Record(record) => {
                        if let Some(replaced) = index.insert(record) {
                            log::debug!("Schema '{}' replaces '{}'", name, replaced);
                        }
                        matched += 1;
                    }
                    ParseOutcome::Rejected(warning) => {
                        log::warn!("{}", warning);
                        warnings.push(warning);
                    }
                    ParseOutcome::NoMatch => {}
                }
            }

            log::debug!("Indexed {} '{}' schemas", matched, db_type);
        }

        Ok(index)
    }

    /// Taxon phase, over the core slice of a completed index
    fn resolve_taxa(
        &self,
        core: &SpeciesReleases,
        warnings: &mut Vec<ParseWarning>,
    ) -> MetadataResult<TaxonIndex> {
        let mut taxa = TaxonIndex::new();

        for (species, releases) in core {
            let Some((_, schema)) = releases.iter().next_back() else {
                continue;
            };

            let rows = self.source.query(&taxonomy_query(schema)).map_err(|e| {
                MetadataError::data_access(format!("fetching taxon ID from '{}'", schema), e)
            })?;

            let Some(value) = rows.first().and_then(|row| row.get(META_VALUE_COLUMN)) else {
                let warning = ParseWarning::MissingTaxonId {
                    schema_name: schema.clone(),
                };
                log::warn!("{}", warning);
                warnings.push(warning);
                continue;
            };

            let taxon_id = match value.trim().parse::<u32>() {
                Ok(taxon_id) => taxon_id,
                Err(_) => {
                    let warning = ParseWarning::InvalidTaxonId {
                        schema_name: schema.clone(),
                        value: value.to_string(),
                    };
                    log::warn!("{}", warning);
                    warnings.push(warning);
                    continue;
                }
            };
            log::debug!("Species '{}' has taxon ID {}", species, taxon_id);

            if let Some(existing) = taxa.species_name(taxon_id) {
                if existing != species {
                    if self.duplicate_policy == DuplicateTaxonPolicy::Reject {
                        return Err(MetadataError::DuplicateTaxonId {
                            taxon_id,
                            existing: existing.to_string(),
                            incoming: species.clone(),
                        });
                    }
                    let warning = ParseWarning::DuplicateTaxonId {
                        taxon_id,
                        kept: species.clone(),
                        dropped: existing.to_string(),
                    };
                    log::warn!("{}", warning);
                    warnings.push(warning);
                }
            }

            taxa.insert(taxon_id, species.clone());
        }

        Ok(taxa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_SCHEMA_NAME_PATTERN;
    use crate::source::{MemoryCatalogSource, SourceError};

    fn build_with(
        source: &MemoryCatalogSource,
        policy: DuplicateTaxonPolicy,
    ) -> MetadataResult<CatalogSnapshot> {
        let types = DatabaseType::all();
        let parser = SchemaNameParser::new(DEFAULT_SCHEMA_NAME_PATTERN, &types).unwrap();
        IndexBuilder::new(source, &parser, &types, policy).build()
    }

    #[test]
    fn test_taxon_id_comes_from_latest_core_schema() {
        let source = MemoryCatalogSource::with_catalogs([
            "homo_sapiens_core_46_36h",
            "homo_sapiens_core_47_36i",
            "homo_sapiens_variation_47_36i",
        ]);
        source.set_taxonomy_id("homo_sapiens_core_46_36h", "1");
        source.set_taxonomy_id("homo_sapiens_core_47_36i", "9606");

        let snapshot = build_with(&source, DuplicateTaxonPolicy::LastWriteWins).unwrap();

        assert_eq!(snapshot.taxa.species_name(9606), Some("homo sapiens"));
        assert!(!snapshot.taxa.contains(1));
        // One catalog listing, one meta lookup per core species
        assert_eq!(source.list_calls(), 1);
        assert_eq!(source.query_calls(), 1);
    }

    #[test]
    fn test_bad_taxon_values_are_warnings() {
        let source = MemoryCatalogSource::with_catalogs([
            "homo_sapiens_core_47_36i",
            "mus_musculus_core_47_36",
            "rattus_norvegicus_core_47_34",
            "danio_rerio_core_47_7",
        ]);
        source.set_taxonomy_id("homo_sapiens_core_47_36i", "9606");
        source.set_taxonomy_id("mus_musculus_core_47_36", "mouse");
        source.set_null_taxonomy_id("rattus_norvegicus_core_47_34");

        let snapshot = build_with(&source, DuplicateTaxonPolicy::LastWriteWins).unwrap();

        assert_eq!(snapshot.taxa.len(), 1);
        assert_eq!(snapshot.warnings.len(), 3);
        assert!(snapshot.warnings.contains(&ParseWarning::InvalidTaxonId {
            schema_name: "mus_musculus_core_47_36".to_string(),
            value: "mouse".to_string(),
        }));
        assert!(snapshot.warnings.contains(&ParseWarning::MissingTaxonId {
            schema_name: "danio_rerio_core_47_7".to_string(),
        }));
        // Species without a taxon ID stay in the release index
        assert!(snapshot
            .index
            .contains(DatabaseType::Core, "mus musculus", 47));
    }

    #[test]
    fn test_duplicate_taxon_last_write_wins() {
        let source = MemoryCatalogSource::with_catalogs([
            "canis_familiaris_core_47_2a",
            "canis_lupus_core_47_1",
        ]);
        source.set_taxonomy_id("canis_familiaris_core_47_2a", "9615");
        source.set_taxonomy_id("canis_lupus_core_47_1", "9615");

        let snapshot = build_with(&source, DuplicateTaxonPolicy::LastWriteWins).unwrap();

        assert_eq!(snapshot.taxa.species_name(9615), Some("canis lupus"));
        assert_eq!(
            snapshot.warnings,
            vec![ParseWarning::DuplicateTaxonId {
                taxon_id: 9615,
                kept: "canis lupus".to_string(),
                dropped: "canis familiaris".to_string(),
            }]
        );
    }

    #[test]
    fn test_duplicate_taxon_rejected() {
        let source = MemoryCatalogSource::with_catalogs([
            "canis_familiaris_core_47_2a",
            "canis_lupus_core_47_1",
        ]);
        source.set_taxonomy_id("canis_familiaris_core_47_2a", "9615");
        source.set_taxonomy_id("canis_lupus_core_47_1", "9615");

        let result = build_with(&source, DuplicateTaxonPolicy::Reject);
        assert!(matches!(
            result,
            Err(MetadataError::DuplicateTaxonId { taxon_id: 9615, .. })
        ));
    }

    #[test]
    fn test_source_failures_abort_build() {
        let source = MemoryCatalogSource::with_catalogs(["homo_sapiens_core_47_36i"]);
        source.fail_listing(true);
        assert!(matches!(
            build_with(&source, DuplicateTaxonPolicy::LastWriteWins),
            Err(MetadataError::DataAccess {
                source: SourceError::Connection(_),
                ..
            })
        ));

        source.fail_listing(false);
        source.fail_queries(true);
        assert!(matches!(
            build_with(&source, DuplicateTaxonPolicy::LastWriteWins),
            Err(MetadataError::DataAccess {
                source: SourceError::Query(_),
                ..
            })
        ));
    }

    #[test]
    fn test_no_core_species_means_no_taxon_queries() {
        let source = MemoryCatalogSource::with_catalogs([
            "homo_sapiens_variation_47_36i",
            "ensembl_compara_47",
        ]);

        let snapshot = build_with(&source, DuplicateTaxonPolicy::LastWriteWins).unwrap();

        assert!(snapshot.taxa.is_empty());
        assert_eq!(source.query_calls(), 0);
        assert!(snapshot
            .index
            .contains(DatabaseType::Variation, "homo sapiens", 47));
    }
}
