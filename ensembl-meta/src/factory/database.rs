// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Database factory
//!
//! Turns a (taxon, release, database type) request into a validated
//! [`ConnectionDescriptor`]. Validation order is fixed: species first, then
//! release, then schema. A release of `0` means "current" and is replaced by
//! the latest core release before any check.

use super::descriptor::{ConnectionDescriptor, DatabaseKind};
use crate::catalog::MetadataResolver;
use crate::config::{EnsemblConfig, MartConfig, ServerConfig};
use crate::error::{MetadataError, MetadataResult};
use crate::source::{CatalogSource, Endpoint, SourceConnector};
use crate::types::DatabaseType;

/// Release value requesting the current release
pub const CURRENT_RELEASE: u32 = 0;

/// Produces connection descriptors for one Ensembl installation
///
/// Owns the metadata connection and the resolver cache built from it.
pub struct DatabaseFactory {
    config: EnsemblConfig,
    resolver: MetadataResolver,
}

impl DatabaseFactory {
    /// Create a factory over an already open metadata connection
    pub fn new(config: EnsemblConfig, source: Box<dyn CatalogSource>) -> MetadataResult<Self> {
        let resolver = MetadataResolver::new(&config, source)?;
        log::info!(
            "Database factory ready for {}:{}",
            config.server.host,
            config.server.port
        );
        Ok(Self { config, resolver })
    }

    /// Open the metadata connection described by the configuration
    pub fn connect(config: EnsemblConfig, connector: &dyn SourceConnector) -> MetadataResult<Self> {
        config.validate()?;

        let endpoint = Endpoint::new(
            config.server.host.clone(),
            config.server.port,
            config.server.default_schema.clone(),
        );
        let source = connector.connect(&endpoint).map_err(|e| {
            MetadataError::data_access(format!("connecting to metadata server {}", endpoint), e)
        })?;

        Self::new(config, source)
    }

    pub fn resolver(&self) -> &MetadataResolver {
        &self.resolver
    }

    pub fn config(&self) -> &EnsemblConfig {
        &self.config
    }

    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    pub fn mart(&self) -> &MartConfig {
        &self.config.mart
    }

    /// Descriptor for a species schema
    ///
    /// # Errors
    ///
    /// - `UnknownSpecies` if the taxon ID is not in Ensembl
    /// - `UnknownRelease` if a non-zero release has no schema of that type
    /// - `SchemaNotFound` if the current release has no schema of that type
    pub fn create_database(
        &self,
        taxon_id: u32,
        release: u32,
        database_type: DatabaseType,
    ) -> MetadataResult<ConnectionDescriptor> {
        let species_name = self.species_name(taxon_id)?;
        let release = self.resolve_release(taxon_id, release, database_type)?;

        let schema = self
            .resolver
            .schema_name(taxon_id, release, database_type)?
            .ok_or(MetadataError::SchemaNotFound {
                taxon_id,
                release,
                database_type,
            })?;

        log::debug!(
            "Resolved {} release {} '{}' to schema '{}'",
            species_name,
            release,
            database_type,
            schema
        );

        Ok(ConnectionDescriptor {
            endpoint: Endpoint::new(self.config.server.host.clone(), self.config.server.port, schema),
            species_name,
            taxon_id,
            release,
            kind: DatabaseKind::Species(database_type),
        })
    }

    /// Descriptor for the current release of a species schema
    pub fn create_latest_database(
        &self,
        taxon_id: u32,
        database_type: DatabaseType,
    ) -> MetadataResult<ConnectionDescriptor> {
        self.create_database(taxon_id, CURRENT_RELEASE, database_type)
    }

    /// Descriptor for the mart schema of a release
    ///
    /// `None` or `Some(0)` selects the current release. Mart releases follow
    /// core releases, so the release is validated against the core index.
    pub fn create_mart_database(
        &self,
        taxon_id: u32,
        release: Option<u32>,
    ) -> MetadataResult<ConnectionDescriptor> {
        let species_name = self.species_name(taxon_id)?;
        let release = self.resolve_release(
            taxon_id,
            release.unwrap_or(CURRENT_RELEASE),
            DatabaseType::Core,
        )?;

        let schema = format!("{}_{}", self.config.mart.schema_prefix, release);
        log::debug!("Resolved {} mart release {} to '{}'", species_name, release, schema);

        Ok(ConnectionDescriptor {
            endpoint: Endpoint::new(self.config.mart.host.clone(), self.config.mart.port, schema),
            species_name,
            taxon_id,
            release,
            kind: DatabaseKind::Mart,
        })
    }

    fn species_name(&self, taxon_id: u32) -> MetadataResult<String> {
        self.resolver
            .species_name(taxon_id)?
            .ok_or(MetadataError::UnknownSpecies(taxon_id))
    }

    fn resolve_release(
        &self,
        taxon_id: u32,
        release: u32,
        database_type: DatabaseType,
    ) -> MetadataResult<u32> {
        if release == CURRENT_RELEASE {
            return self.resolver.current_release(taxon_id);
        }

        if !self.resolver.has_release(taxon_id, release, database_type)? {
            return Err(MetadataError::UnknownRelease {
                taxon_id,
                release,
                database_type,
            });
        }
        Ok(release)
    }
}
