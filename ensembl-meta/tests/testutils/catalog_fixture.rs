//! Catalog fixture for Ensembl Meta integration tests
//!
//! Wraps a shared [`MemoryCatalogSource`] so tests can both drive a factory
//! and inspect how often the source was hit.

use ensembl_meta::{DatabaseFactory, EnsemblConfig, MemoryCatalogSource, MemoryConnector};
use std::sync::Arc;

use super::catalogs::{MIXED_RELEASES, MIXED_RELEASES_TAXA};

pub struct CatalogFixture {
    source: Arc<MemoryCatalogSource>,
    config: EnsemblConfig,
}

impl CatalogFixture {
    /// Empty catalog server
    pub fn empty() -> Self {
        super::init_logging();
        Self {
            source: Arc::new(MemoryCatalogSource::new()),
            config: EnsemblConfig::default(),
        }
    }

    /// Catalog with the given schema names and no taxonomy rows
    pub fn with_catalogs(catalogs: &[&str]) -> Self {
        let fixture = Self::empty();
        for name in catalogs {
            fixture.source.add_catalog(*name);
        }
        fixture
    }

    /// Human and mouse with taxonomy rows and some noise
    pub fn mixed_releases() -> Self {
        let fixture = Self::with_catalogs(MIXED_RELEASES);
        for (schema, taxon) in MIXED_RELEASES_TAXA {
            fixture.source.set_taxonomy_id(schema, *taxon);
        }
        fixture
    }

    /// Worked example: human at releases 46 and 47, mouse at 46
    pub fn human_and_mouse() -> Self {
        let fixture = Self::with_catalogs(&[
            "homo_sapiens_core_46_36",
            "homo_sapiens_core_47_36",
            "mus_musculus_core_46_37",
        ]);
        fixture
            .source
            .set_taxonomy_id("homo_sapiens_core_47_36", "9606");
        fixture
            .source
            .set_taxonomy_id("mus_musculus_core_46_37", "10090");
        fixture
    }

    pub fn with_config(mut self, config: EnsemblConfig) -> Self {
        self.config = config;
        self
    }

    pub fn source(&self) -> &Arc<MemoryCatalogSource> {
        &self.source
    }

    pub fn config(&self) -> &EnsemblConfig {
        &self.config
    }

    /// Factory reading from the shared source
    pub fn factory(&self) -> DatabaseFactory {
        DatabaseFactory::new(self.config.clone(), Box::new(self.source.clone()))
            .expect("Failed to create database factory")
    }

    /// Connector handing out the shared source
    pub fn connector(&self) -> MemoryConnector {
        MemoryConnector::new(self.source.clone())
    }
}
