// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog snapshot files
//!
//! A snapshot captures what a server reported once: the catalog listing and
//! the taxon identifier found in each core schema's meta table. Loading a
//! snapshot yields a [`MemoryCatalogSource`] that answers exactly like the
//! server did, which lets the resolver run without network access.
//!
//! ```json
//! {
//!   "catalogs": ["homo_sapiens_core_47_36i", "mus_musculus_core_46_36g"],
//!   "taxonomy_ids": { "homo_sapiens_core_47_36i": "9606" }
//! }
//! ```

use super::memory::MemoryCatalogSource;
use super::types::SourceResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Serialized form of a catalog snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshotFile {
    /// Catalog names in server order
    pub catalogs: Vec<String>,
    /// Raw meta_value per core schema; `null` when the server reported `NULL`
    #[serde(default)]
    pub taxonomy_ids: BTreeMap<String, Option<String>>,
}

impl CatalogSnapshotFile {
    /// Read a snapshot from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> SourceResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Write the snapshot as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> SourceResult<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Capture the current contents of a memory source
    pub fn capture(source: &MemoryCatalogSource) -> Self {
        Self {
            catalogs: source.catalogs(),
            taxonomy_ids: source.taxonomy_ids(),
        }
    }

    /// Build a memory source answering like the captured server
    pub fn into_source(self) -> MemoryCatalogSource {
        let source = MemoryCatalogSource::with_catalogs(self.catalogs);
        for (schema, value) in self.taxonomy_ids {
            match value {
                Some(value) => source.set_taxonomy_id(&schema, value),
                None => source.set_null_taxonomy_id(&schema),
            }
        }
        source
    }
}

/// Load a snapshot file straight into a memory source
pub fn load_snapshot_source<P: AsRef<Path>>(path: P) -> SourceResult<MemoryCatalogSource> {
    let path = path.as_ref();
    let snapshot = CatalogSnapshotFile::load(path)?;
    log::debug!(
        "Loaded catalog snapshot {:?}: {} catalogs, {} taxonomy entries",
        path,
        snapshot.catalogs.len(),
        snapshot.taxonomy_ids.len()
    );
    Ok(snapshot.into_source())
}
