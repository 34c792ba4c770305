// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Metadata cache
//!
//! Holds the snapshot produced by the index builder for the lifetime of its
//! owner. The cache moves through these states:
//!
//! ```text
//! Empty ──> Populating ──> Populated
//!               │
//!               └──> Failed ──> Populating (next accessor retries)
//! ```
//!
//! Population happens at most once per successful attempt: concurrent first
//! callers block while a single caller runs the build, then all of them read
//! the same snapshot. Reads after population take no lock.

use super::index::CatalogSnapshot;
use crate::error::MetadataResult;
use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Lifecycle state of a [`MetadataCache`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// Nothing fetched yet
    Empty,
    /// A build is running
    Populating,
    /// The snapshot is available; terminal
    Populated,
    /// The last build failed; the next accessor starts over
    Failed,
}

impl std::fmt::Display for CacheState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CacheState::Empty => "empty",
            CacheState::Populating => "populating",
            CacheState::Populated => "populated",
            CacheState::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

/// Point-in-time view of the cache status
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub state: CacheState,
    pub population_attempts: u32,
    pub populated_at: Option<DateTime<Utc>>,
    pub build_time: Option<Duration>,
    pub last_error: Option<String>,
    pub schema_count: usize,
    pub taxon_count: usize,
    pub warning_count: usize,
}

impl Default for CacheStats {
    fn default() -> Self {
        Self {
            state: CacheState::Empty,
            population_attempts: 0,
            populated_at: None,
            build_time: None,
            last_error: None,
            schema_count: 0,
            taxon_count: 0,
            warning_count: 0,
        }
    }
}

/// Populate-once holder of the catalog snapshot
pub struct MetadataCache {
    snapshot: OnceCell<Arc<CatalogSnapshot>>,
    status: Mutex<CacheStats>,
}

impl MetadataCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self {
            snapshot: OnceCell::new(),
            status: Mutex::new(CacheStats::default()),
        }
    }

    pub fn state(&self) -> CacheState {
        self.status.lock().state
    }

    pub fn is_populated(&self) -> bool {
        self.snapshot.get().is_some()
    }

    /// The snapshot, if population already happened
    pub fn get(&self) -> Option<Arc<CatalogSnapshot>> {
        self.snapshot.get().cloned()
    }

    pub fn stats(&self) -> CacheStats {
        self.status.lock().clone()
    }

    /// Return the snapshot, running `populate` first if there is none
    ///
    /// On failure the cache is left without a snapshot and the error is
    /// returned unchanged.
    pub fn get_or_populate<F>(&self, populate: F) -> MetadataResult<Arc<CatalogSnapshot>>
    where
        F: FnOnce() -> MetadataResult<CatalogSnapshot>,
    {
        if let Some(snapshot) = self.snapshot.get() {
            return Ok(Arc::clone(snapshot));
        }

        let snapshot = self.snapshot.get_or_try_init(|| {
            {
                let mut status = self.status.lock();
                status.state = CacheState::Populating;
                status.population_attempts += 1;
            }
            log::info!("Fetching Ensembl metadata");

            match populate() {
                Ok(snapshot) => {
                    let mut status = self.status.lock();
                    status.state = CacheState::Populated;
                    status.populated_at = Some(snapshot.built_at);
                    status.build_time = Some(snapshot.build_time);
                    status.last_error = None;
                    status.schema_count = snapshot.index.schema_count();
                    status.taxon_count = snapshot.taxa.len();
                    status.warning_count = snapshot.warnings.len();
                    Ok(Arc::new(snapshot))
                }
                Err(e) => {
                    log::warn!("Fetching Ensembl metadata failed: {}", e);
                    let mut status = self.status.lock();
                    status.state = CacheState::Failed;
                    status.last_error = Some(e.to_string());
                    Err(e)
                }
            }
        })?;

        Ok(Arc::clone(snapshot))
    }
}

impl Default for MetadataCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::index::{MetadataIndex, TaxonIndex};
    use crate::error::MetadataError;
    use crate::source::SourceError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn empty_snapshot() -> CatalogSnapshot {
        let mut taxa = TaxonIndex::new();
        taxa.insert(9606, "homo sapiens");
        CatalogSnapshot {
            index: MetadataIndex::new(),
            taxa,
            warnings: Vec::new(),
            built_at: Utc::now(),
            build_time: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_populates_once() {
        let cache = MetadataCache::new();
        let builds = AtomicUsize::new(0);
        assert_eq!(cache.state(), CacheState::Empty);
        assert!(cache.get().is_none());

        for _ in 0..3 {
            let snapshot = cache
                .get_or_populate(|| {
                    builds.fetch_add(1, Ordering::SeqCst);
                    Ok(empty_snapshot())
                })
                .unwrap();
            assert_eq!(snapshot.species_of(9606), Some("homo sapiens"));
        }

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert_eq!(cache.state(), CacheState::Populated);
        let stats = cache.stats();
        assert_eq!(stats.population_attempts, 1);
        assert_eq!(stats.taxon_count, 1);
        assert!(stats.populated_at.is_some());
    }

    #[test]
    fn test_failure_allows_retry() {
        let cache = MetadataCache::new();

        let result = cache.get_or_populate(|| {
            Err(MetadataError::data_access(
                "listing server catalogs",
                SourceError::Connection("timeout".to_string()),
            ))
        });
        assert!(result.is_err());
        assert_eq!(cache.state(), CacheState::Failed);
        assert!(!cache.is_populated());
        assert!(cache.stats().last_error.unwrap().contains("timeout"));

        cache.get_or_populate(|| Ok(empty_snapshot())).unwrap();
        assert_eq!(cache.state(), CacheState::Populated);
        assert_eq!(cache.stats().population_attempts, 2);
        assert!(cache.stats().last_error.is_none());
    }

    #[test]
    fn test_state_display() {
        assert_eq!(CacheState::Populating.to_string(), "populating");
    }
}
