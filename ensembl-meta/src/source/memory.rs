// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! In-memory catalog source for testing and offline snapshots

use super::traits::{taxonomy_query, CatalogSource, SourceConnector, META_VALUE_COLUMN};
use super::types::{Endpoint, SourceError, SourceResult, SourceRow};
use parking_lot::{Mutex, RwLock};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-memory catalog source
///
/// Holds a fixed catalog listing and canned query responses. Every call is
/// counted so tests can assert how often the resolver went to the server.
#[derive(Default)]
pub struct MemoryCatalogSource {
    catalogs: RwLock<Vec<String>>,
    /// Raw meta values per core schema; `None` models a `NULL` meta_value
    taxonomy_ids: RwLock<BTreeMap<String, Option<String>>>,
    /// Rendered statement -> rows
    responses: RwLock<HashMap<String, Vec<SourceRow>>>,
    list_calls: AtomicUsize,
    query_calls: AtomicUsize,
    fail_listing: AtomicBool,
    fail_queries: AtomicBool,
    listing_delay: Mutex<Option<Duration>>,
}

impl MemoryCatalogSource {
    /// Create an empty memory source
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory source listing the given catalogs
    pub fn with_catalogs<I, S>(catalogs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let source = Self::new();
        *source.catalogs.write() = catalogs.into_iter().map(Into::into).collect();
        source
    }

    /// Append a catalog name to the listing
    pub fn add_catalog(&self, name: impl Into<String>) {
        self.catalogs.write().push(name.into());
    }

    /// Store the taxon identifier reported by a core schema's meta table
    pub fn set_taxonomy_id(&self, schema: &str, value: impl Into<String>) {
        let value = value.into();
        self.set_rows(
            &taxonomy_query(schema),
            vec![SourceRow::new().with(META_VALUE_COLUMN, value.clone())],
        );
        self.taxonomy_ids
            .write()
            .insert(schema.to_string(), Some(value));
    }

    /// Make a core schema's meta table report a `NULL` taxon identifier
    pub fn set_null_taxonomy_id(&self, schema: &str) {
        self.set_rows(
            &taxonomy_query(schema),
            vec![SourceRow::new().with_null(META_VALUE_COLUMN)],
        );
        self.taxonomy_ids.write().insert(schema.to_string(), None);
    }

    /// Register the rows returned for an exact statement
    pub fn set_rows(&self, sql: &str, rows: Vec<SourceRow>) {
        self.responses.write().insert(sql.to_string(), rows);
    }

    /// Make catalog listings fail with a connection error
    pub fn fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    /// Make queries fail with a query error
    pub fn fail_queries(&self, fail: bool) {
        self.fail_queries.store(fail, Ordering::SeqCst);
    }

    /// Sleep before answering catalog listings
    pub fn set_listing_delay(&self, delay: Option<Duration>) {
        *self.listing_delay.lock() = delay;
    }

    /// Number of catalog listings served so far
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Number of queries served so far
    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    /// Current catalog listing
    pub fn catalogs(&self) -> Vec<String> {
        self.catalogs.read().clone()
    }

    /// Raw taxon identifier values per core schema
    pub fn taxonomy_ids(&self) -> BTreeMap<String, Option<String>> {
        self.taxonomy_ids.read().clone()
    }
}

impl CatalogSource for MemoryCatalogSource {
    fn list_catalogs(&self) -> SourceResult<Vec<String>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let delay = *self.listing_delay.lock();
        if let Some(delay) = delay {
            std::thread::sleep(delay);
        }

        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(SourceError::Connection(
                "memory source configured to refuse catalog listings".to_string(),
            ));
        }

        Ok(self.catalogs.read().clone())
    }

    fn query(&self, sql: &str) -> SourceResult<Vec<SourceRow>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);

        if self.fail_queries.load(Ordering::SeqCst) {
            return Err(SourceError::Query(format!(
                "memory source configured to fail: {}",
                sql
            )));
        }

        Ok(self.responses.read().get(sql).cloned().unwrap_or_default())
    }
}

/// Connector handing out one shared memory source
///
/// Records every endpoint it was asked to open.
pub struct MemoryConnector {
    source: Arc<MemoryCatalogSource>,
    opened: Mutex<Vec<Endpoint>>,
    refuse: AtomicBool,
}

impl MemoryConnector {
    pub fn new(source: Arc<MemoryCatalogSource>) -> Self {
        Self {
            source,
            opened: Mutex::new(Vec::new()),
            refuse: AtomicBool::new(false),
        }
    }

    /// Make subsequent connection attempts fail
    pub fn refuse_connections(&self, refuse: bool) {
        self.refuse.store(refuse, Ordering::SeqCst);
    }

    /// Endpoints opened so far, in order
    pub fn opened(&self) -> Vec<Endpoint> {
        self.opened.lock().clone()
    }

    /// The shared source behind every connection
    pub fn source(&self) -> Arc<MemoryCatalogSource> {
        self.source.clone()
    }
}

impl SourceConnector for MemoryConnector {
    fn connect(&self, endpoint: &Endpoint) -> SourceResult<Box<dyn CatalogSource>> {
        if self.refuse.load(Ordering::SeqCst) {
            return Err(SourceError::Connection(format!(
                "connection to {} refused",
                endpoint
            )));
        }

        log::debug!("Opening memory catalog source for {}", endpoint);
        self.opened.lock().push(endpoint.clone());
        Ok(Box::new(self.source.clone()))
    }
}
