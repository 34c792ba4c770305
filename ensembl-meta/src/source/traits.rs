// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog source traits
//!
//! The resolver never talks to a database driver directly. It needs exactly
//! two capabilities from a live server connection: list the catalogs (schemas)
//! the server exposes, and run a query that returns text rows. Vendor specific
//! drivers implement [`CatalogSource`]; [`SourceConnector`] opens them.

use super::types::{Endpoint, SourceResult, SourceRow};
use std::sync::Arc;

/// Meta-table lookup for the NCBI taxon identifier of a core schema
///
/// `{schema}` is the only substitution; it is replaced by the fully qualified
/// schema name before the statement is sent.
pub const TAXONOMY_QUERY_TEMPLATE: &str =
    "SELECT meta_value FROM {schema}.meta WHERE meta_key = 'species.taxonomy_id'";

/// Column holding the taxon identifier in the meta-table lookup
pub const META_VALUE_COLUMN: &str = "meta_value";

/// Render the taxon identifier lookup for one core schema
pub fn taxonomy_query(schema: &str) -> String {
    TAXONOMY_QUERY_TEMPLATE.replace("{schema}", schema)
}

/// A live connection able to answer catalog metadata requests
pub trait CatalogSource: Send + Sync {
    /// List the names of all catalogs (schemas) visible on the server
    fn list_catalogs(&self) -> SourceResult<Vec<String>>;

    /// Execute a read-only statement and return its rows
    fn query(&self, sql: &str) -> SourceResult<Vec<SourceRow>>;
}

/// Opens catalog sources for a server endpoint
pub trait SourceConnector: Send + Sync {
    /// Open a connection to the given host, port and schema
    fn connect(&self, endpoint: &Endpoint) -> SourceResult<Box<dyn CatalogSource>>;
}

// Allows boxed sources to be passed wherever a source is expected
impl CatalogSource for Box<dyn CatalogSource> {
    fn list_catalogs(&self) -> SourceResult<Vec<String>> {
        (**self).list_catalogs()
    }

    fn query(&self, sql: &str) -> SourceResult<Vec<SourceRow>> {
        (**self).query(sql)
    }
}

impl<T: CatalogSource + ?Sized> CatalogSource for Arc<T> {
    fn list_catalogs(&self) -> SourceResult<Vec<String>> {
        (**self).list_catalogs()
    }

    fn query(&self, sql: &str) -> SourceResult<Vec<SourceRow>> {
        (**self).query(sql)
    }
}
