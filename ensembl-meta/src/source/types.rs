// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog source types and error handling
//!
//! This module defines the values exchanged with a catalog source (server
//! endpoints and result rows) and the error type every source reports.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Address of one schema on a database server
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    /// Host name or IP address of the server
    pub host: String,
    /// TCP port of the server
    pub port: u16,
    /// Schema (catalog) to connect to
    pub schema: String,
}

impl Endpoint {
    pub fn new(host: impl Into<String>, port: u16, schema: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            schema: schema.into(),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}/{}", self.host, self.port, self.schema)
    }
}

/// One row returned by a catalog source query
///
/// Column values are kept as text; SQL `NULL` is stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRow {
    columns: HashMap<String, Option<String>>,
}

impl SourceRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column value, builder style
    pub fn with(mut self, column: &str, value: impl Into<String>) -> Self {
        self.columns.insert(column.to_string(), Some(value.into()));
        self
    }

    /// Add a `NULL` column, builder style
    pub fn with_null(mut self, column: &str) -> Self {
        self.columns.insert(column.to_string(), None);
        self
    }

    /// Text value of a column, `None` when the column is missing or `NULL`
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).and_then(|v| v.as_deref())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Error type for catalog source operations
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),
}

/// Result type for catalog source operations
pub type SourceResult<T> = Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_display() {
        let endpoint = Endpoint::new("ensembldb.ensembl.org", 3306, "homo_sapiens_core_47_36i");
        assert_eq!(
            endpoint.to_string(),
            "ensembldb.ensembl.org:3306/homo_sapiens_core_47_36i"
        );
    }

    #[test]
    fn test_source_row_null_and_missing_columns() {
        let row = SourceRow::new()
            .with("meta_value", "9606")
            .with_null("meta_key");

        assert_eq!(row.get("meta_value"), Some("9606"));
        assert_eq!(row.get("meta_key"), None);
        assert_eq!(row.get("species_id"), None);
        assert_eq!(row.len(), 2);
    }
}
