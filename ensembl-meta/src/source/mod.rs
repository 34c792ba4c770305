// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Catalog sources
//!
//! Trait-based access to the database server that publishes the Ensembl
//! catalogs, so vendor drivers, in-memory fixtures and offline snapshots can
//! be used interchangeably.
//!
//! # Architecture
//!
//! ```text
//! IndexBuilder (catalog scan and taxon lookups)
//!     ↓
//! CatalogSource (list catalogs, run queries)
//!     ↓
//! Concrete Implementations (vendor driver, MemoryCatalogSource, snapshot)
//! ```

pub mod memory;
pub mod snapshot;
pub mod traits;
pub mod types;

pub use memory::{MemoryCatalogSource, MemoryConnector};
pub use snapshot::{load_snapshot_source, CatalogSnapshotFile};
pub use traits::{
    taxonomy_query, CatalogSource, SourceConnector, META_VALUE_COLUMN, TAXONOMY_QUERY_TEMPLATE,
};
pub use types::{Endpoint, SourceError, SourceResult, SourceRow};
