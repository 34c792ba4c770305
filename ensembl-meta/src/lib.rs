// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Ensembl Meta - discovery and resolution of Ensembl schema catalogs
//!
//! An Ensembl database server exposes hundreds of schemas whose names follow a
//! loose `genus_species_type_release_assembly` convention. This crate lists
//! those schemas once, folds them into an in-memory index, joins the index
//! with the NCBI taxon identifiers stored in each core schema, and answers
//! questions such as "which releases exist for taxon 9606" or "which schema
//! holds variation data for release 47 of mouse".
//!
//! # Usage
//!
//! ```ignore
//! use ensembl_meta::{DatabaseFactory, DatabaseType, EnsemblConfig};
//!
//! let factory = DatabaseFactory::connect(EnsemblConfig::default(), &connector)?;
//!
//! // First call scans the catalog; later calls read the cached index
//! let releases = factory.resolver().release_versions(9606, DatabaseType::Core)?;
//! let descriptor = factory.create_latest_database(9606, DatabaseType::Variation)?;
//! println!("{}", descriptor.endpoint);
//! ```
//!
//! # Architecture
//!
//! ```text
//! DatabaseFactory (validated connection descriptors)
//!     ↓
//! MetadataResolver (existence checks, release and schema lookups)
//!     ↓
//! MetadataCache (populated once per factory)
//!     ↓
//! IndexBuilder + SchemaNameParser
//!     ↓
//! CatalogSource (catalog listing and meta-table queries)
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod factory;
pub mod source;
pub mod types;

pub use catalog::{
    CacheState, CacheStats, CatalogSnapshot, MetadataCache, MetadataResolver, ParseWarning,
    SchemaNameParser, SchemaNameRecord,
};
pub use config::{DuplicateTaxonPolicy, EnsemblConfig, MartConfig, ServerConfig};
pub use error::{MetadataError, MetadataResult};
pub use factory::{ConnectionDescriptor, DatabaseFactory, DatabaseKind};
pub use source::{
    CatalogSource, Endpoint, MemoryCatalogSource, MemoryConnector, SourceConnector, SourceError,
    SourceResult, SourceRow,
};
pub use types::DatabaseType;

/// Ensembl Meta version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Ensembl Meta crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
