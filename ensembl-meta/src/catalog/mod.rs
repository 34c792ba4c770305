// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Ensembl catalog metadata
//!
//! Parsing of schema names, the derived release and taxon indexes, the
//! populate-once cache holding them, and the resolver answering lookups.

pub mod builder;
pub mod cache;
pub mod index;
pub mod parser;
pub mod resolver;
pub mod warnings;

pub use builder::IndexBuilder;
pub use cache::{CacheState, CacheStats, MetadataCache};
pub use index::{CatalogSnapshot, MetadataIndex, ReleaseMap, SpeciesReleases, TaxonIndex};
pub use parser::{ParseOutcome, SchemaNameParser, SchemaNameRecord};
pub use resolver::MetadataResolver;
pub use warnings::ParseWarning;
