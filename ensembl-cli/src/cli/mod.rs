// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for Ensembl Meta
//!
//! Loads a catalog snapshot, resolves lookups against it and prints the
//! results as tables or JSON.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_current, handle_describe, handle_releases, handle_schema, handle_species,
    handle_warnings,
};
