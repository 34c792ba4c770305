//! Test utilities for Ensembl Meta integration tests
//!
//! - CatalogFixture: in-memory catalog server with a factory on top
//! - catalogs: canned catalog listings used across test files

#![allow(dead_code)]

pub mod catalog_fixture;
pub mod catalogs;

/// Route library logs through the test harness, once per test binary
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
