/// Benchmark for resolver throughput
///
/// Measures the one-off cost of populating the metadata cache from a large
/// catalog listing, then the throughput of lookups served from the cache.

use ensembl_meta::{DatabaseFactory, DatabaseType, EnsemblConfig, MemoryCatalogSource};
use std::sync::Arc;
use std::time::Instant;

const SPECIES: u32 = 200;
const RELEASES: u32 = 60;

fn build_source() -> Arc<MemoryCatalogSource> {
    let source = MemoryCatalogSource::new();
    for i in 0..SPECIES {
        for release in 10..10 + RELEASES {
            source.add_catalog(format!("genus{}_species_core_{}_1", i, release));
            source.add_catalog(format!("genus{}_species_variation_{}_1", i, release));
        }
        source.set_taxonomy_id(
            &format!("genus{}_species_core_{}_1", i, 10 + RELEASES - 1),
            (100_000 + i).to_string(),
        );
    }
    for i in 0..500 {
        source.add_catalog(format!("ensembl_unrelated_{}", i));
    }
    Arc::new(source)
}

fn main() {
    println!("=== Resolver Throughput Benchmark ===\n");

    let source = build_source();
    let catalogs = source.catalogs().len();
    println!(
        "📋 Setup: {} species x {} releases, {} catalog names\n",
        SPECIES, RELEASES, catalogs
    );

    let factory = DatabaseFactory::new(EnsemblConfig::default(), Box::new(source.clone()))
        .expect("Failed to create factory");

    // Benchmark: first call pays for population
    println!("📊 Benchmark: Cache Population");
    let populate_start = Instant::now();
    factory.resolver().populate().expect("Population failed");
    let populate_duration = populate_start.elapsed();
    let stats = factory.resolver().cache_stats();
    println!("  Time: {:?}", populate_duration);
    println!("  Schemas indexed: {}", stats.schema_count);
    println!("  Taxon IDs: {}", stats.taxon_count);
    println!("  Meta queries: {}", source.query_calls());
    println!();

    // Benchmark: cached lookups
    println!("📊 Benchmark: has_release() - Cached Lookups");
    let iterations = 100_000u32;
    let lookup_start = Instant::now();
    let mut hits = 0u32;
    for n in 0..iterations {
        let taxon_id = 100_000 + n % SPECIES;
        let release = 10 + n % (RELEASES + 5);
        if factory
            .resolver()
            .has_release(taxon_id, release, DatabaseType::Variation)
            .unwrap_or(false)
        {
            hits += 1;
        }
    }
    let lookup_duration = lookup_start.elapsed();
    println!("  Iterations: {}", iterations);
    println!("  Hits: {}", hits);
    println!("  Time: {:?}", lookup_duration);
    println!(
        "  Throughput: {:.0} lookups/sec",
        iterations as f64 / lookup_duration.as_secs_f64()
    );
    println!();

    // Benchmark: descriptor creation
    println!("📊 Benchmark: create_latest_database() - Descriptors");
    let iterations = 20_000u32;
    let descriptor_start = Instant::now();
    for n in 0..iterations {
        let _descriptor = factory.create_latest_database(100_000 + n % SPECIES, DatabaseType::Core);
    }
    let descriptor_duration = descriptor_start.elapsed();
    println!("  Iterations: {}", iterations);
    println!("  Time: {:?}", descriptor_duration);
    println!(
        "  Throughput: {:.0} descriptors/sec",
        iterations as f64 / descriptor_duration.as_secs_f64()
    );
    println!();

    println!("=== Summary ===");
    println!("  Catalog listings: {}", source.list_calls());
    println!(
        "  Population vs. lookup: {:.0}x",
        populate_duration.as_secs_f64()
            / (lookup_duration.as_secs_f64() / 100_000f64).max(f64::EPSILON)
    );
}
