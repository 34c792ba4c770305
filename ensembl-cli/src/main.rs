// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Ensembl Meta CLI entry point

use clap::Parser;
use colored::Colorize;

mod cli;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        log::LevelFilter::Debug
    } else if let Some(level) = cli.log_level {
        level.to_level_filter()
    } else {
        // RUST_LOG can still raise it
        log::LevelFilter::Warn
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let Cli {
        command,
        config,
        snapshot,
        format,
        ..
    } = cli;

    match command {
        Commands::Version => {
            println!("{} {}", "Ensembl Meta".bold().green(), ensembl_meta::VERSION);
            println!("Ensembl schema catalog resolver");
            Ok(())
        }

        Commands::Species => cli::handle_species(config, snapshot, format),

        Commands::Releases {
            taxon_id,
            database_type,
        } => cli::handle_releases(config, snapshot, format, taxon_id, database_type),

        Commands::Current { taxon_id } => cli::handle_current(config, snapshot, format, taxon_id),

        Commands::Schema {
            taxon_id,
            release,
            database_type,
        } => cli::handle_schema(config, snapshot, format, taxon_id, release, database_type),

        Commands::Describe {
            taxon_id,
            release,
            database_type,
            mart,
        } => cli::handle_describe(
            config,
            snapshot,
            format,
            taxon_id,
            release,
            database_type,
            mart,
        ),

        Commands::Warnings => cli::handle_warnings(config, snapshot, format),
    }
}
