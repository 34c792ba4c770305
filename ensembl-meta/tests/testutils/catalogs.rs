//! Canned catalog listings

/// Human and mouse over two releases, plus names that must be ignored
pub const MIXED_RELEASES: &[&str] = &[
    "homo_sapiens_core_46_36h",
    "homo_sapiens_core_47_36i",
    "homo_sapiens_variation_47_36i",
    "homo_sapiens_funcgen_47_36i",
    "mus_musculus_core_46_36g",
    "mus_musculus_core_47_37",
    "mus_musculus_otherfeatures_47_37",
    // Not matching any type pattern
    "ensembl_compara_47",
    "ensembl_website_47",
    "information_schema",
    "mysql",
    // Reserved release
    "homo_sapiens_core_00_36",
];

/// Taxonomy rows keyed by the latest core schema of each species
pub const MIXED_RELEASES_TAXA: &[(&str, &str)] = &[
    ("homo_sapiens_core_47_36i", "9606"),
    ("mus_musculus_core_47_37", "10090"),
];

/// A catalog of `species` synthetic species with `releases` core releases each
pub fn synthetic(species: usize, releases: u32) -> Vec<(String, Vec<String>)> {
    (0..species)
        .map(|i| {
            let genus = format!("genus{}", i);
            let schemas = (40..40 + releases)
                .map(|release| format!("{}_species_core_{}_1", genus, release))
                .collect();
            (genus, schemas)
        })
        .collect()
}
