//! Read-only reports: detailed per-category breakdown, the roster
//! completeness check, and the unverified-by-group listing.

use colored::Colorize;
use std::collections::BTreeMap;

use gazetteer::{
    group_unverified, missing_divisions, CanonicalDataset, MunicipalityConfig, DISPLAY_CAP,
};

/// Per-category breakdown with unverified counts by source.
pub fn detailed(dataset: &CanonicalDataset) {
    println!("{}\n", "📊 Detailed Verification Report".bright_cyan().bold());

    for (category, bucket) in &dataset.locations {
        let verified = bucket.iter().filter(|r| r.verified).count();
        let unverified: Vec<_> = bucket.iter().filter(|r| !r.verified).collect();

        println!("  {}S:", category.to_string().to_uppercase());
        println!("    Total: {}", bucket.len());
        println!("    Verified: {}", verified);
        println!("    Unverified: {}", unverified.len());

        if !unverified.is_empty() {
            let mut by_source: BTreeMap<&str, usize> = BTreeMap::new();
            for record in &unverified {
                *by_source.entry(record.source.as_str()).or_default() += 1;
            }
            let parts: Vec<String> = by_source
                .iter()
                .map(|(source, count)| format!("{}: {}", source, count))
                .collect();
            println!("    Sources: {}", parts.join(", "));
        }
        println!();
    }
}

/// Authoritative divisions absent from the store.
pub fn missing(dataset: &CanonicalDataset, config: &MunicipalityConfig) {
    println!(
        "{}\n",
        format!("📋 Official {} barangays", config.municipality)
            .bright_cyan()
            .bold()
    );

    let missing = missing_divisions(dataset, config.barangays.iter().map(String::as_str));

    if missing.is_empty() {
        println!(
            "  {} all {} official barangays are present",
            "✅".green(),
            config.barangays.len()
        );
    } else {
        println!(
            "  {} {} of {} barangays missing:",
            "⚠️".yellow(),
            missing.len(),
            config.barangays.len()
        );
        for name in &missing {
            println!("    • {}", name);
        }
        println!("\n  These need to be geocoded manually or from boundary data");
    }
}

/// Unverified locations under their semantic display groups, capped at
/// `DISPLAY_CAP` entries per group with a remainder count.
pub fn unverified_groups(dataset: &CanonicalDataset) {
    println!(
        "{}\n",
        "📋 Unverified Locations by Category".bright_cyan().bold()
    );

    let groups = group_unverified(dataset);
    let total: usize = groups.iter().map(|g| g.records.len()).sum();

    if total == 0 {
        println!("  {} every location is verified", "✅".green());
        return;
    }

    for group in &groups {
        if group.records.is_empty() {
            continue;
        }
        println!("  {} ({}):", group.label, group.records.len());
        for record in group.records.iter().take(DISPLAY_CAP) {
            println!("    • {}", record.name);
        }
        if group.records.len() > DISPLAY_CAP {
            println!("    ... and {} more", group.records.len() - DISPLAY_CAP);
        }
        println!();
    }
}
