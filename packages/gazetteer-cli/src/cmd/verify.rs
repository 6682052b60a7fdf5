//! The verify command: run every audit over the persisted store and end
//! with a single verdict line.

use anyhow::Result;
use colored::Colorize;

use gazetteer::{
    find_merge_collisions, find_name_duplicates, find_out_of_bounds, find_too_close, JsonStore,
    MunicipalityConfig, VerificationReport, PROXIMITY_THRESHOLD_M,
};

pub fn run(store: &JsonStore, config: &MunicipalityConfig) -> Result<()> {
    let dataset = store.load()?;

    println!("{}", "═".repeat(60).bright_cyan());
    println!(
        "{}",
        format!(
            "{} LOCATION VERIFICATION",
            config.municipality.to_uppercase()
        )
        .bright_cyan()
        .bold()
    );
    println!("{}\n", "═".repeat(60).bright_cyan());

    // Statistics
    let report = VerificationReport::build(&dataset);
    println!("{}", "📊 Statistics".bold());
    println!("  Municipality: {}", report.municipality);
    println!("  Province: {}", report.province);
    println!("  Total locations: {}", report.total_locations);
    println!("  Last updated: {}\n", report.last_updated);

    println!("  By type:");
    for stats in &report.categories {
        println!(
            "    {}s: {} ({} verified)",
            stats.category, stats.total, stats.verified
        );
    }
    println!("  By source:");
    for (source, count) in &report.source_counts {
        println!("    {}: {}", source, count);
    }
    println!();

    // Duplicates
    println!("{}", "🔍 Checking for duplicates...".bold());
    let duplicates = find_name_duplicates(&dataset);
    if duplicates.is_empty() {
        println!("  {} no duplicate names", "✅".green());
    } else {
        println!(
            "  {} {} duplicate names:",
            "⚠️".yellow(),
            duplicates.len()
        );
        for group in &duplicates {
            println!("    '{}' appears {} times:", group.key, group.records.len());
            for record in &group.records {
                println!(
                    "      - type: {}, source: {}, coords: ({:.6}, {:.6})",
                    record.category,
                    record.source,
                    record.coordinates.lat,
                    record.coordinates.lng
                );
            }
        }
    }

    let collisions = find_merge_collisions(&dataset);
    if !collisions.is_empty() {
        println!(
            "  {} {} name collisions under merge identity:",
            "⚠️".yellow(),
            collisions.len()
        );
        for group in &collisions {
            let names: Vec<&str> = group.records.iter().map(|r| r.name.as_str()).collect();
            println!("    {} ← {}", group.key, names.join(" / "));
        }
    }
    println!();

    // Proximity
    println!("{}", "📍 Checking for locations too close together...".bold());
    let too_close = find_too_close(&dataset, PROXIMITY_THRESHOLD_M);
    if too_close.is_empty() {
        println!(
            "  {} no locations within {}m of each other",
            "✅".green(),
            PROXIMITY_THRESHOLD_M
        );
    } else {
        println!(
            "  {} {} pairs within {}m:",
            "⚠️".yellow(),
            too_close.len(),
            PROXIMITY_THRESHOLD_M
        );
        for pair in &too_close {
            println!(
                "    {} & {}: {:.1}m apart",
                pair.a.name, pair.b.name, pair.distance_m
            );
        }
    }
    println!();

    // Bounds
    println!("{}", "🗺️  Checking location bounds...".bold());
    let out_of_bounds = find_out_of_bounds(&dataset, &config.bounds);
    if out_of_bounds.is_empty() {
        println!("  {} all locations within municipal bounds", "✅".green());
    } else {
        println!(
            "  {} {} locations outside bounds:",
            "❌".red(),
            out_of_bounds.len()
        );
        for record in &out_of_bounds {
            println!(
                "    {}: ({:.6}, {:.6})",
                record.name, record.coordinates.lat, record.coordinates.lng
            );
        }
    }
    println!();

    // Summary
    println!("{}", "═".repeat(60).bright_cyan());
    let mut issues: Vec<String> = Vec::new();
    if !duplicates.is_empty() {
        issues.push(format!("{} duplicate names", duplicates.len()));
    }
    if !collisions.is_empty() {
        issues.push(format!("{} merge-identity collisions", collisions.len()));
    }
    if !too_close.is_empty() {
        issues.push(format!("{} location pairs too close", too_close.len()));
    }
    if !out_of_bounds.is_empty() {
        issues.push(format!("{} locations out of bounds", out_of_bounds.len()));
    }
    if report.unverified_total > 0 {
        issues.push(format!("{} unverified locations", report.unverified_total));
    }

    if issues.is_empty() {
        println!("{} all checks passed, location data is clean", "✅".green());
    } else {
        println!("{}", "Issues found:".yellow().bold());
        for issue in &issues {
            println!("  • {}", issue);
        }
    }

    Ok(())
}
