//! The clean command: interactive review of unverified records and the
//! standing category fixups. Mutating choices re-persist the store.

use anyhow::Result;
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Select};

use gazetteer::{
    reclassify, Category, JsonStore, MunicipalityConfig, Source, SITIO_CLEANUP_RULES,
};

use crate::cmd::report;

pub fn run(store: &JsonStore, config: &MunicipalityConfig) -> Result<()> {
    let term = Term::stdout();
    let mut dataset = store.load()?;

    println!(
        "{}",
        format!(
            "{} location data: cleaning & verification",
            config.municipality
        )
        .bright_cyan()
        .bold()
    );

    let verified = dataset.records().filter(|r| r.verified).count();
    println!("\n📊 Current status:");
    println!("  Total locations: {}", dataset.total());
    println!("  Verified: {}", verified);
    println!("  Unverified: {}\n", dataset.total() - verified);

    report::unverified_groups(&dataset);

    let options = vec![
        "Verify all OSM locations",
        "Move barangay halls from sitios to landmarks",
        "Show detailed verification report",
        "Exit without changes",
    ];

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("What would you like to do?")
        .items(&options)
        .default(0)
        .interact_on(&term)?;

    match selection {
        0 => {
            let count = dataset.mark_source_verified(Source::Osm);
            store.save(&mut dataset)?;
            println!(
                "\n{} marked {} OSM locations as verified",
                "✅".green(),
                count
            );
        }
        1 => {
            let moved = reclassify(&mut dataset, Category::Sitio, SITIO_CLEANUP_RULES);
            store.save(&mut dataset)?;
            println!(
                "\n{} moved {} barangay halls from sitios to landmarks",
                "✅".green(),
                moved
            );
        }
        2 => report::detailed(&dataset),
        3 => println!("\n👋 No changes made"),
        _ => unreachable!(),
    }

    Ok(())
}

/// Non-interactive form of the verification option: mark every record
/// from one source verified and re-persist.
pub fn verify_source(store: &JsonStore, source: Source) -> Result<()> {
    let mut dataset = store.load()?;
    let count = dataset.mark_source_verified(source);

    if count == 0 {
        println!("no unverified {} locations", source);
        return Ok(());
    }

    store.save(&mut dataset)?;
    println!(
        "{} marked {} {} locations as verified",
        "✅".green(),
        count,
        source
    );
    Ok(())
}
