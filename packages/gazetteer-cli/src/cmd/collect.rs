//! The collect command: harvest every source in trust order and merge
//! new locations into the canonical store.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use gazetteer::harvest::google::API_KEY_ENV;
use gazetteer::{
    run_harvest, BoundaryFileHarvester, CuratedLandmarks, GooglePlacesHarvester, HarvestError,
    HarvestSummary, HarvesterExt, JsonStore, Merger, MunicipalityConfig, NominatimHarvester,
};

pub async fn run(
    store: &JsonStore,
    config: &MunicipalityConfig,
    boundaries: &Path,
    skip_google: bool,
    skip_osm: bool,
) -> Result<()> {
    let mut dataset = store.load_or_default(config)?;
    let initial_total = dataset.total();
    let mut merger = Merger::resume(config.bounds, &dataset);

    println!(
        "{}",
        format!(
            "Collecting locations for {}, {}",
            config.municipality, config.province
        )
        .bright_cyan()
        .bold()
    );
    println!("📋 {} locations already known\n", initial_total);

    // Ctrl-C flips the token; harvesters stop between queries and
    // whatever was gathered so far is still merged and saved.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let mut summaries: Vec<HarvestSummary> = Vec::new();

    // Sources run in declared trust order: under first-seen-wins merging,
    // whoever runs first owns the name.
    if boundaries.exists() {
        println!("{}", "🗺️  Loading boundary polygons...".bold());
        let harvester = BoundaryFileHarvester::new(boundaries, config);
        summaries.push(run_harvest(&harvester, &mut merger, &mut dataset, &cancel).await);
    } else {
        println!(
            "{} boundary file {} not found, skipping",
            "⚠️".yellow(),
            boundaries.display()
        );
    }

    if !cancel.is_cancelled() {
        println!("{}", "🏛️  Adding curated landmarks...".bold());
        let harvester = CuratedLandmarks::basey(config);
        summaries.push(run_harvest(&harvester, &mut merger, &mut dataset, &cancel).await);
    }

    if !skip_google && !cancel.is_cancelled() {
        match GooglePlacesHarvester::from_env(config) {
            Ok(harvester) => {
                println!("{}", "🔍 Searching Google Places...".bold());
                let harvester = harvester.rate_limited(2);
                summaries.push(run_harvest(&harvester, &mut merger, &mut dataset, &cancel).await);
            }
            Err(HarvestError::MissingApiKey { .. }) => {
                println!(
                    "{} {} not set, skipping Google Places",
                    "⚠️".yellow(),
                    API_KEY_ENV
                );
            }
            Err(e) => return Err(e.into()),
        }
    }

    if !skip_osm && !cancel.is_cancelled() {
        println!("{}", "🗺️  Searching OpenStreetMap...".bold());
        // Nominatim's acceptable-use policy: no more than one query per second
        let harvester =
            NominatimHarvester::new(config).min_interval(Duration::from_millis(1100));
        summaries.push(run_harvest(&harvester, &mut merger, &mut dataset, &cancel).await);
    }

    let added: usize = summaries.iter().map(|s| s.added).sum();
    let interrupted = cancel.is_cancelled() || summaries.iter().any(|s| s.interrupted);

    println!("\n{}", "📊 Collection Summary".bright_cyan().bold());
    for summary in &summaries {
        println!(
            "  {:<8} {} added, {} already known, {} out of bounds, {} queries failed",
            summary.source.to_string(),
            summary.added.to_string().green(),
            summary.skipped_known,
            summary.out_of_bounds,
            summary.queries_failed
        );
    }

    if interrupted {
        println!("\n{} interrupted, keeping partial results", "⚠️".yellow());
    }

    if added > 0 {
        store.save(&mut dataset)?;
        println!(
            "\n{} added {} new locations, total now {}",
            "✅".green(),
            added,
            dataset.total()
        );
    } else {
        println!(
            "\n{} no new locations found, store already complete",
            "✅".green()
        );
    }

    Ok(())
}
